//! `RoomView` that prints to stdout.

use crate::room::{
    ChatEntry, ControlState, FloatingReaction, NoticeKind, Preview, RemoteParticipant, RoomView,
    TrackKind,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

pub struct TerminalView {
    user_name: String,
    roster: Vec<RemoteParticipant>,
    controls: Option<ControlState>,
    timer: String,
    chat_visible: bool,
}

impl TerminalView {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            roster: Vec::new(),
            controls: None,
            timer: "00:00:00".to_string(),
            chat_visible: true,
        }
    }

    /// Last elapsed time rendered by the room
    pub fn timer(&self) -> &str {
        &self.timer
    }

    fn print(&self, text: &str) {
        print!("{}", text);
        redisplay_prompt(&self.user_name);
    }
}

impl RoomView for TerminalView {
    fn show_notice(&mut self, kind: NoticeKind, text: &str) {
        self.print(&MessageFormatter::format_notice(kind, text));
    }

    fn render_roster(&mut self, participants: &[RemoteParticipant]) {
        self.roster = participants.to_vec();
        self.print(&MessageFormatter::format_roster(participants, &self.user_name));
    }

    fn update_participant_media(&mut self, user_id: &str, kind: TrackKind, on: bool) {
        let Some(participant) = self.roster.iter_mut().find(|p| p.id == user_id) else {
            return;
        };
        match kind {
            TrackKind::Video => participant.camera = on,
            TrackKind::Audio => participant.microphone = on,
        }
        let line = MessageFormatter::format_participant_media(&participant.name, kind, on);
        self.print(&line);
    }

    fn append_chat(&mut self, entry: ChatEntry) {
        if self.chat_visible {
            self.print(&MessageFormatter::format_chat(&entry));
        }
    }

    // The terminal scrolls and clears its own input line
    fn scroll_chat_to_bottom(&mut self) {}

    fn clear_message_input(&mut self) {}

    fn spawn_reaction(&mut self, reaction: &FloatingReaction) {
        self.print(&MessageFormatter::format_reaction(reaction));
    }

    fn remove_reaction(&mut self, _id: u64) {}

    fn render_controls(&mut self, controls: &ControlState) {
        // Skip repaints that change nothing
        if self.controls.as_ref() == Some(controls) {
            return;
        }
        self.controls = Some(*controls);
        self.print(&MessageFormatter::format_controls(controls));
    }

    fn set_preview(&mut self, preview: &Preview) {
        tracing::debug!("{}", MessageFormatter::format_preview(preview).trim());
    }

    fn render_timer(&mut self, elapsed: &str) {
        self.timer = elapsed.to_string();
    }

    fn set_chat_visible(&mut self, visible: bool) {
        self.chat_visible = visible;
        let text = if visible {
            "Chat shown"
        } else {
            "Chat hidden"
        };
        self.print(&MessageFormatter::format_notice(NoticeKind::Info, text));
    }

    fn set_emoji_picker_visible(&mut self, visible: bool) {
        if visible {
            self.print(&MessageFormatter::format_emoji_picker());
        }
    }
}
