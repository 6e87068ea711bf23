//! What the meeting room renders, and an in-memory renderer.

use huddle_shared::protocol::ParticipantInfo;

pub use crate::chrome::AlertKind as NoticeKind;

use super::media::TrackKind;

/// Participant as shown in the roster and tile grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteParticipant {
    pub id: String,
    pub name: String,
    pub camera: bool,
    pub microphone: bool,
    /// RFC 3339
    pub joined_at: String,
}

impl From<&ParticipantInfo> for RemoteParticipant {
    fn from(info: &ParticipantInfo) -> Self {
        Self {
            id: info.id.clone(),
            name: info.name.clone(),
            camera: info.camera,
            microphone: info.microphone,
            joined_at: info.joined_at.clone(),
        }
    }
}

/// Transient banner or toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// One line in the chat pane. `html` is the rendered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub user_name: String,
    pub text: String,
    pub html: String,
    pub timestamp: String,
}

/// Emoji floating over the video grid
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingReaction {
    pub id: u64,
    pub emoji: String,
    pub user_name: String,
    /// Horizontal position, 0-100
    pub left_percent: f64,
    pub expires_at: i64,
}

/// Visual state of the camera/microphone/screen control buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub camera_on: bool,
    pub mic_on: bool,
    pub screen_sharing: bool,
}

impl ControlState {
    pub fn camera_icon(&self) -> &'static str {
        if self.camera_on {
            "fa-video"
        } else {
            "fa-video-slash"
        }
    }

    pub fn mic_icon(&self) -> &'static str {
        if self.mic_on {
            "fa-microphone"
        } else {
            "fa-microphone-slash"
        }
    }

    pub fn camera_style(&self) -> &'static str {
        button_style(self.camera_on)
    }

    pub fn mic_style(&self) -> &'static str {
        button_style(self.mic_on)
    }
}

fn button_style(on: bool) -> &'static str {
    if on { "btn-secondary" } else { "btn-danger" }
}

/// Source of the local preview tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    None,
    /// Local camera, always muted to avoid echo
    Camera { stream_id: String, muted: bool },
    Screen { stream_id: String },
}

/// Rendering surface of the meeting room.
///
/// Calls for elements the surface does not have are no-ops.
pub trait RoomView: Send {
    fn show_notice(&mut self, kind: NoticeKind, text: &str);
    /// Replace the whole remote roster and tile grid
    fn render_roster(&mut self, participants: &[RemoteParticipant]);
    /// Patch one participant's status icon in place
    fn update_participant_media(&mut self, user_id: &str, kind: TrackKind, on: bool);
    fn append_chat(&mut self, entry: ChatEntry);
    fn scroll_chat_to_bottom(&mut self);
    fn clear_message_input(&mut self);
    fn spawn_reaction(&mut self, reaction: &FloatingReaction);
    fn remove_reaction(&mut self, id: u64);
    fn render_controls(&mut self, controls: &ControlState);
    fn set_preview(&mut self, preview: &Preview);
    fn render_timer(&mut self, elapsed: &str);
    fn set_chat_visible(&mut self, visible: bool);
    fn set_emoji_picker_visible(&mut self, visible: bool);
}

/// Keeps what would be on screen
#[derive(Debug, Clone)]
pub struct HeadlessView {
    pub notices: Vec<Notice>,
    pub roster: Vec<RemoteParticipant>,
    pub chat: Vec<ChatEntry>,
    pub chat_scrolls: usize,
    pub input_clears: usize,
    pub reactions: Vec<FloatingReaction>,
    pub controls: ControlState,
    pub preview: Preview,
    pub timer: String,
    pub chat_visible: bool,
    pub emoji_picker_visible: bool,
}

impl Default for HeadlessView {
    fn default() -> Self {
        Self {
            notices: Vec::new(),
            roster: Vec::new(),
            chat: Vec::new(),
            chat_scrolls: 0,
            input_clears: 0,
            reactions: Vec::new(),
            controls: ControlState {
                camera_on: true,
                mic_on: true,
                screen_sharing: false,
            },
            preview: Preview::None,
            timer: "00:00:00".to_string(),
            chat_visible: true,
            emoji_picker_visible: false,
        }
    }
}

impl HeadlessView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl RoomView for HeadlessView {
    fn show_notice(&mut self, kind: NoticeKind, text: &str) {
        self.notices.push(Notice {
            kind,
            text: text.to_string(),
        });
    }

    fn render_roster(&mut self, participants: &[RemoteParticipant]) {
        self.roster = participants.to_vec();
    }

    fn update_participant_media(&mut self, user_id: &str, kind: TrackKind, on: bool) {
        for participant in self.roster.iter_mut().filter(|p| p.id == user_id) {
            match kind {
                TrackKind::Video => participant.camera = on,
                TrackKind::Audio => participant.microphone = on,
            }
        }
    }

    fn append_chat(&mut self, entry: ChatEntry) {
        self.chat.push(entry);
    }

    fn scroll_chat_to_bottom(&mut self) {
        self.chat_scrolls += 1;
    }

    fn clear_message_input(&mut self) {
        self.input_clears += 1;
    }

    fn spawn_reaction(&mut self, reaction: &FloatingReaction) {
        self.reactions.push(reaction.clone());
    }

    fn remove_reaction(&mut self, id: u64) {
        self.reactions.retain(|r| r.id != id);
    }

    fn render_controls(&mut self, controls: &ControlState) {
        self.controls = *controls;
    }

    fn set_preview(&mut self, preview: &Preview) {
        self.preview = preview.clone();
    }

    fn render_timer(&mut self, elapsed: &str) {
        self.timer = elapsed.to_string();
    }

    fn set_chat_visible(&mut self, visible: bool) {
        self.chat_visible = visible;
    }

    fn set_emoji_picker_visible(&mut self, visible: bool) {
        self.emoji_picker_visible = visible;
    }
}
