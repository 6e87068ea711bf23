//! Message formatting utilities for terminal display.

use crate::room::{
    ChatEntry, ControlState, FloatingReaction, NoticeKind, Preview, QUICK_REACTIONS,
    RemoteParticipant, TrackKind,
};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Message formatter for terminal display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the remote roster. The local user is listed first as "(me)".
    pub fn format_roster(participants: &[RemoteParticipant], me: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\nParticipants:\n", RULE));
        output.push_str(&format!("{} (me)\n", me));

        for participant in participants {
            output.push_str(&format!(
                "{} [camera {}] [mic {}]\n",
                participant.name,
                on_off(participant.camera),
                on_off(participant.microphone)
            ));
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a banner or toast
    pub fn format_notice(kind: NoticeKind, text: &str) -> String {
        let label = match kind {
            NoticeKind::Success => "ok",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warn",
            NoticeKind::Error => "error",
        };
        format!("\n[{}] {}\n", label, text)
    }

    /// Format a chat message. The terminal shows the plain text body.
    pub fn format_chat(entry: &ChatEntry) -> String {
        format!(
            "\n\n{}\n@{}: {}\nsent at {}\n{}\n",
            THIN_RULE, entry.user_name, entry.text, entry.timestamp, THIN_RULE
        )
    }

    pub fn format_reaction(reaction: &FloatingReaction) -> String {
        format!("\n  {}  from {}\n", reaction.emoji, reaction.user_name)
    }

    /// Format a remote camera/microphone change
    pub fn format_participant_media(name: &str, kind: TrackKind, on: bool) -> String {
        let device = match kind {
            TrackKind::Video => "camera",
            TrackKind::Audio => "microphone",
        };
        format!("\n* {} turned {} {}\n", name, on_off(on), device)
    }

    pub fn format_controls(controls: &ControlState) -> String {
        format!(
            "\n[camera {}] [mic {}]{}\n",
            on_off(controls.camera_on),
            on_off(controls.mic_on),
            if controls.screen_sharing {
                " [sharing screen]"
            } else {
                ""
            }
        )
    }

    pub fn format_preview(preview: &Preview) -> String {
        match preview {
            Preview::None => "\n(no local preview)\n".to_string(),
            Preview::Camera { stream_id, .. } => format!("\n(preview: camera {})\n", stream_id),
            Preview::Screen { stream_id } => format!("\n(preview: screen {})\n", stream_id),
        }
    }

    /// Elapsed time plus the local control state
    pub fn format_status(elapsed: &str, controls: &ControlState) -> String {
        format!(
            "\nIn meeting for {}{}",
            elapsed,
            Self::format_controls(controls)
        )
    }

    pub fn format_emoji_picker() -> String {
        format!(
            "\nReactions: {}  (send one with /react <emoji>)\n",
            QUICK_REACTIONS.join(" ")
        )
    }

    pub fn format_help() -> String {
        [
            "",
            "Type a message and press Enter to send it to everyone.",
            "  /react [emoji]  send a reaction (random if omitted)",
            "  /emoji          show or hide the reaction list",
            "  /camera, /mic   turn your camera or microphone on/off",
            "  /share          start sharing your screen",
            "  /unshare        stop sharing your screen",
            "  /chat           show or hide incoming chat",
            "  /status         show elapsed time and your controls",
            "  /leave          leave the meeting",
            "",
        ]
        .join("\n")
    }

    pub fn format_unknown_command(name: &str) -> String {
        format!("\nUnknown command '/{}'. Type /help for a list.\n", name)
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
