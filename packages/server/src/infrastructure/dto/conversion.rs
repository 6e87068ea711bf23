//! Conversion logic from domain entities to DTOs.

use huddle_shared::{
    protocol::{
        CameraToggled, ChatHistory, HistoryMessage, MessageSent, MicrophoneToggled, NewMessage,
        NewReaction, ParticipantInfo, RosterChange, ServerEvent,
    },
    time::{timestamp_to_local_clock, timestamp_to_rfc3339},
};

use crate::domain::{
    ChatMessage, MediaKind, Meeting, MeetingHistoryEntry, MeetingStats, Participant, Reaction,
};

use super::http::{HistoryEntryDto, MeetingDetailDto, MeetingDto, StatsDto};

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<&Participant> for ParticipantInfo {
    fn from(model: &Participant) -> Self {
        Self {
            id: model.user_id.as_str().to_string(),
            name: model.name.as_str().to_string(),
            joined_at: timestamp_to_rfc3339(model.joined_at.value()),
            camera: model.camera,
            microphone: model.microphone,
        }
    }
}

impl From<ChatMessage> for HistoryMessage {
    fn from(model: ChatMessage) -> Self {
        Self {
            user_name: model.user_name.into_string(),
            message: model.content.into_string(),
            timestamp: timestamp_to_rfc3339(model.timestamp.value()),
        }
    }
}

impl From<ChatMessage> for NewMessage {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id,
            user_name: model.user_name.into_string(),
            message: model.content.into_string(),
            timestamp: timestamp_to_local_clock(model.timestamp.value()),
        }
    }
}

impl From<Reaction> for NewReaction {
    fn from(model: Reaction) -> Self {
        Self {
            id: model.id,
            user_name: model.user_name.into_string(),
            emoji: model.emoji.into_string(),
            timestamp: timestamp_to_rfc3339(model.timestamp.value()),
        }
    }
}

/// `user-joined` event carrying the full roster
pub fn user_joined_event(joined: &Participant, participants: &[Participant]) -> ServerEvent {
    ServerEvent::UserJoined(RosterChange {
        user_name: joined.name.as_str().to_string(),
        message: format!("{} joined the meeting", joined.name),
        participants: participants.iter().map(ParticipantInfo::from).collect(),
    })
}

/// `user-left` event carrying the remaining roster
pub fn user_left_event(left: &Participant, remaining: &[Participant]) -> ServerEvent {
    ServerEvent::UserLeft(RosterChange {
        user_name: left.name.as_str().to_string(),
        message: format!("{} left the meeting", left.name),
        participants: remaining.iter().map(ParticipantInfo::from).collect(),
    })
}

pub fn chat_history_event(messages: Vec<ChatMessage>) -> ServerEvent {
    ServerEvent::ChatHistory(ChatHistory {
        messages: messages.into_iter().map(HistoryMessage::from).collect(),
    })
}

pub fn message_sent_event() -> ServerEvent {
    ServerEvent::MessageSent(MessageSent {
        status: "success".to_string(),
        message: "Message sent successfully".to_string(),
    })
}

/// `camera-toggled` or `microphone-toggled` depending on `kind`
pub fn media_toggled_event(participant: &Participant, kind: MediaKind) -> ServerEvent {
    let user_id = participant.user_id.as_str().to_string();
    let user_name = participant.name.as_str().to_string();
    match kind {
        MediaKind::Camera => ServerEvent::CameraToggled(CameraToggled {
            user_id,
            user_name,
            camera_on: participant.camera,
        }),
        MediaKind::Microphone => ServerEvent::MicrophoneToggled(MicrophoneToggled {
            user_id,
            user_name,
            mic_on: participant.microphone,
        }),
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&Meeting> for MeetingDto {
    fn from(model: &Meeting) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            title: model.title.as_str().to_string(),
            host_id: model.host_id.as_str().to_string(),
            host_name: model.host_name.as_str().to_string(),
            scheduled_time: model.scheduled_time.clone(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
            status: model.status.as_str().to_string(),
        }
    }
}

pub fn meeting_detail_dto(meeting: &Meeting, participants: &[Participant]) -> MeetingDetailDto {
    MeetingDetailDto {
        meeting: MeetingDto::from(meeting),
        participants: participants.iter().map(ParticipantInfo::from).collect(),
    }
}

impl From<MeetingHistoryEntry> for HistoryEntryDto {
    fn from(model: MeetingHistoryEntry) -> Self {
        Self {
            meeting_id: model.meeting_id.into_string(),
            role: model.role.as_str().to_string(),
            meeting_title: model.meeting_title.into_string(),
            host_name: model.host_name.into_string(),
            joined_at: timestamp_to_rfc3339(model.joined_at.value()),
        }
    }
}

impl From<MeetingStats> for StatsDto {
    fn from(model: MeetingStats) -> Self {
        Self {
            created: model.created,
            joined: model.joined,
            scheduled: model.scheduled,
        }
    }
}
