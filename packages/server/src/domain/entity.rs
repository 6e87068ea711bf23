//! Domain entities.

use std::collections::VecDeque;

use super::{
    error::RepositoryError,
    value_object::{
        Emoji, MeetingId, MeetingTitle, MessageContent, SessionId, Timestamp, UserId, UserName,
    },
};

/// Default maximum number of participants in a room
pub const DEFAULT_PARTICIPANT_CAPACITY: usize = 100;
/// Default number of chat messages kept for replay
pub const DEFAULT_MESSAGE_CAPACITY: usize = 500;

/// Local capture device a participant can switch on and off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Camera,
    Microphone,
}

/// An authenticated WebSocket connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub user_name: UserName,
    pub connected_at: Timestamp,
}

/// A connection present in a meeting room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub name: UserName,
    pub joined_at: Timestamp,
    pub camera: bool,
    pub microphone: bool,
}

impl Participant {
    /// Participant entry for a session; camera and microphone start on
    pub fn from_session(session: &Session, joined_at: Timestamp) -> Self {
        Self::new(
            session.id.clone(),
            session.user_id.clone(),
            session.user_name.clone(),
            joined_at,
        )
    }

    /// New participants start with camera and microphone on
    pub fn new(session_id: SessionId, user_id: UserId, name: UserName, joined_at: Timestamp) -> Self {
        Self {
            session_id,
            user_id,
            name,
            joined_at,
            camera: true,
            microphone: true,
        }
    }

    fn set_media(&mut self, kind: MediaKind, on: bool) {
        match kind {
            MediaKind::Camera => self.camera = on,
            MediaKind::Microphone => self.microphone = on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub user_id: UserId,
    pub user_name: UserName,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        user_id: UserId,
        user_name: UserName,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            user_name,
            content,
            timestamp,
        }
    }
}

/// Emoji reaction. Relayed only, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: String,
    pub user_name: UserName,
    pub emoji: Emoji,
    pub timestamp: Timestamp,
}

impl Reaction {
    pub fn new(user_name: UserName, emoji: Emoji, timestamp: Timestamp) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_name,
            emoji,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingStatus {
    Active,
    Scheduled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Scheduled => "scheduled",
        }
    }
}

/// A meeting that can be joined by its ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub id: MeetingId,
    pub title: MeetingTitle,
    pub host_id: UserId,
    pub host_name: UserName,
    /// Free-form date/time entered by the host when scheduling
    pub scheduled_time: Option<String>,
    pub created_at: Timestamp,
    pub status: MeetingStatus,
}

/// Live state of a meeting: who is connected and the recent chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub meeting_id: MeetingId,
    pub participants: Vec<Participant>,
    pub messages: VecDeque<ChatMessage>,
    participant_capacity: usize,
    message_capacity: usize,
}

impl Room {
    pub fn new(meeting_id: MeetingId) -> Self {
        Self::with_capacity(
            meeting_id,
            DEFAULT_PARTICIPANT_CAPACITY,
            DEFAULT_MESSAGE_CAPACITY,
        )
    }

    pub fn with_capacity(
        meeting_id: MeetingId,
        participant_capacity: usize,
        message_capacity: usize,
    ) -> Self {
        Self {
            meeting_id,
            participants: Vec::new(),
            messages: VecDeque::new(),
            participant_capacity,
            message_capacity,
        }
    }

    /// Add a participant, replacing an existing entry for the same session.
    ///
    /// # Errors
    ///
    /// `RoomCapacityExceeded` when a new session would exceed the capacity.
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), RepositoryError> {
        if let Some(existing) = self
            .participants
            .iter_mut()
            .find(|p| p.session_id == participant.session_id)
        {
            *existing = participant;
            return Ok(());
        }

        if self.participants.len() >= self.participant_capacity {
            return Err(RepositoryError::RoomCapacityExceeded);
        }

        self.participants.push(participant);
        Ok(())
    }

    pub fn remove_participant(&mut self, session_id: &SessionId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.session_id == session_id)?;
        Some(self.participants.remove(index))
    }

    pub fn find_participant(&self, session_id: &SessionId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.session_id == session_id)
    }

    /// Switch a participant's camera or microphone flag
    pub fn set_media(
        &mut self,
        session_id: &SessionId,
        kind: MediaKind,
        on: bool,
    ) -> Option<&Participant> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.session_id == session_id)?;
        participant.set_media(kind, on);
        Some(participant)
    }

    /// Append to the chat history, dropping the oldest message when full
    pub fn add_message(&mut self, message: ChatMessage) {
        if self.message_capacity == 0 {
            return;
        }
        while self.messages.len() >= self.message_capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingRole {
    Host,
    Participant,
}

impl MeetingRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Participant => "participant",
        }
    }
}

/// A meeting a user hosted or joined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingHistoryEntry {
    pub user_id: UserId,
    pub meeting_id: MeetingId,
    pub role: MeetingRole,
    pub meeting_title: MeetingTitle,
    pub host_name: UserName,
    pub joined_at: Timestamp,
}

/// Per-user dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeetingStats {
    pub created: usize,
    pub joined: usize,
    pub scheduled: usize,
}
