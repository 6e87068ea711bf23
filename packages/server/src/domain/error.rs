//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Meeting ID must be 10 digits (got '{0}')")]
    InvalidMeetingId(String),
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Meeting '{0}' not found")]
    MeetingNotFound(String),

    #[error("Meeting '{0}' already exists")]
    DuplicateMeeting(String),

    #[error("Session '{0}' is not a participant")]
    ParticipantNotFound(String),

    #[error("Room capacity exceeded")]
    RoomCapacityExceeded,
}

/// Message push errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
