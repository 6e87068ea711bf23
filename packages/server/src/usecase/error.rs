//! UseCase error types.

use thiserror::Error;

use crate::domain::RepositoryError;

/// Joining a meeting room over the real-time channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinMeetingError {
    #[error("Meeting '{0}' not found or has ended")]
    MeetingNotFound(String),

    #[error("Meeting is full")]
    RoomCapacityExceeded,
}

/// Actions that require the session to be in the meeting room
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParticipationError {
    #[error("Not a participant of meeting '{0}'")]
    NotInMeeting(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartMeetingError {
    #[error("Could not allocate a meeting ID")]
    IdAllocationFailed,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Looking up a meeting from a user-entered ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveMeetingError {
    #[error("Meeting ID must be 10 digits")]
    InvalidMeetingId,

    #[error("Meeting '{0}' not found or has ended")]
    MeetingNotFound(String),
}
