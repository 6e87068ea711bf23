//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use huddle_shared::protocol::ParticipantInfo;

/// `POST /api/meetings`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartMeetingRequest {
    pub user_id: String,
    pub user_name: String,
}

/// `POST /api/meetings/schedule`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleMeetingRequest {
    pub user_id: String,
    pub user_name: String,
    pub title: String,
    #[serde(default)]
    pub datetime: Option<String>,
}

/// `POST /api/meetings/join`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JoinMeetingRequest {
    pub user_id: String,
    /// As typed by the user; may contain dashes
    pub meeting_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MeetingDto {
    pub id: String,
    pub title: String,
    pub host_id: String,
    pub host_name: String,
    pub scheduled_time: Option<String>,
    pub created_at: String,
    pub status: String,
}

/// `GET /api/meetings/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MeetingDetailDto {
    #[serde(flatten)]
    pub meeting: MeetingDto,
    pub participants: Vec<ParticipantInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntryDto {
    pub meeting_id: String,
    pub role: String,
    pub meeting_title: String,
    pub host_name: String,
    pub joined_at: String,
}

/// `GET /api/users/{user_id}/history`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryResponseDto {
    pub history: Vec<HistoryEntryDto>,
}

/// `GET /api/users/{user_id}/stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatsDto {
    pub created: usize,
    pub joined: usize,
    pub scheduled: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
