//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{MeetingTitle, UserId, UserName},
    infrastructure::dto::{
        conversion::meeting_detail_dto,
        http::{
            ErrorResponseDto, HistoryEntryDto, HistoryResponseDto, JoinMeetingRequest,
            MeetingDetailDto, MeetingDto, ScheduleMeetingRequest, StartMeetingRequest, StatsDto,
        },
    },
    ui::state::AppState,
    usecase::{ResolveMeetingError, StartMeetingError},
};

type ApiError = (StatusCode, Json<ErrorResponseDto>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponseDto {
            error: message.into(),
        }),
    )
}

fn bad_request(message: impl Into<String>) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, message)
}

// String -> Domain Model
fn parse_user(user_id: String, user_name: String) -> Result<(UserId, UserName), ApiError> {
    let user_id = UserId::new(user_id).map_err(|e| bad_request(e.to_string()))?;
    let user_name = UserName::new(user_name).map_err(|e| bad_request(e.to_string()))?;
    Ok((user_id, user_name))
}

fn start_error(e: StartMeetingError) -> ApiError {
    tracing::error!("Failed to create meeting: {}", e);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn resolve_error(e: ResolveMeetingError) -> ApiError {
    match e {
        ResolveMeetingError::InvalidMeetingId => bad_request(e.to_string()),
        ResolveMeetingError::MeetingNotFound(_) => api_error(StatusCode::NOT_FOUND, e.to_string()),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Start an active meeting hosted by the caller
pub async fn start_meeting(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartMeetingRequest>,
) -> Result<(StatusCode, Json<MeetingDto>), ApiError> {
    let (user_id, user_name) = parse_user(request.user_id, request.user_name)?;

    let meeting = state
        .start_meeting_usecase
        .start(user_id, user_name)
        .await
        .map_err(start_error)?;

    Ok((StatusCode::CREATED, Json(MeetingDto::from(&meeting))))
}

pub async fn schedule_meeting(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScheduleMeetingRequest>,
) -> Result<(StatusCode, Json<MeetingDto>), ApiError> {
    let (user_id, user_name) = parse_user(request.user_id, request.user_name)?;
    let title = MeetingTitle::new(request.title)
        .map_err(|_| bad_request("Please enter a meeting title"))?;

    let meeting = state
        .start_meeting_usecase
        .schedule(user_id, user_name, title, request.datetime)
        .await
        .map_err(start_error)?;

    Ok((StatusCode::CREATED, Json(MeetingDto::from(&meeting))))
}

/// Validate a user-entered meeting ID and record the visit
pub async fn join_meeting(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JoinMeetingRequest>,
) -> Result<Json<MeetingDto>, ApiError> {
    let user_id = UserId::new(request.user_id).map_err(|e| bad_request(e.to_string()))?;
    if request.meeting_id.trim().is_empty() {
        return Err(bad_request("Please enter a meeting ID"));
    }

    let meeting = state
        .resolve_meeting_usecase
        .join(user_id, &request.meeting_id)
        .await
        .map_err(resolve_error)?;

    Ok(Json(MeetingDto::from(&meeting)))
}

pub async fn get_meeting_detail(
    State(state): State<Arc<AppState>>,
    Path(meeting_id): Path<String>,
) -> Result<Json<MeetingDetailDto>, ApiError> {
    let (meeting, participants) = state
        .resolve_meeting_usecase
        .detail(&meeting_id)
        .await
        .map_err(resolve_error)?;

    // Domain Model から DTO への変換
    Ok(Json(meeting_detail_dto(&meeting, &participants)))
}

pub async fn get_user_history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<HistoryResponseDto>, ApiError> {
    let user_id = UserId::new(user_id).map_err(|e| bad_request(e.to_string()))?;

    let history = state.meeting_history_usecase.history(&user_id).await;

    Ok(Json(HistoryResponseDto {
        history: history.into_iter().map(HistoryEntryDto::from).collect(),
    }))
}

pub async fn get_user_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<StatsDto>, ApiError> {
    let user_id = UserId::new(user_id).map_err(|e| bad_request(e.to_string()))?;

    let stats = state.meeting_history_usecase.stats(&user_id).await;

    Ok(Json(StatsDto::from(stats)))
}
