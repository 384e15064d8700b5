use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::users::UserDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateSessionDto {
    #[validate(range(min = 1))]
    pub(crate) user_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CreatedSessionDto {
    pub(crate) session_id: i64,
    pub(crate) token: String,
    pub(crate) expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ValidateSessionQuery {
    #[validate(length(min = 1))]
    pub(crate) token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SessionValidationDto {
    pub(crate) valid: bool,
    pub(crate) user: Option<UserDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CleanupSessionsDto {
    pub(crate) deleted: u64,
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "sessions",
    request_body = CreateSessionDto,
    responses(
        (status = 201, description = "Session issued", body = CreatedSessionDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_session(
    State(state): State<AppState>,
    Json(dto): Json<CreateSessionDto>,
) -> AppResult<(StatusCode, Json<CreatedSessionDto>)> {
    dto.validate()?;

    let created = state.session_service.create_session(dto.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedSessionDto {
            session_id: created.session_id,
            token: created.token,
            expires_at: created.expires_at,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/sessions/validate",
    tag = "sessions",
    params(
        ("token" = String, Query, description = "Bearer token to check")
    ),
    responses(
        (status = 200, description = "Validation outcome", body = SessionValidationDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn validate_session(
    State(state): State<AppState>,
    Query(query): Query<ValidateSessionQuery>,
) -> AppResult<(StatusCode, Json<SessionValidationDto>)> {
    query.validate()?;

    let validation = state.session_service.validate_session(&query.token).await?;
    Ok((
        StatusCode::OK,
        Json(SessionValidationDto {
            valid: validation.valid,
            user: validation.user.map(UserDto::from),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{token}",
    tag = "sessions",
    params(
        ("token" = String, Path, description = "Bearer token to revoke")
    ),
    responses(
        (status = 204, description = "Session deleted (or was never there)"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_session(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<StatusCode> {
    state.session_service.delete_session(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/sessions/cleanup",
    tag = "sessions",
    responses(
        (status = 200, description = "Expired sessions removed", body = CleanupSessionsDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn cleanup_sessions(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<CleanupSessionsDto>)> {
    let deleted = state.session_service.cleanup_expired_sessions().await?;
    Ok((StatusCode::OK, Json(CleanupSessionsDto { deleted })))
}
