use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::api::dtos::requests::CreateEventRequest;
use crate::domain::models::{event::Event, user::Role};
use crate::domain::services::approval;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if user.role != Role::President {
        return Err(AppError::Forbidden("Only club presidents can create events".into()));
    }
    let club_id = user.club_id
        .ok_or(AppError::Forbidden("Actor is not attached to a club".into()))?;

    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".into()));
    }
    if payload.ends_at <= payload.starts_at {
        return Err(AppError::Validation("End time must be after start time".into()));
    }

    let event = Event::new(
        club_id.clone(),
        payload.title,
        payload.description,
        payload.category,
        payload.venue,
        payload.building,
        payload.starts_at,
        payload.ends_at,
    );

    let created = state.event_repo.create(&event).await?;
    info!("Event created: {} for club: {}", created.id, club_id);

    Ok(Json(created))
}

/// The club's own submissions, including rejected ones with their reason.
pub async fn list_my_events(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if user.role != Role::President {
        return Err(AppError::Forbidden("Only club presidents have a submissions list".into()));
    }
    let club_id = user.club_id
        .ok_or(AppError::Forbidden("Actor is not attached to a club".into()))?;

    let events = state.event_repo.list_by_club(&club_id).await?;
    Ok(Json(events))
}

/// Public feed of fully approved, future events.
pub async fn list_upcoming(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_upcoming(Utc::now()).await?;
    Ok(Json(events))
}

/// Decided events (final or rejected) of the HOD's department.
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if user.role != Role::Hod {
        return Err(AppError::Forbidden("History is scoped to department HODs".into()));
    }

    let events = state.event_repo.list_decided_by_department(&user.department).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", event_id)))?;

    match maybe_user {
        Some(_) => Ok(Json(event)),
        None => {
            // Guests only ever see published events; everything else is
            // indistinguishable from a missing record.
            if approval::is_publishable(&event) {
                Ok(Json(event))
            } else {
                Err(AppError::NotFound(format!("Event '{}' not found", event_id)))
            }
        }
    }
}
