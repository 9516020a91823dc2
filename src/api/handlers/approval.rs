use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{DecisionAction, DecisionRequest};
use crate::domain::models::{event::{ApprovalStatus, Event}, job::Job, user::{Role, User}};
use crate::domain::services::approval::{self, Stage};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{error, info};

pub async fn faculty_decision(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<DecisionRequest>,
) -> Result<impl IntoResponse, AppError> {
    decide(&state, user, &event_id, Stage::Faculty, payload).await
}

pub async fn venue_decision(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<DecisionRequest>,
) -> Result<impl IntoResponse, AppError> {
    decide(&state, user, &event_id, Stage::Venue, payload).await
}

pub async fn hod_decision(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<DecisionRequest>,
) -> Result<impl IntoResponse, AppError> {
    decide(&state, user, &event_id, Stage::Hod, payload).await
}

/// The "pending approvals" table for whichever approver role is asking.
pub async fn list_pending(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let events = match user.role {
        Role::Faculty => state.event_repo.list_pending_faculty(&user.id).await?,
        Role::VenueCoordinator => state.event_repo.list_pending_venue().await?,
        Role::Hod => state.event_repo.list_pending_hod(&user.department).await?,
        Role::President => {
            return Err(AppError::Forbidden("Presidents have no approval queue".into()));
        }
    };

    Ok(Json(events))
}

/// Shared decision path: load, authorize, transition, versioned write, notify.
async fn decide(
    state: &Arc<AppState>,
    actor: User,
    event_id: &str,
    stage: Stage,
    payload: DecisionRequest,
) -> Result<Json<Event>, AppError> {
    let mut event = state.event_repo.find_by_id(event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    let club = state.club_repo.find_by_id(&event.club_id).await?
        .ok_or(AppError::NotFound("Club not found".into()))?;

    approval::authorize(stage, &actor, &club)?;

    let expected_version = event.version;
    match payload.action {
        DecisionAction::Approve => approval::approve(stage, &mut event)?,
        DecisionAction::Reject => {
            approval::reject(&mut event, payload.reason.as_deref().unwrap_or(""))?;
        }
    }

    let updated = state.event_repo.update_decision(&event, expected_version).await?;

    info!(
        "Event {} {} by {} ({}): status now {}",
        updated.id,
        match payload.action {
            DecisionAction::Approve => "approved",
            DecisionAction::Reject => "rejected",
        },
        actor.id,
        stage.as_str(),
        updated.status.as_str()
    );

    let job = Job::new(
        transition_label(stage, payload.action, updated.status),
        updated.id.clone(),
        club.id.clone(),
        Utc::now(),
    );
    if let Err(e) = state.job_repo.create(&job).await {
        // The decision is already committed; a lost notification must not
        // fail the request.
        error!("Failed to enqueue notification job for event {}: {:?}", updated.id, e);
    }

    Ok(Json(updated))
}

fn transition_label(stage: Stage, action: DecisionAction, resulting: ApprovalStatus) -> &'static str {
    if action == DecisionAction::Reject {
        return "REJECTED";
    }
    if resulting == ApprovalStatus::FinalApproved {
        return "FINAL_APPROVED";
    }
    match stage {
        Stage::Faculty => "FACULTY_APPROVED",
        Stage::Venue => "VENUE_APPROVED",
        Stage::Hod => "HOD_APPROVED",
    }
}
