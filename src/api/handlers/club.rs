use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::CreateClubRequest, responses::ClubCreatedResponse};
use crate::api::handlers::staff::generate_secret;
use crate::domain::models::{club::Club, user::{Role, User}};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_club(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateClubRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Club name must not be empty".into()));
    }

    let faculty = state.user_repo.find_by_id(&payload.faculty_id).await?
        .ok_or(AppError::NotFound("Faculty coordinator not found".into()))?;
    if faculty.role != Role::Faculty {
        return Err(AppError::Validation("Assigned coordinator must have the faculty role".into()));
    }

    let club = Club::new(payload.name, payload.department, faculty.id);
    let created_club = state.club_repo.create(&club).await?;

    info!("Club created: {}", created_club.id);

    let (president_password, password_hash) = generate_secret()?;

    let president = User::new(
        payload.president_username,
        password_hash,
        Role::President,
        created_club.department.clone(),
        Some(created_club.id.clone()),
    );
    let president = state.user_repo.create(&president).await?;

    Ok(Json(ClubCreatedResponse {
        club_id: created_club.id,
        president_username: president.username,
        president_secret: president_password,
    }))
}

pub async fn get_club(
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let club = state.club_repo.find_by_id(&club_id).await?
        .ok_or(AppError::NotFound("Club not found".into()))?;

    Ok(Json(club))
}
