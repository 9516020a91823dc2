use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::CreateStaffRequest, responses::StaffCreatedResponse};
use crate::domain::models::user::{Role, User};
use crate::error::AppError;
use std::sync::Arc;
use rand::{distributions::Alphanumeric, Rng};
use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use tracing::info;

/// Provisions a staff account (faculty, venue coordinator, HOD). Presidents
/// are created together with their club, never here.
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateStaffRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.role == Role::President {
        return Err(AppError::Validation("Presidents are provisioned with their club".into()));
    }
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }

    let (password, password_hash) = generate_secret()?;

    let user = User::new(
        payload.username.clone(),
        password_hash,
        payload.role,
        payload.department,
        None,
    );
    let created = state.user_repo.create(&user).await?;

    info!("Staff account created: {} ({})", created.id, created.role.as_str());

    Ok(Json(StaffCreatedResponse {
        user_id: created.id,
        username: created.username,
        secret: password,
    }))
}

pub fn generate_secret() -> Result<(String, String), AppError> {
    let password: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();

    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    Ok((password, hash))
}
