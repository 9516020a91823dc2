use crate::domain::models::{
    auth::RefreshTokenRecord, club::Club, event::Event, job::Job, user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ClubRepository: Send + Sync {
    async fn create(&self, club: &Club) -> Result<Club, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Club>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    /// Compare-and-set decision write: applies the event's workflow fields
    /// only if the stored row still carries `expected_version`. A stale
    /// version on a live row is a `Conflict`.
    async fn update_decision(&self, event: &Event, expected_version: i64) -> Result<Event, AppError>;
    async fn list_by_club(&self, club_id: &str) -> Result<Vec<Event>, AppError>;
    async fn list_pending_faculty(&self, faculty_id: &str) -> Result<Vec<Event>, AppError>;
    async fn list_pending_venue(&self) -> Result<Vec<Event>, AppError>;
    async fn list_pending_hod(&self, department: &str) -> Result<Vec<Event>, AppError>;
    async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Event>, AppError>;
    async fn list_decided_by_department(&self, department: &str) -> Result<Vec<Event>, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    async fn find_pending(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
}

/// External notification channel, informed after every successful transition.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(&self, channel: &str, subject: &str, body: &str) -> Result<(), AppError>;
}
