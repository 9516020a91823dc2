pub mod sqlite_club_repo;
pub mod sqlite_user_repo;
pub mod sqlite_event_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_job_repo;

pub mod postgres_club_repo;
pub mod postgres_user_repo;
pub mod postgres_event_repo;
pub mod postgres_auth_repo;
pub mod postgres_job_repo;
