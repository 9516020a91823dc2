use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, ClubRepository, EventRepository, JobRepository, Notifier, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub club_repo: Arc<dyn ClubRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth_service: Arc<AuthService>,
    pub notifier: Arc<dyn Notifier>,
    pub templates: Arc<Tera>,
}
