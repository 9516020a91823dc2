use crate::domain::models::user::Role;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateStaffRequest {
    pub username: String,
    pub role: Role,
    pub department: String,
}

#[derive(Deserialize)]
pub struct CreateClubRequest {
    pub name: String,
    pub department: String,
    pub faculty_id: String,
    pub president_username: String,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub venue: String,
    pub building: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    Approve,
    Reject,
}

#[derive(Deserialize)]
pub struct DecisionRequest {
    pub action: DecisionAction,
    pub reason: Option<String>,
}
