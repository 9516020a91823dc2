use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Closed set of actor roles. The Dean stage of the original sign-off chain
/// is intentionally not modeled, so it cannot be introduced silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum Role {
    President,
    Faculty,
    VenueCoordinator,
    Hod,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::President => "president",
            Role::Faculty => "faculty",
            Role::VenueCoordinator => "venue_coordinator",
            Role::Hod => "hod",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub department: String,
    /// Presidents belong to the club they run; staff roles carry no club.
    pub club_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: String,
        password_hash: String,
        role: Role,
        department: String,
        club_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            role,
            department,
            club_id,
            created_at: Utc::now(),
        }
    }
}
