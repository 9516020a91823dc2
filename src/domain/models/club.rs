use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub department: String,
    /// Faculty coordinator assigned to sign off this club's events.
    pub faculty_id: String,
    pub created_at: DateTime<Utc>,
}

impl Club {
    pub fn new(name: String, department: String, faculty_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            department,
            faculty_id,
            created_at: Utc::now(),
        }
    }
}
