use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Workflow position of an event. The enum is the single source of truth;
/// the stage flags on [`Event`] are denormalized alongside it and must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "approval_status", rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    FacultyApproved,
    HodApproved,
    FinalApproved,
    Rejected,
}

impl ApprovalStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ApprovalStatus::FinalApproved | ApprovalStatus::Rejected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::FacultyApproved => "faculty_approved",
            ApprovalStatus::HodApproved => "hod_approved",
            ApprovalStatus::FinalApproved => "final_approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub club_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub venue: String,
    pub building: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: ApprovalStatus,
    pub approved_by_faculty: bool,
    pub approved_by_venue: bool,
    pub rejection_reason: Option<String>,
    /// Optimistic-concurrency token, bumped on every decision write.
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl Event {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        club_id: String,
        title: String,
        description: String,
        category: String,
        venue: String,
        building: String,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            club_id,
            title,
            description,
            category,
            venue,
            building,
            starts_at,
            ends_at,
            status: ApprovalStatus::Pending,
            approved_by_faculty: false,
            approved_by_venue: false,
            rejection_reason: None,
            version: 0,
            created_at: Utc::now(),
        }
    }
}
