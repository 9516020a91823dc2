//! The event approval engine.
//!
//! Events move through an ordered sign-off chain: faculty coordinator first,
//! then the venue coordinator and the HOD in either order; the second of the
//! two promotes the event to `final_approved`. Rejection is available from
//! any non-terminal state and is irreversible.
//!
//! The functions here are pure: handlers load the event, authorize the actor,
//! apply a transition and write the result back under the event's version
//! token. The engine never reads ambient state and never touches the event's
//! descriptive or schedule fields.

use chrono::{DateTime, Utc};

use crate::domain::models::club::Club;
use crate::domain::models::event::{ApprovalStatus, Event};
use crate::domain::models::user::{Role, User};
use crate::error::AppError;

/// One role's sign-off step in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Faculty,
    Venue,
    Hod,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Faculty => "faculty",
            Stage::Venue => "venue",
            Stage::Hod => "hod",
        }
    }
}

/// Capability check: right role, right organizational scope.
///
/// Evaluated together with the state check in [`approve`]/[`reject`] so that
/// an approver cannot act out of turn or outside their scope.
pub fn authorize(stage: Stage, actor: &User, club: &Club) -> Result<(), AppError> {
    let allowed = match stage {
        Stage::Faculty => actor.role == Role::Faculty && club.faculty_id == actor.id,
        // Venue coordinators act campus-wide.
        Stage::Venue => actor.role == Role::VenueCoordinator,
        Stage::Hod => actor.role == Role::Hod && club.department == actor.department,
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Actor is not the {} approver for this event",
            stage.as_str()
        )))
    }
}

/// Apply the given stage's approval to the event.
pub fn approve(stage: Stage, event: &mut Event) -> Result<(), AppError> {
    match stage {
        Stage::Faculty => {
            if event.status != ApprovalStatus::Pending {
                return Err(invalid(event, "faculty approval requires a pending event"));
            }
            event.status = ApprovalStatus::FacultyApproved;
            event.approved_by_faculty = true;
        }
        Stage::Venue => {
            let faculty_cleared = matches!(
                event.status,
                ApprovalStatus::FacultyApproved | ApprovalStatus::HodApproved
            );
            if !faculty_cleared {
                return Err(invalid(event, "venue approval requires faculty sign-off first"));
            }
            if event.approved_by_venue {
                return Err(invalid(event, "venue approval already granted"));
            }
            event.approved_by_venue = true;
            if event.status == ApprovalStatus::HodApproved {
                event.status = ApprovalStatus::FinalApproved;
            }
        }
        Stage::Hod => {
            if event.status != ApprovalStatus::FacultyApproved {
                return Err(invalid(event, "HOD approval requires faculty sign-off first"));
            }
            event.status = if event.approved_by_venue {
                ApprovalStatus::FinalApproved
            } else {
                ApprovalStatus::HodApproved
            };
        }
    }
    Ok(())
}

/// Reject the event with a reason. Legal from any non-terminal state.
pub fn reject(event: &mut Event, reason: &str) -> Result<(), AppError> {
    if event.status.is_terminal() {
        return Err(invalid(event, "event already decided"));
    }

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::Validation("Rejection reason must not be empty".into()));
    }

    event.status = ApprovalStatus::Rejected;
    event.rejection_reason = Some(reason.to_string());
    Ok(())
}

/// Eligible for the public events listing.
pub fn is_publishable(event: &Event) -> bool {
    event.status == ApprovalStatus::FinalApproved
        && event.approved_by_faculty
        && event.approved_by_venue
}

pub fn is_upcoming(event: &Event, now: DateTime<Utc>) -> bool {
    is_publishable(event) && event.starts_at > now
}

fn invalid(event: &Event, msg: &str) -> AppError {
    AppError::InvalidTransition(format!("{} (current status: {})", msg, event.status.as_str()))
}
