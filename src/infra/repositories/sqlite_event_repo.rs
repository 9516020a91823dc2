use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                id, club_id, title, description, category, venue, building,
                starts_at, ends_at, status, approved_by_faculty, approved_by_venue,
                rejection_reason, version, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&event.id)
            .bind(&event.club_id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.category)
            .bind(&event.venue)
            .bind(&event.building)
            .bind(event.starts_at)
            .bind(event.ends_at)
            .bind(event.status)
            .bind(event.approved_by_faculty)
            .bind(event.approved_by_venue)
            .bind(&event.rejection_reason)
            .bind(event.version)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_decision(&self, event: &Event, expected_version: i64) -> Result<Event, AppError> {
        let updated = sqlx::query_as::<_, Event>(
            r#"UPDATE events SET
                status = ?, approved_by_faculty = ?, approved_by_venue = ?,
                rejection_reason = ?, version = ?
               WHERE id = ? AND version = ? RETURNING *"#
        )
            .bind(event.status)
            .bind(event.approved_by_faculty)
            .bind(event.approved_by_venue)
            .bind(&event.rejection_reason)
            .bind(expected_version + 1)
            .bind(&event.id)
            .bind(expected_version)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        match updated {
            Some(ev) => Ok(ev),
            None => {
                let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE id = ?")
                    .bind(&event.id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(AppError::Database)?;

                if exists > 0 {
                    Err(AppError::Conflict("Event was modified by another approver".into()))
                } else {
                    Err(AppError::NotFound("Event not found".into()))
                }
            }
        }
    }

    async fn list_by_club(&self, club_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE club_id = ? ORDER BY created_at DESC"
        )
            .bind(club_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_pending_faculty(&self, faculty_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            r#"SELECT e.* FROM events e
               JOIN clubs c ON c.id = e.club_id
               WHERE e.status = 'pending' AND c.faculty_id = ?
               ORDER BY e.created_at ASC"#
        )
            .bind(faculty_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_pending_venue(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            r#"SELECT * FROM events
               WHERE status IN ('faculty_approved', 'hod_approved')
                 AND approved_by_venue = FALSE
               ORDER BY created_at ASC"#
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_pending_hod(&self, department: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            r#"SELECT e.* FROM events e
               JOIN clubs c ON c.id = e.club_id
               WHERE e.status = 'faculty_approved' AND c.department = ?
               ORDER BY e.created_at ASC"#
        )
            .bind(department)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Event>, AppError> {
        // WHERE clause is the SQL form of approval::is_upcoming; the two must
        // agree on what counts as published.
        sqlx::query_as::<_, Event>(
            r#"SELECT * FROM events
               WHERE status = 'final_approved'
                 AND approved_by_faculty = TRUE AND approved_by_venue = TRUE
                 AND starts_at > ?
               ORDER BY starts_at ASC"#
        )
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_decided_by_department(&self, department: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            r#"SELECT e.* FROM events e
               JOIN clubs c ON c.id = e.club_id
               WHERE e.status IN ('final_approved', 'rejected') AND c.department = ?
               ORDER BY e.created_at DESC"#
        )
            .bind(department)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
