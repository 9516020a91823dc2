use crate::domain::{models::club::Club, ports::ClubRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteClubRepo {
    pool: SqlitePool,
}

impl SqliteClubRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubRepository for SqliteClubRepo {
    async fn create(&self, club: &Club) -> Result<Club, AppError> {
        sqlx::query_as::<_, Club>(
            "INSERT INTO clubs (id, name, department, faculty_id, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&club.id)
            .bind(&club.name)
            .bind(&club.department)
            .bind(&club.faculty_id)
            .bind(club.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Club>, AppError> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
