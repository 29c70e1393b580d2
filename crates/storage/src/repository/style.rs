use sqlx::{PgConnection, PgPool};

use crate::dto::style::CreateStyleRequest;
use crate::error::{Result, StorageError};
use crate::models::Style;

pub struct StyleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StyleRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Style>> {
        let styles = sqlx::query_as::<_, Style>(
            "SELECT style_id, style_name FROM style ORDER BY style_name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(styles)
    }

    pub async fn create(&self, req: &CreateStyleRequest) -> Result<Style> {
        let style = sqlx::query_as::<_, Style>(
            r#"
            INSERT INTO style (style_name)
            VALUES ($1)
            RETURNING style_id, style_name
            "#,
        )
        .bind(req.style_name.trim())
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_insert("style"))?;

        Ok(style)
    }

    /// Styles both athletes are registered to
    pub async fn common_styles(&self, athlete_id: i32, other_id: i32) -> Result<Vec<Style>> {
        let styles = sqlx::query_as::<_, Style>(
            r#"
            SELECT s.style_id, s.style_name
            FROM style s
            JOIN athlete_style mine ON mine.style_id = s.style_id AND mine.athlete_id = $1
            JOIN athlete_style theirs ON theirs.style_id = s.style_id AND theirs.athlete_id = $2
            ORDER BY s.style_name
            "#,
        )
        .bind(athlete_id)
        .bind(other_id)
        .fetch_all(self.pool)
        .await?;

        Ok(styles)
    }

    /// Record the registration; returns `false` if the pair was already registered.
    pub async fn register(conn: &mut PgConnection, athlete_id: i32, style_id: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO athlete_style (athlete_id, style_id)
            VALUES ($1, $2)
            ON CONFLICT (athlete_id, style_id) DO NOTHING
            "#,
        )
        .bind(athlete_id)
        .bind(style_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| StorageError::from(e).on_insert("style registration"))?;

        Ok(result.rows_affected() == 1)
    }
}
