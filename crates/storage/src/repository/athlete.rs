use sqlx::{PgConnection, PgPool};

use crate::dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest};
use crate::error::{Result, StorageError};
use crate::models::{Athlete, Follow};
use crate::repository::record::RecordRepository;

const ATHLETE_COLUMNS: &str = r#"
    athlete_id, username, first_name, last_name, email, birth_date,
    password_hash, gym_id, created_at, updated_at
"#;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all athletes
    pub async fn list(&self) -> Result<Vec<Athlete>> {
        let athletes = sqlx::query_as::<_, Athlete>(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athlete ORDER BY last_name, first_name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(athletes)
    }

    /// Find athlete by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Athlete> {
        let athlete = sqlx::query_as::<_, Athlete>(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athlete WHERE athlete_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Find athlete by username
    pub async fn find_by_username(&self, username: &str) -> Result<Athlete> {
        let athlete = sqlx::query_as::<_, Athlete>(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athlete WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    pub async fn list_usernames(&self) -> Result<Vec<String>> {
        let usernames = sqlx::query_scalar::<_, String>(
            "SELECT username FROM athlete ORDER BY username",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(usernames)
    }

    /// Create a new athlete together with an empty win/loss record, on the
    /// caller's transaction.
    pub async fn create(
        conn: &mut PgConnection,
        req: &CreateAthleteRequest,
        password_hash: &str,
    ) -> Result<Athlete> {

        let athlete = sqlx::query_as::<_, Athlete>(&format!(
            r#"
            INSERT INTO athlete (username, first_name, last_name, email, birth_date, password_hash, gym_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ATHLETE_COLUMNS}
            "#
        ))
        .bind(&req.username)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(req.birth_date)
        .bind(password_hash)
        .bind(req.gym_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| StorageError::from(e).on_insert("username"))?;

        RecordRepository::create(conn, athlete.athlete_id).await?;

        Ok(athlete)
    }

    /// Update an existing athlete. `password_hash` replaces the stored
    /// credential when set.
    pub async fn update(
        &self,
        existing: &Athlete,
        req: &UpdateAthleteRequest,
        password_hash: Option<&str>,
    ) -> Result<Athlete> {
        let username = req.username.as_ref().unwrap_or(&existing.username);
        let first_name = req.first_name.as_ref().unwrap_or(&existing.first_name);
        let last_name = req.last_name.as_ref().unwrap_or(&existing.last_name);
        let email = req.email.as_ref().unwrap_or(&existing.email);
        let birth_date = req.birth_date.or(existing.birth_date);
        let gym_id = req.gym_id.or(existing.gym_id);
        let password_hash = password_hash.unwrap_or(&existing.password_hash);

        let athlete = sqlx::query_as::<_, Athlete>(&format!(
            r#"
            UPDATE athlete
            SET username = $2,
                first_name = $3,
                last_name = $4,
                email = $5,
                birth_date = $6,
                password_hash = $7,
                gym_id = $8,
                updated_at = CURRENT_TIMESTAMP
            WHERE athlete_id = $1
            RETURNING {ATHLETE_COLUMNS}
            "#
        ))
        .bind(existing.athlete_id)
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(birth_date)
        .bind(password_hash)
        .bind(gym_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_insert("username"))?
        .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Delete an athlete by ID
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM athlete WHERE athlete_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_delete("athlete"))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Follow another athlete. Following twice keeps the original edge.
    pub async fn follow(&self, follower_id: i32, followed_id: i32) -> Result<Follow> {
        if follower_id == followed_id {
            return Err(StorageError::Validation(
                "athletes cannot follow themselves".to_string(),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO following (follower_id, followed_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_insert("follow"))?;

        let follow = sqlx::query_as::<_, Follow>(
            r#"
            SELECT follower_id, followed_id, created_at
            FROM following
            WHERE follower_id = $1 AND followed_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(self.pool)
        .await?;

        Ok(follow)
    }

    pub async fn unfollow(&self, follower_id: i32, followed_id: i32) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM following WHERE follower_id = $1 AND followed_id = $2",
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Ids of the athletes `follower_id` follows
    pub async fn list_followed(&self, follower_id: i32) -> Result<Vec<i32>> {
        let ids = sqlx::query_scalar::<_, i32>(
            "SELECT followed_id FROM following WHERE follower_id = $1 ORDER BY created_at",
        )
        .bind(follower_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }
}
