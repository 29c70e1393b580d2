use chrono::{NaiveDate, NaiveDateTime};
use sqlx::FromRow;

/// Athlete row. Carries the stored credential, so it is never serialized
/// directly; responses go through `dto::athlete::AthleteResponse`.
#[derive(Debug, Clone, FromRow)]
pub struct Athlete {
    pub athlete_id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub password_hash: String,
    pub gym_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
