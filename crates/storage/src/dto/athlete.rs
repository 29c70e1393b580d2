use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Athlete;

/// Public athlete profile. The stored credential is never part of it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub athlete_id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub gym_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request payload for registering a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "First name must be between 1 and 255 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Last name must be between 1 and 255 characters"
    ))]
    pub last_name: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,

    #[validate(range(min = 1))]
    pub gym_id: Option<i32>,
}

/// Request payload for updating an existing athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[validate(length(min = 3, max = 50))]
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,

    #[validate(range(min = 1))]
    pub gym_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthorizeRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorizeResponse {
    pub authorized: bool,
    pub athlete_id: i32,
}

/// Directed follow edge to create
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FollowRequest {
    #[validate(range(min = 1, message = "follower_id is required"))]
    pub follower_id: i32,

    #[validate(range(min = 1, message = "followed_id is required"))]
    pub followed_id: i32,
}

// Usernames end up in URLs (`/by-username/:username`)
fn validate_username(username: &str) -> Result<(), validator::ValidationError> {
    let valid = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_username"))
    }
}

impl From<Athlete> for AthleteResponse {
    fn from(athlete: Athlete) -> Self {
        Self {
            athlete_id: athlete.athlete_id,
            username: athlete.username,
            first_name: athlete.first_name,
            last_name: athlete.last_name,
            email: athlete.email,
            birth_date: athlete.birth_date,
            gym_id: athlete.gym_id,
            created_at: athlete.created_at,
            updated_at: athlete.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateAthleteRequest {
        CreateAthleteRequest {
            username: "kano_j".to_string(),
            first_name: "Jigoro".to_string(),
            last_name: "Kano".to_string(),
            email: "kano@kodokan.jp".to_string(),
            birth_date: None,
            password: "seiryoku-zenyo".to_string(),
            gym_id: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_username_rejects_path_characters() {
        let mut req = request();
        req.username = "kano/j".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn test_short_password_is_rejected() {
        let mut req = request();
        req.password = "short".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_follow_requires_both_ids() {
        let req = FollowRequest {
            follower_id: 0,
            followed_id: 4,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("follower_id"));
    }
}
