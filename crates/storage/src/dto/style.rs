use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateStyleRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Style name must be between 1 and 100 characters"
    ))]
    pub style_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterStyleRequest {
    #[validate(range(min = 1, message = "style_id is required"))]
    pub style_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterStylesRequest {
    #[validate(length(min = 1, message = "at least one style is required"))]
    pub style_ids: Vec<i32>,
}

/// Registration of one athlete to one style
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StyleRegistration {
    pub athlete_id: i32,
    pub style_id: i32,
    /// False when the athlete was already registered to the style
    pub registered: bool,
}
