//! Speaker models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub full_name: String,
    pub title: Option<String>,
    pub talk_title: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpeakerRequest {
    pub event_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "Full name must be between 1 and 100 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub full_name: String,

    #[validate(length(max = 150, message = "Title must be at most 150 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 200, message = "Talk title must be at most 200 characters"))]
    pub talk_title: Option<String>,

    #[validate(length(max = 5000, message = "Bio must be at most 5000 characters"))]
    pub bio: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpeakerRequest {
    pub event_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "Full name must be between 1 and 100 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub full_name: Option<String>,

    #[validate(length(max = 150, message = "Title must be at most 150 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 200, message = "Talk title must be at most 200 characters"))]
    pub talk_title: Option<String>,

    #[validate(length(max = 5000, message = "Bio must be at most 5000 characters"))]
    pub bio: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub image_url: Option<String>,
}

/// Query parameters for the public speaker listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSpeakersQuery {
    pub event_id: Option<Uuid>,
}
