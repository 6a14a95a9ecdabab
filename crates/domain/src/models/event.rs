//! Event domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A TEDx event attendees register for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub banner_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub event_date: DateTime<Utc>,

    #[validate(length(max = 300, message = "Location must be at most 300 characters"))]
    pub location: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub banner_url: Option<String>,

    #[serde(default)]
    pub is_published: bool,
}

/// Request payload for updating an event. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub event_date: Option<DateTime<Utc>>,

    #[validate(length(max = 300, message = "Location must be at most 300 characters"))]
    pub location: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub banner_url: Option<String>,

    pub is_published: Option<bool>,
}
