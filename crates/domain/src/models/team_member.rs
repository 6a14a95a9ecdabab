//! Organizing team member models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageParams;
use uuid::Uuid;
use validator::Validate;

/// A member of the organizing team shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub full_name: String,
    pub position: String,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub image_url: Option<String>,
    pub is_visible: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for adding a team member.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be between 1 and 100 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub full_name: String,

    #[validate(length(min = 1, max = 100, message = "Position must be between 1 and 100 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub position: String,

    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,

    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub linkedin_url: Option<String>,

    #[serde(default = "default_visible")]
    pub is_visible: bool,

    #[validate(range(min = 0, max = 10000, message = "Display order must be between 0 and 10000"))]
    #[serde(default)]
    pub display_order: i32,
}

fn default_visible() -> bool {
    true
}

/// Request payload for updating a team member. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be between 1 and 100 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub full_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Position must be between 1 and 100 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub position: Option<String>,

    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,

    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub linkedin_url: Option<String>,

    pub is_visible: Option<bool>,

    #[validate(range(min = 0, max = 10000, message = "Display order must be between 0 and 10000"))]
    pub display_order: Option<i32>,
}

/// Response for the visibility toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityResponse {
    pub id: Uuid,
    pub is_visible: bool,
}

/// Query parameters for the admin team listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamQuery {
    pub department: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListTeamQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}
