//! Partner (sponsor) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Sponsorship tier, listed in this order on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerTier {
    Main,
    Gold,
    Silver,
    Community,
}

impl PartnerTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerTier::Main => "main",
            PartnerTier::Gold => "gold",
            PartnerTier::Silver => "silver",
            PartnerTier::Community => "community",
        }
    }
}

impl FromStr for PartnerTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "main" => Ok(PartnerTier::Main),
            "gold" => Ok(PartnerTier::Gold),
            "silver" => Ok(PartnerTier::Silver),
            "community" => Ok(PartnerTier::Community),
            _ => Err(format!("Invalid partner tier: {}", s)),
        }
    }
}

impl fmt::Display for PartnerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub tier: PartnerTier,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerRequest {
    #[validate(length(min = 1, max = 150, message = "Name must be between 1 and 150 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: String,

    pub tier: PartnerTier,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub website_url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub logo_url: Option<String>,

    #[validate(range(min = 0, max = 10000, message = "Display order must be between 0 and 10000"))]
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerRequest {
    #[validate(length(min = 1, max = 150, message = "Name must be between 1 and 150 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: Option<String>,

    pub tier: Option<PartnerTier>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub website_url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub logo_url: Option<String>,

    #[validate(range(min = 0, max = 10000, message = "Display order must be between 0 and 10000"))]
    pub display_order: Option<i32>,
}
