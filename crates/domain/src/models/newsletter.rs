//! Newsletter subscription models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageParams;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Unsubscribed,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Unsubscribed => "unsubscribed",
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(SubscriptionStatus::Active),
            "unsubscribed" => Ok(SubscriptionStatus::Unsubscribed),
            _ => Err(format!("Invalid subscription status: {}", s)),
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: Uuid,
    pub email: String,
    pub status: SubscriptionStatus,
    pub subscribed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for `POST /newsletter/subscribe`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,
}

/// Request payload for changing a subscription's status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionStatusRequest {
    pub status: SubscriptionStatus,
}

/// Query parameters for the admin subscription listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubscriptionsQuery {
    pub status: Option<SubscriptionStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListSubscriptionsQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_status_parse() {
        assert_eq!(
            "ACTIVE".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Active
        );
        assert!("paused".parse::<SubscriptionStatus>().is_err());
        assert_eq!(SubscriptionStatus::Unsubscribed.to_string(), "unsubscribed");
    }

    #[test]
    fn test_subscribe_request_validation() {
        let ok = SubscribeRequest {
            email: "reader@example.com".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = SubscribeRequest {
            email: "reader".to_string(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_update_status_request_rejects_unknown() {
        let result: Result<UpdateSubscriptionStatusRequest, _> =
            serde_json::from_value(serde_json::json!({ "status": "paused" }));
        assert!(result.is_err());
    }
}
