//! Volunteer, press and performer applications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageParams;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Which public form an application came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationKind {
    Volunteer,
    Press,
    Performer,
}

impl ApplicationKind {
    pub const ALL: [ApplicationKind; 3] = [
        ApplicationKind::Volunteer,
        ApplicationKind::Press,
        ApplicationKind::Performer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationKind::Volunteer => "volunteer",
            ApplicationKind::Press => "press",
            ApplicationKind::Performer => "performer",
        }
    }
}

impl FromStr for ApplicationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "volunteer" => Ok(ApplicationKind::Volunteer),
            "press" => Ok(ApplicationKind::Press),
            "performer" => Ok(ApplicationKind::Performer),
            _ => Err(format!("Unknown application form: {}", s)),
        }
    }
}

impl fmt::Display for ApplicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Received,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Received => "received",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub kind: ApplicationKind,
    pub full_name: String,
    pub email: String,
    pub answers: serde_json::Value,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response after submitting a form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationResponse {
    pub id: Uuid,
    pub kind: ApplicationKind,
    pub status: ApplicationStatus,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

/// Query parameters for the admin application listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApplicationsQuery {
    pub kind: Option<ApplicationKind>,
    pub status: Option<ApplicationStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListApplicationsQuery {
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
    fn test_kind_parse() {
        assert_eq!(
            "Press".parse::<ApplicationKind>().unwrap(),
            ApplicationKind::Press
        );
        assert!("sponsor".parse::<ApplicationKind>().is_err());
        for kind in ApplicationKind::ALL {
            assert_eq!(kind.as_str().parse::<ApplicationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_status_deserialize() {
        let req: UpdateApplicationStatusRequest =
            serde_json::from_value(serde_json::json!({ "status": "accepted" })).unwrap();
        assert_eq!(req.status, ApplicationStatus::Accepted);
    }
}
