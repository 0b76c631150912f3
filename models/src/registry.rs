// models/src/registry.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SiteError;

/// A student as the intake service knows them, keyed by LRN. Re-submitting
/// with the same LRN updates the contact fields; the id is assigned once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: u64,
    pub lrn: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// One enrollment application. New applications start out `submitted` and
/// move through the review workflow via status updates only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: u64,
    pub student_lrn: String,
    pub grade_level: String,
    pub strand: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

/// The review workflow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Wire names of the allowed states, sorted, for error messages.
    pub const ALLOWED: [&'static str; 4] = ["approved", "rejected", "submitted", "under_review"];
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ApplicationStatus {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ApplicationStatus::Submitted),
            "under_review" => Ok(ApplicationStatus::UnderReview),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(SiteError::InvalidInput(format!(
                "Invalid status. Allowed: {}",
                Self::ALLOWED.join(", ")
            ))),
        }
    }
}

/// One row of the admin application listing: application fields joined with
/// the owning student's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRow {
    pub id: u64,
    pub lrn: String,
    pub full_name: String,
    pub grade_level: String,
    pub strand: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}
