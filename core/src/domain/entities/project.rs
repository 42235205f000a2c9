//! Funding project entity swept closed once its funding period ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a funding project
///
/// The numeric codes are what the store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Awaiting review
    Pending,
    /// Accepting funding
    Open,
    /// Funding period is over
    Closed,
}

impl ProjectStatus {
    /// Persisted status code
    pub fn code(&self) -> u8 {
        match self {
            ProjectStatus::Pending => 0,
            ProjectStatus::Open => 1,
            ProjectStatus::Closed => 2,
        }
    }
}

impl TryFrom<u8> for ProjectStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ProjectStatus::Pending),
            1 => Ok(ProjectStatus::Open),
            2 => Ok(ProjectStatus::Closed),
            other => Err(format!("Unknown project status code: {}", other)),
        }
    }
}

/// Funding project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Sequential project identifier
    pub id: i64,

    /// Display title
    pub title: String,

    /// Current status
    pub status: ProjectStatus,

    /// End of the first funding period, if scheduled
    pub fund_end_date: Option<DateTime<Utc>>,

    /// Timestamp when the project was last updated
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates an open project
    pub fn new(id: i64, title: impl Into<String>, fund_end_date: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            title: title.into(),
            status: ProjectStatus::Open,
            fund_end_date,
            updated_at: Utc::now(),
        }
    }

    /// Whether the funding period ended at or before `now`
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        matches!(self.fund_end_date, Some(end) if end <= now)
    }

    /// Marks the project closed; returns `false` if it already was
    pub fn close(&mut self) -> bool {
        if self.status == ProjectStatus::Closed {
            return false;
        }
        self.status = ProjectStatus::Closed;
        self.updated_at = Utc::now();
        true
    }
}
