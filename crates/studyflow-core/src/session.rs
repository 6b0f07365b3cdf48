//! Booking and proposed-session types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An existing calendar commitment the engine must schedule around.
///
/// Supplied by the caller, read-only to the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Booking {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Booking {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Check if this booking overlaps with a time range
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && self.end_time > start
    }
}

/// Kind of proposed session.
///
/// The engine only proposes study sessions; the kind is carried so the
/// record round-trips through the caller's storage unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Study,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study => "study",
        }
    }
}

impl Default for SessionKind {
    fn default() -> Self {
        SessionKind::Study
    }
}

/// A study session proposed by the allocator.
///
/// Created purely in memory. Assigning an identity and writing the
/// session to storage is the caller's responsibility, not the
/// engine's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedSession {
    pub title: String,
    pub description: Option<String>,
    pub subject_id: String,
    pub syllabus_id: String,
    pub topic_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub kind: SessionKind,
}

impl ProposedSession {
    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Check if this session overlaps with a time range
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && self.end_time > start
    }
}
