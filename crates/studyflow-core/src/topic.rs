//! Syllabus topic types.
//!
//! A topic is a unit of required study work with an estimated effort
//! and a scheduling priority. Topics come from the surrounding
//! application (which owns syllabus storage); the engine only reads
//! them.

use serde::{Deserialize, Serialize};

/// Scheduling priority for a topic.
///
/// The derived ordering is the scheduling order: `Critical` sorts
/// first and `Low` last. Ties between topics of equal priority keep
/// the caller-supplied input order (sorting is stable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Completion status of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    /// Not yet studied
    NotStarted,
    /// Partially studied
    InProgress,
    /// Fully studied (terminal)
    Completed,
    /// Deliberately dropped from the syllabus (terminal)
    Skipped,
}

impl TopicStatus {
    /// Whether a topic in this status still needs study time.
    pub fn is_schedulable(&self) -> bool {
        !matches!(self, Self::Completed | Self::Skipped)
    }
}

impl Default for TopicStatus {
    fn default() -> Self {
        TopicStatus::NotStarted
    }
}

/// A unit of syllabus work requiring study time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier
    pub id: String,
    /// Topic title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Total study effort estimate in hours
    pub estimated_hours: f64,
    /// Scheduling priority
    #[serde(default)]
    pub priority: Priority,
    /// Completion status
    #[serde(default)]
    pub status: TopicStatus,
}

impl Topic {
    /// Create a new topic with default priority and status.
    pub fn new(id: impl Into<String>, title: impl Into<String>, estimated_hours: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            estimated_hours,
            priority: Priority::default(),
            status: TopicStatus::default(),
        }
    }

    /// Total minutes the allocator must carve out for this topic.
    pub fn required_minutes(&self) -> i64 {
        (self.estimated_hours * 60.0).round() as i64
    }

    /// Set priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set status
    pub fn with_status(mut self, status: TopicStatus) -> Self {
        self.status = status;
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
