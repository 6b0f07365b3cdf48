//! Plan coverage reporting.
//!
//! The allocator fulfills topics partially and silently when slots run
//! out. This module compares a produced plan against the requested
//! topics so callers can detect under-allocation.

use serde::{Deserialize, Serialize};

use crate::session::ProposedSession;
use crate::topic::Topic;

/// Scheduled-versus-required minutes for a single topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCoverage {
    /// Topic identifier
    pub topic_id: String,
    /// Topic title
    pub title: String,
    /// Minutes the topic asked for
    pub required_minutes: i64,
    /// Minutes the plan actually allocated
    pub scheduled_minutes: i64,
    /// Number of sessions allocated to the topic
    pub session_count: usize,
}

impl TopicCoverage {
    /// Minutes still unscheduled for this topic.
    pub fn shortfall_minutes(&self) -> i64 {
        (self.required_minutes - self.scheduled_minutes).max(0)
    }

    /// Whether the topic received everything it asked for.
    pub fn is_fully_scheduled(&self) -> bool {
        self.scheduled_minutes >= self.required_minutes
    }

    /// Fulfillment ratio (0.0-1.0).
    pub fn fulfillment(&self) -> f64 {
        if self.required_minutes <= 0 {
            return 1.0;
        }
        (self.scheduled_minutes as f64 / self.required_minutes as f64).min(1.0)
    }
}

/// Summarize a plan per schedulable topic, in topic input order.
pub fn summarize_plan(topics: &[Topic], sessions: &[ProposedSession]) -> Vec<TopicCoverage> {
    topics
        .iter()
        .filter(|t| t.status.is_schedulable())
        .map(|topic| {
            let allocated: Vec<&ProposedSession> = sessions
                .iter()
                .filter(|s| s.topic_id == topic.id)
                .collect();

            TopicCoverage {
                topic_id: topic.id.clone(),
                title: topic.title.clone(),
                required_minutes: topic.required_minutes(),
                scheduled_minutes: allocated.iter().map(|s| s.duration_minutes()).sum(),
                session_count: allocated.len(),
            }
        })
        .collect()
}
