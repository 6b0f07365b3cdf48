//! Session scheduling engine.
//!
//! Two cooperating, stateless components evaluated in dependency
//! order:
//! - [`SlotFinder`] computes the free intervals inside the preferred
//!   daily study window over a rolling horizon
//! - [`SessionAllocator`] greedily carves study sessions out of those
//!   intervals for incomplete topics in priority order
//!
//! The engine is pure: bookings, topics, and options come in as
//! parameters, proposed sessions come out as values, and nothing is
//! read from the clock or written anywhere. Allocation is greedy and
//! single-pass on purpose; slots are consumed left-to-right and never
//! revisited, so a poorly fitting topic cannot give time back to an
//! earlier one.

mod coverage;
mod slots;

pub use coverage::{summarize_plan, TopicCoverage};
pub use slots::{find_free_slots, SlotFinder, TimeSlot};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::session::{ProposedSession, SessionKind};
use crate::topic::Topic;

/// Shortest session worth proposing, in minutes.
///
/// A slot sliver below this floor is abandoned rather than filled.
pub const MIN_SESSION_MINUTES: i64 = 15;

/// Scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingOptions {
    /// First hour of the daily study window (0-23)
    #[serde(default = "default_start_hour")]
    pub preferred_start_hour: u32,
    /// Hour the daily study window closes (0-23)
    #[serde(default = "default_end_hour")]
    pub preferred_end_hour: u32,
    /// Target length of one session (minutes)
    #[serde(default = "default_session_minutes")]
    pub session_minutes: i64,
    /// Minimum gap after every booking and allocated session (minutes)
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
    /// Horizon length in days, starting from the supplied horizon start
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

// Default functions
fn default_start_hour() -> u32 {
    9
}
fn default_end_hour() -> u32 {
    21
}
fn default_session_minutes() -> i64 {
    45
}
fn default_break_minutes() -> i64 {
    15
}
fn default_days_ahead() -> u32 {
    7
}

impl Default for SchedulingOptions {
    fn default() -> Self {
        Self {
            preferred_start_hour: default_start_hour(),
            preferred_end_hour: default_end_hour(),
            session_minutes: default_session_minutes(),
            break_minutes: default_break_minutes(),
            days_ahead: default_days_ahead(),
        }
    }
}

impl SchedulingOptions {
    /// Check the options before scheduling begins.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for an empty or inverted preferred
    /// window, hours outside 0-23, a non-positive session length, a
    /// negative break, or a horizon shorter than one day.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.preferred_start_hour > 23 {
            return Err(ValidationError::InvalidValue {
                field: "preferred_start_hour".to_string(),
                message: "must be between 0 and 23".to_string(),
            });
        }
        if self.preferred_end_hour > 23 {
            return Err(ValidationError::InvalidValue {
                field: "preferred_end_hour".to_string(),
                message: "must be between 0 and 23".to_string(),
            });
        }
        if self.preferred_start_hour >= self.preferred_end_hour {
            return Err(ValidationError::InvalidPreferredWindow {
                start_hour: self.preferred_start_hour,
                end_hour: self.preferred_end_hour,
            });
        }
        if self.session_minutes <= 0 {
            return Err(ValidationError::InvalidValue {
                field: "session_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.break_minutes < 0 {
            return Err(ValidationError::InvalidValue {
                field: "break_minutes".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.days_ahead < 1 {
            return Err(ValidationError::InvalidValue {
                field: "days_ahead".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Identifies the subject and syllabus the proposed sessions belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanContext {
    pub subject_id: String,
    pub syllabus_id: String,
}

impl PlanContext {
    pub fn new(subject_id: impl Into<String>, syllabus_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            syllabus_id: syllabus_id.into(),
        }
    }
}

/// Greedy allocator of free slots to syllabus topics.
pub struct SessionAllocator {
    options: SchedulingOptions,
}

impl SessionAllocator {
    /// Create an allocator from validated options.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the options are malformed.
    pub fn new(options: SchedulingOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Carve study sessions out of the free slots, topic by topic in
    /// priority order.
    ///
    /// Completed and skipped topics are ignored. Slots are consumed
    /// left-to-right by a single shared cursor and never revisited.
    /// When a slot's remainder drops below the target session length
    /// (or below [`MIN_SESSION_MINUTES`] for the current topic's
    /// remaining need), the remainder is abandoned rather than offered
    /// to a later topic.
    ///
    /// # Returns
    /// Sessions grouped by topic, time-ordered within each topic.
    /// The list is not globally re-sorted: a higher-priority topic is
    /// filled first and may still land later in the day than a
    /// lower-priority topic's leftover allocation. Callers that want
    /// display order should sort by `start_time`.
    ///
    /// Partial fulfillment is a normal, silent outcome. Compare the
    /// result against the requested topics (see
    /// [`summarize_plan`]) to detect under-allocation.
    pub fn allocate(
        &self,
        mut slots: Vec<TimeSlot>,
        topics: &[Topic],
        context: &PlanContext,
    ) -> Vec<ProposedSession> {
        if topics.is_empty() {
            return Vec::new();
        }

        let mut pending: Vec<&Topic> = topics.iter().filter(|t| t.status.is_schedulable()).collect();
        // Stable: topics of equal priority keep their input order.
        pending.sort_by_key(|t| t.priority);

        let mut sessions = Vec::new();
        let mut slot_index = 0;

        for topic in pending {
            let required_minutes = topic.required_minutes();
            let mut scheduled_minutes = 0;

            while scheduled_minutes < required_minutes && slot_index < slots.len() {
                let slot = &mut slots[slot_index];

                let session_minutes = self
                    .options
                    .session_minutes
                    .min(slot.duration_minutes())
                    .min(required_minutes - scheduled_minutes);

                if session_minutes < MIN_SESSION_MINUTES {
                    // Too small to be a meaningful session for this
                    // topic; the sliver is abandoned.
                    slot_index += 1;
                    continue;
                }

                let start_time = slot.start_time;
                let end_time = start_time + Duration::minutes(session_minutes);

                sessions.push(ProposedSession {
                    title: topic.title.clone(),
                    description: topic.description.clone(),
                    subject_id: context.subject_id.clone(),
                    syllabus_id: context.syllabus_id.clone(),
                    topic_id: topic.id.clone(),
                    start_time,
                    end_time,
                    kind: SessionKind::Study,
                });

                scheduled_minutes += session_minutes;
                slot.start_time = end_time + Duration::minutes(self.options.break_minutes);

                if slot.duration_minutes() < self.options.session_minutes {
                    slot_index += 1;
                }
            }
        }

        sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::{Priority, TopicStatus};
    use chrono::{DateTime, TimeZone, Utc};

    fn day_at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    fn context() -> PlanContext {
        PlanContext::new("math", "calc-1")
    }

    fn options(session_minutes: i64, break_minutes: i64) -> SchedulingOptions {
        SchedulingOptions {
            session_minutes,
            break_minutes,
            ..SchedulingOptions::default()
        }
    }

    #[test]
    fn test_validate_rejects_malformed_options() {
        let mut o = SchedulingOptions::default();
        o.preferred_start_hour = 12;
        o.preferred_end_hour = 12;
        assert!(o.validate().is_err());

        let mut o = SchedulingOptions::default();
        o.preferred_end_hour = 24;
        assert!(o.validate().is_err());

        let mut o = SchedulingOptions::default();
        o.session_minutes = 0;
        assert!(o.validate().is_err());

        let mut o = SchedulingOptions::default();
        o.break_minutes = -5;
        assert!(o.validate().is_err());

        let mut o = SchedulingOptions::default();
        o.days_ahead = 0;
        assert!(o.validate().is_err());

        assert!(SchedulingOptions::default().validate().is_ok());
    }

    #[test]
    fn test_empty_topics_returns_nothing() {
        let allocator = SessionAllocator::new(options(45, 15)).unwrap();
        let slots = vec![TimeSlot::new(day_at(9, 0), day_at(12, 0))];

        let sessions = allocator.allocate(slots, &[], &context());
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_completed_and_skipped_topics_ignored() {
        let allocator = SessionAllocator::new(options(45, 15)).unwrap();
        let slots = vec![TimeSlot::new(day_at(9, 0), day_at(12, 0))];
        let topics = vec![
            Topic::new("t1", "Done", 2.0).with_status(TopicStatus::Completed),
            Topic::new("t2", "Dropped", 2.0).with_status(TopicStatus::Skipped),
        ];

        let sessions = allocator.allocate(slots, &topics, &context());
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_splits_topic_into_target_length_sessions() {
        // 2h topic against 120 minutes of slot capacity: 45 + 45 + 30,
        // the last clipped to remaining slot capacity.
        let allocator = SessionAllocator::new(options(45, 0)).unwrap();
        let slots = vec![
            TimeSlot::new(day_at(9, 0), day_at(9, 45)),
            TimeSlot::new(day_at(10, 0), day_at(10, 45)),
            TimeSlot::new(day_at(11, 0), day_at(11, 30)),
        ];
        let topics = vec![Topic::new("t1", "Integrals", 2.0)];

        let sessions = allocator.allocate(slots, &topics, &context());

        let lengths: Vec<i64> = sessions.iter().map(|s| s.duration_minutes()).collect();
        assert_eq!(lengths, vec![45, 45, 30]);
        assert_eq!(lengths.iter().sum::<i64>(), 120);
    }

    #[test]
    fn test_capacity_bound() {
        let allocator = SessionAllocator::new(options(45, 15)).unwrap();
        // Far more slot capacity than the topic needs.
        let slots = vec![TimeSlot::new(day_at(9, 0), day_at(21, 0))];
        let topics = vec![Topic::new("t1", "Series", 1.0)];

        let sessions = allocator.allocate(slots, &topics, &context());

        let total: i64 = sessions.iter().map(|s| s.duration_minutes()).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_priority_wins_over_declaration_order() {
        let allocator = SessionAllocator::new(options(45, 15)).unwrap();
        // Room for exactly one 45-minute session.
        let slots = vec![TimeSlot::new(day_at(9, 0), day_at(9, 45))];
        let topics = vec![
            Topic::new("low", "Low", 0.75).with_priority(Priority::Low),
            Topic::new("crit", "Critical", 0.75).with_priority(Priority::Critical),
        ];

        let sessions = allocator.allocate(slots, &topics, &context());

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].topic_id, "crit");
    }

    #[test]
    fn test_equal_priority_keeps_input_order() {
        let allocator = SessionAllocator::new(options(45, 15)).unwrap();
        let slots = vec![TimeSlot::new(day_at(9, 0), day_at(9, 45))];
        let topics = vec![
            Topic::new("first", "First", 0.75),
            Topic::new("second", "Second", 0.75),
        ];

        let sessions = allocator.allocate(slots, &topics, &context());

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].topic_id, "first");
    }

    #[test]
    fn test_sessions_within_slot_respect_break() {
        let allocator = SessionAllocator::new(options(45, 15)).unwrap();
        let slots = vec![TimeSlot::new(day_at(9, 0), day_at(12, 0))];
        let topics = vec![Topic::new("t1", "Graph theory", 2.0)];

        let sessions = allocator.allocate(slots, &topics, &context());

        assert!(sessions.len() >= 2);
        for pair in sessions.windows(2) {
            let gap = (pair[1].start_time - pair[0].end_time).num_minutes();
            assert!(gap >= 15, "expected >= 15 minute gap, got {gap}");
        }
    }

    #[test]
    fn test_minimum_session_floor() {
        // A topic needing only 10 minutes can never get a meaningful
        // session; every slot is abandoned instead.
        let allocator = SessionAllocator::new(options(45, 15)).unwrap();
        let slots = vec![
            TimeSlot::new(day_at(9, 0), day_at(12, 0)),
            TimeSlot::new(day_at(13, 0), day_at(16, 0)),
        ];
        let topics = vec![Topic::new("t1", "Quick recap", 10.0 / 60.0)];

        let sessions = allocator.allocate(slots, &topics, &context());
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_abandoned_remainder_not_offered_to_next_topic() {
        // First topic takes 45 of a 60-minute slot; the 15-minute
        // remainder (after a zero break) is below the session length
        // and is discarded, so the second topic gets nothing.
        let allocator = SessionAllocator::new(options(45, 0)).unwrap();
        let slots = vec![TimeSlot::new(day_at(9, 0), day_at(10, 0))];
        let topics = vec![
            Topic::new("a", "A", 0.75).with_priority(Priority::High),
            Topic::new("b", "B", 0.75).with_priority(Priority::Low),
        ];

        let sessions = allocator.allocate(slots, &topics, &context());

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].topic_id, "a");
    }

    #[test]
    fn test_partial_fulfillment_is_silent() {
        let allocator = SessionAllocator::new(options(45, 15)).unwrap();
        let slots = vec![TimeSlot::new(day_at(9, 0), day_at(9, 45))];
        let topics = vec![Topic::new("t1", "Big topic", 4.0)];

        let sessions = allocator.allocate(slots, &topics, &context());

        let total: i64 = sessions.iter().map(|s| s.duration_minutes()).sum();
        assert_eq!(total, 45);
    }

    #[test]
    fn test_session_carries_context() {
        let allocator = SessionAllocator::new(options(45, 15)).unwrap();
        let slots = vec![TimeSlot::new(day_at(9, 0), day_at(10, 0))];
        let topics = vec![Topic::new("t1", "Derivatives", 0.75).with_description("Chain rule")];

        let sessions = allocator.allocate(slots, &topics, &context());

        assert_eq!(sessions.len(), 1);
        let s = &sessions[0];
        assert_eq!(s.title, "Derivatives");
        assert_eq!(s.description.as_deref(), Some("Chain rule"));
        assert_eq!(s.subject_id, "math");
        assert_eq!(s.syllabus_id, "calc-1");
        assert_eq!(s.topic_id, "t1");
        assert_eq!(s.kind, SessionKind::Study);
    }
}
