//! Planner orchestration and collaborator interfaces.
//!
//! The engine itself is pure; the surrounding application owns every
//! read and write path. Those paths are expressed as traits here so
//! the planner takes its collaborators as explicit parameters instead
//! of ambient client handles. An in-memory implementation backs tests
//! and the CLI demo flow; durable storage stays on the caller's side
//! of the boundary.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, ValidationError};
use crate::scheduler::{PlanContext, SchedulingOptions, SessionAllocator, SlotFinder};
use crate::session::{Booking, ProposedSession};
use crate::topic::Topic;

/// Errors collaborators are allowed to surface.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Read path for existing calendar commitments.
pub trait BookingSource {
    /// All bookings intersecting `[from, to)`.
    fn bookings_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Booking>, SourceError>;
}

/// Read path for incomplete syllabus topics.
pub trait TopicSource {
    /// Topics of a syllabus that still need study time
    /// (neither completed nor skipped).
    fn pending_topics(&self, syllabus_id: &str) -> Result<Vec<Topic>, SourceError>;
}

/// Write path for proposed sessions.
///
/// The sink assigns identities and owns all bookkeeping; the engine
/// never sees the stored records again.
pub trait SessionSink {
    /// Persist the sessions, returning the assigned ids in order.
    fn persist_sessions(&mut self, sessions: &[ProposedSession]) -> Result<Vec<String>, SourceError>;
}

/// Composes slot finding and allocation over injected collaborators.
pub struct Planner {
    options: SchedulingOptions,
    slot_finder: SlotFinder,
    allocator: SessionAllocator,
}

impl Planner {
    /// Create a planner from validated options.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the options are malformed.
    pub fn new(options: SchedulingOptions) -> Result<Self, ValidationError> {
        let slot_finder = SlotFinder::new(options.clone())?;
        let allocator = SessionAllocator::new(options.clone())?;
        Ok(Self {
            options,
            slot_finder,
            allocator,
        })
    }

    /// Propose sessions for one syllabus over the horizon starting at
    /// `horizon_start`.
    ///
    /// Fetches bookings over the horizon, finds free slots, fetches
    /// pending topics, and allocates. Nothing is persisted; see
    /// [`plan_and_persist`](Self::plan_and_persist).
    pub fn plan(
        &self,
        bookings: &dyn BookingSource,
        topics: &dyn TopicSource,
        context: &PlanContext,
        horizon_start: DateTime<Utc>,
    ) -> Result<Vec<ProposedSession>, CoreError> {
        let horizon_end = horizon_start + Duration::days(i64::from(self.options.days_ahead));

        let bookings = bookings.bookings_between(horizon_start, horizon_end)?;
        let slots = self.slot_finder.find_slots(&bookings, horizon_start);
        let topics = topics.pending_topics(&context.syllabus_id)?;

        Ok(self.allocator.allocate(slots, &topics, context))
    }

    /// Plan and hand the result to the sink in one step.
    ///
    /// Returns the ids the sink assigned.
    pub fn plan_and_persist(
        &self,
        bookings: &dyn BookingSource,
        topics: &dyn TopicSource,
        sink: &mut dyn SessionSink,
        context: &PlanContext,
        horizon_start: DateTime<Utc>,
    ) -> Result<Vec<String>, CoreError> {
        let sessions = self.plan(bookings, topics, context, horizon_start)?;
        Ok(sink.persist_sessions(&sessions)?)
    }
}

/// A persisted session with its sink-assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub id: String,
    pub session: ProposedSession,
}

/// In-memory collaborator backing tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryPlanner {
    bookings: Vec<Booking>,
    topics: HashMap<String, Vec<Topic>>,
    saved: Vec<StoredSession>,
}

impl InMemoryPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing commitment.
    pub fn add_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Add a topic under a syllabus.
    pub fn add_topic(&mut self, syllabus_id: impl Into<String>, topic: Topic) {
        self.topics.entry(syllabus_id.into()).or_default().push(topic);
    }

    /// Sessions persisted so far.
    pub fn saved_sessions(&self) -> &[StoredSession] {
        &self.saved
    }
}

impl BookingSource for InMemoryPlanner {
    fn bookings_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Booking>, SourceError> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.overlaps(from, to))
            .copied()
            .collect())
    }
}

impl TopicSource for InMemoryPlanner {
    fn pending_topics(&self, syllabus_id: &str) -> Result<Vec<Topic>, SourceError> {
        Ok(self
            .topics
            .get(syllabus_id)
            .map(|topics| {
                topics
                    .iter()
                    .filter(|t| t.status.is_schedulable())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl SessionSink for InMemoryPlanner {
    fn persist_sessions(
        &mut self,
        sessions: &[ProposedSession],
    ) -> Result<Vec<String>, SourceError> {
        let mut ids = Vec::with_capacity(sessions.len());
        for session in sessions {
            let id = Uuid::new_v4().to_string();
            self.saved.push(StoredSession {
                id: id.clone(),
                session: session.clone(),
            });
            ids.push(id);
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::TopicStatus;
    use chrono::TimeZone;

    fn day_at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    fn test_options() -> SchedulingOptions {
        SchedulingOptions {
            preferred_start_hour: 9,
            preferred_end_hour: 21,
            session_minutes: 45,
            break_minutes: 15,
            days_ahead: 2,
        }
    }

    #[test]
    fn test_plan_pulls_from_sources() {
        let mut backend = InMemoryPlanner::new();
        backend.add_booking(Booking::new(day_at(10, 0), day_at(11, 0)));
        backend.add_topic("calc-1", Topic::new("t1", "Integrals", 1.0));
        backend.add_topic(
            "calc-1",
            Topic::new("t2", "Done already", 1.0).with_status(TopicStatus::Completed),
        );

        let planner = Planner::new(test_options()).unwrap();
        let context = PlanContext::new("math", "calc-1");
        let sessions = planner
            .plan(&backend, &backend, &context, day_at(0, 0))
            .unwrap();

        assert!(!sessions.is_empty());
        assert!(sessions.iter().all(|s| s.topic_id == "t1"));
        let total: i64 = sessions.iter().map(|s| s.duration_minutes()).sum();
        assert_eq!(total, 60);

        // Nothing may touch the booking.
        for s in &sessions {
            assert!(!s.overlaps(day_at(10, 0), day_at(11, 0)));
        }
    }

    #[test]
    fn test_plan_and_persist_assigns_ids() {
        let mut backend = InMemoryPlanner::new();
        backend.add_topic("calc-1", Topic::new("t1", "Integrals", 1.0));

        let planner = Planner::new(test_options()).unwrap();
        let context = PlanContext::new("math", "calc-1");

        let sessions = planner
            .plan(&backend, &backend, &context, day_at(0, 0))
            .unwrap();

        let mut sink = InMemoryPlanner::new();
        let ids = planner
            .plan_and_persist(&backend, &backend, &mut sink, &context, day_at(0, 0))
            .unwrap();

        assert_eq!(ids.len(), sessions.len());
        assert_eq!(sink.saved_sessions().len(), sessions.len());
        for (id, stored) in ids.iter().zip(sink.saved_sessions()) {
            assert_eq!(id, &stored.id);
        }
    }

    #[test]
    fn test_unknown_syllabus_plans_nothing() {
        let backend = InMemoryPlanner::new();
        let planner = Planner::new(test_options()).unwrap();
        let context = PlanContext::new("math", "missing");

        let sessions = planner
            .plan(&backend, &backend, &context, day_at(0, 0))
            .unwrap();
        assert!(sessions.is_empty());
    }
}
