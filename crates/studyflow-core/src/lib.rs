//! # Studyflow Core Library
//!
//! Core business logic for Studyflow's session scheduling engine.
//! Given a student's existing calendar commitments and the incomplete
//! topics of a syllabus, the engine computes the free time windows
//! inside the preferred daily study hours over a rolling horizon and
//! greedily allocates them to topics in priority order, producing
//! concrete study-session proposals.
//!
//! ## Architecture
//!
//! - **Scheduler**: pure slot finding ([`SlotFinder`]) and greedy
//!   session allocation ([`SessionAllocator`]); no I/O, no clock
//! - **Planner**: orchestration over injected collaborators
//!   ([`BookingSource`], [`TopicSource`], [`SessionSink`]) -- the
//!   surrounding application owns authentication, syllabus storage,
//!   and session persistence
//! - **Storage**: TOML-based configuration of scheduling defaults
//!
//! ## Key Components
//!
//! - [`SlotFinder`]: free-interval discovery per day of the horizon
//! - [`SessionAllocator`]: priority-ordered session carving
//! - [`Planner`]: end-to-end plan over a backend
//! - [`Config`]: scheduling defaults management

pub mod error;
pub mod planner;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod topic;

pub use error::{ConfigError, CoreError, ValidationError};
pub use planner::{
    BookingSource, InMemoryPlanner, Planner, SessionSink, SourceError, StoredSession, TopicSource,
};
pub use scheduler::{
    find_free_slots, summarize_plan, PlanContext, SchedulingOptions, SessionAllocator, SlotFinder,
    TimeSlot, TopicCoverage, MIN_SESSION_MINUTES,
};
pub use session::{Booking, ProposedSession, SessionKind};
pub use storage::Config;
pub use topic::{Priority, Topic, TopicStatus};
