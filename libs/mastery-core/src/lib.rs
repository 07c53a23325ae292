//! Core mastery-tracking library shared by the backend service.
//!
//! Provides:
//! - Per-concept understanding records and identity types
//! - SM-2 style spaced repetition scheduling with confidence tracking
//! - Review queue selection (due and needs-practice filtering)
//! - Paper-level retention aggregation

pub mod error;
pub mod queue;
pub mod scheduler;
pub mod stats;
pub mod types;

pub use error::{KeyError, Result};
pub use queue::{due_for_review, needs_practice};
pub use scheduler::Scheduler;
pub use stats::compute_stats;
pub use types::{ConceptKey, ConceptUnderstanding, RetentionStats, ReviewOutcome};
