//! Core types for concept mastery tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{KeyError, Result};

/// Identity of one learner/paper/concept record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptKey {
    pub user_id: Uuid,
    pub paper_id: Uuid,
    pub concept_id: String,
}

impl ConceptKey {
    pub fn new(user_id: Uuid, paper_id: Uuid, concept_id: impl Into<String>) -> Self {
        Self {
            user_id,
            paper_id,
            concept_id: concept_id.into(),
        }
    }

    /// Reject a malformed identity before any state change.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.is_nil() {
            return Err(KeyError::NilUserId);
        }
        if self.paper_id.is_nil() {
            return Err(KeyError::NilPaperId);
        }
        if self.concept_id.trim().is_empty() {
            return Err(KeyError::EmptyConceptId);
        }
        Ok(())
    }
}

/// Outcome of one review or graded quiz answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Correct,
    Incorrect,
}

impl ReviewOutcome {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Per-concept mastery state for one learner and one paper.
///
/// Exactly one record exists per (user, paper, concept); it is created with
/// [`ConceptUnderstanding::new`] on first reference and mutated only through
/// [`crate::scheduler::Scheduler`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptUnderstanding {
    pub user_id: Uuid,
    pub paper_id: Uuid,
    pub concept_id: String,
    pub is_understood: bool,
    pub confidence_level: f64,
    pub times_reviewed: u32,
    pub times_quizzed: u32,
    pub correct_answers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
    pub ease_factor: f64,
    pub interval_days: u32,
}

impl ConceptUnderstanding {
    /// Default record for a key that has never been seen.
    pub fn new(key: ConceptKey) -> Self {
        Self {
            user_id: key.user_id,
            paper_id: key.paper_id,
            concept_id: key.concept_id,
            is_understood: false,
            confidence_level: 0.0,
            times_reviewed: 0,
            times_quizzed: 0,
            correct_answers: 0,
            last_reviewed: None,
            next_review: None,
            ease_factor: 2.5,
            interval_days: 1,
        }
    }

    pub fn key(&self) -> ConceptKey {
        ConceptKey {
            user_id: self.user_id,
            paper_id: self.paper_id,
            concept_id: self.concept_id.clone(),
        }
    }
}

/// Paper-level retention statistics, derived on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionStats {
    pub overall_retention: f64,
    pub concepts_mastered: usize,
    pub concepts_in_progress: usize,
    pub concepts_struggling: usize,
    pub average_confidence: f64,
}

impl RetentionStats {
    /// All-zero statistics, returned for papers with an empty catalog.
    pub fn zero() -> Self {
        Self {
            overall_retention: 0.0,
            concepts_mastered: 0,
            concepts_in_progress: 0,
            concepts_struggling: 0,
            average_confidence: 0.0,
        }
    }
}
