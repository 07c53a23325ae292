//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from mastery-core
pub use mastery_core::types::{ConceptKey, ConceptUnderstanding, RetentionStats, ReviewOutcome};

// === Database Entity Types ===

/// Registered learner account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Paper stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPaper {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Concept catalog entry, written by the extraction pipeline at paper
/// registration and read-only afterwards
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbConcept {
    pub paper_id: Uuid,
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Understanding record in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUnderstanding {
    pub user_id: Uuid,
    pub paper_id: Uuid,
    pub concept_id: String,
    pub is_understood: bool,
    pub confidence_level: f64,
    pub times_reviewed: i32,
    pub times_quizzed: i32,
    pub correct_answers: i32,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
    pub ease_factor: f64,
    pub interval_days: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbUnderstanding {
    /// Convert to mastery-core record
    pub fn to_core(&self) -> ConceptUnderstanding {
        ConceptUnderstanding {
            user_id: self.user_id,
            paper_id: self.paper_id,
            concept_id: self.concept_id.clone(),
            is_understood: self.is_understood,
            confidence_level: self.confidence_level,
            times_reviewed: self.times_reviewed as u32,
            times_quizzed: self.times_quizzed as u32,
            correct_answers: self.correct_answers as u32,
            last_reviewed: self.last_reviewed,
            next_review: self.next_review,
            ease_factor: self.ease_factor,
            interval_days: self.interval_days as u32,
        }
    }
}

/// Paper info with catalog size
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaperInfo {
    pub id: Uuid,
    pub title: String,
    pub concept_count: i64,
    pub created_at: DateTime<Utc>,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserStatusResponse {
    pub user_id: Uuid,
    pub last_seen_at: DateTime<Utc>,
}

// Paper types

/// One extracted concept, as delivered by the extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptSpec {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePaperRequest {
    pub title: String,
    pub concepts: Vec<ConceptSpec>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePaperResponse {
    pub paper_id: Uuid,
    pub concept_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaperListResponse {
    pub papers: Vec<PaperInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConceptCatalogResponse {
    pub concepts: Vec<DbConcept>,
}

// Progress types

#[derive(Debug, Serialize, Deserialize)]
pub struct ConceptProgressResponse {
    pub concepts: Vec<ConceptUnderstanding>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub paper_id: Uuid,
    pub concept_id: String,
    pub outcome: ReviewOutcome,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueQuery {
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueListResponse {
    pub count: usize,
    pub concepts: Vec<ConceptUnderstanding>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StrugglingListResponse {
    pub count: usize,
    pub concepts: Vec<ConceptUnderstanding>,
}

// Quiz types

/// One graded answer from the quiz evaluator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedAnswer {
    pub concept_id: String,
    pub correct: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResultsRequest {
    pub paper_id: Uuid,
    pub answers: Vec<GradedAnswer>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResultsResponse {
    pub records: Vec<ConceptUnderstanding>,
    pub weak_concepts: Vec<String>,
    pub strong_concepts: Vec<String>,
}
