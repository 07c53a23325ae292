//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

use concept_coach_backend::models::{ConceptSpec, GradedAnswer};

/// Generate a list of concept specs as the extraction pipeline would emit.
pub fn concept_specs(num_concepts: usize) -> Vec<ConceptSpec> {
    (0..num_concepts)
        .map(|i| ConceptSpec {
            id: format!("concept-{}", i + 1),
            name: format!("Concept {}", i + 1),
        })
        .collect()
}

/// Create a user register request body.
pub fn register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Create a paper registration request body.
pub fn create_paper_request(title: &str, concepts: &[ConceptSpec]) -> serde_json::Value {
    json!({ "title": title, "concepts": concepts })
}

/// Create a review submission request body.
pub fn review_request(paper_id: Uuid, concept_id: &str, outcome: &str) -> serde_json::Value {
    json!({
        "paper_id": paper_id,
        "concept_id": concept_id,
        "outcome": outcome
    })
}

/// Create a graded answer for quiz result submissions.
pub fn graded_answer(concept_id: &str, correct: bool) -> GradedAnswer {
    GradedAnswer {
        concept_id: concept_id.to_string(),
        correct,
    }
}

/// Create a quiz results request body.
pub fn quiz_results_request(paper_id: Uuid, answers: Vec<GradedAnswer>) -> serde_json::Value {
    json!({ "paper_id": paper_id, "answers": answers })
}

/// Generate a unique paper title to avoid collisions.
pub fn unique_title(prefix: &str) -> String {
    format!("{} {}", prefix, &Uuid::new_v4().to_string()[..8])
}
