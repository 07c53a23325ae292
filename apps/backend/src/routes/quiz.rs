//! Quiz evaluation boundary
//!
//! The external quiz evaluator grades a submission and posts one
//! (concept, correct) outcome per answer. Each outcome runs through the
//! scheduler in order; the response classifies the post-update records into
//! weak and strong concept lists for the quiz-result payload.

use axum::{extract::State, Extension, Json};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::routes::ensure_paper;
use crate::AppState;

/// Post-update confidence below which a concept is reported as weak
pub const WEAK_CONFIDENCE: f64 = 0.5;

/// Post-update confidence at which a concept is reported as strong
pub const STRONG_CONFIDENCE: f64 = 0.8;

/// POST /api/quiz/results
pub async fn submit_results(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<QuizResultsRequest>,
) -> Result<Json<QuizResultsResponse>> {
    if payload.answers.is_empty() {
        return Err(ApiError::BadRequest(
            "quiz result must contain at least one graded answer".to_string(),
        ));
    }

    ensure_paper(&state, auth.user_id, payload.paper_id).await?;

    // Validate every answer before the first state change
    for answer in &payload.answers {
        let key = ConceptKey::new(auth.user_id, payload.paper_id, answer.concept_id.clone());
        key.validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        if !state
            .db
            .concept_exists(payload.paper_id, &answer.concept_id)
            .await?
        {
            return Err(ApiError::NotFound(format!(
                "Concept {} not found",
                answer.concept_id
            )));
        }
    }

    let now = Utc::now();
    let mut records: Vec<ConceptUnderstanding> = Vec::new();

    for answer in &payload.answers {
        let key = ConceptKey::new(auth.user_id, payload.paper_id, answer.concept_id.clone());
        let scheduler = state.scheduler.clone();
        let correct = answer.correct;

        let updated = state
            .db
            .update_understanding(&key, move |record| {
                scheduler.quiz_answer(&record, correct, now)
            })
            .await?;

        // A concept answered twice in one quiz keeps only its final state
        match records.iter().position(|r| r.concept_id == updated.concept_id) {
            Some(pos) => records[pos] = updated,
            None => records.push(updated),
        }
    }

    let weak_concepts: Vec<String> = records
        .iter()
        .filter(|r| r.confidence_level < WEAK_CONFIDENCE)
        .map(|r| r.concept_id.clone())
        .collect();
    let strong_concepts: Vec<String> = records
        .iter()
        .filter(|r| r.confidence_level >= STRONG_CONFIDENCE)
        .map(|r| r.concept_id.clone())
        .collect();

    tracing::info!(
        "Applied {} graded answers for paper {}: {} weak, {} strong",
        payload.answers.len(),
        payload.paper_id,
        weak_concepts.len(),
        strong_concepts.len()
    );

    Ok(Json(QuizResultsResponse {
        records,
        weak_concepts,
        strong_concepts,
    }))
}
