//! Progress endpoints
//!
//! Read side of the mastery tracker (record list, due queue, practice queue,
//! retention statistics) plus the flashcard-style review submission.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::routes::{ensure_concept, ensure_paper};
use crate::AppState;

/// GET /api/progress/{paper_id}/concepts
pub async fn concepts(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(paper_id): Path<Uuid>,
) -> Result<Json<ConceptProgressResponse>> {
    ensure_paper(&state, auth.user_id, paper_id).await?;

    let concepts = state
        .db
        .list_understandings(auth.user_id, paper_id)
        .await?
        .iter()
        .map(|r| r.to_core())
        .collect();

    Ok(Json(ConceptProgressResponse { concepts }))
}

/// GET /api/progress/{paper_id}/concepts/{concept_id}
/// Returns the record for one concept, creating the default record on first
/// reference
pub async fn concept(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path((paper_id, concept_id)): Path<(Uuid, String)>,
) -> Result<Json<ConceptUnderstanding>> {
    let key = ConceptKey::new(auth.user_id, paper_id, concept_id);
    key.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_concept(&state, auth.user_id, paper_id, &key.concept_id).await?;

    let record = state.db.get_or_create_understanding(&key).await?;

    Ok(Json(record.to_core()))
}

/// POST /api/progress/review
/// Applies one flashcard-style review outcome to a concept
pub async fn review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<ConceptUnderstanding>> {
    let key = ConceptKey::new(auth.user_id, payload.paper_id, payload.concept_id);
    key.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    ensure_concept(&state, auth.user_id, payload.paper_id, &key.concept_id).await?;

    let scheduler = state.scheduler.clone();
    let outcome = payload.outcome;
    let now = Utc::now();

    let updated = state
        .db
        .update_understanding(&key, move |record| scheduler.review(&record, outcome, now))
        .await?;

    Ok(Json(updated))
}

/// GET /api/progress/{paper_id}/due
pub async fn due(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(paper_id): Path<Uuid>,
    Query(query): Query<DueQuery>,
) -> Result<Json<DueListResponse>> {
    ensure_paper(&state, auth.user_id, paper_id).await?;

    let records: Vec<ConceptUnderstanding> = state
        .db
        .list_understandings(auth.user_id, paper_id)
        .await?
        .iter()
        .map(|r| r.to_core())
        .collect();

    let as_of = query.as_of.unwrap_or_else(Utc::now);
    let concepts = mastery_core::due_for_review(records, as_of);

    Ok(Json(DueListResponse {
        count: concepts.len(),
        concepts,
    }))
}

/// GET /api/progress/{paper_id}/struggling
pub async fn struggling(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(paper_id): Path<Uuid>,
) -> Result<Json<StrugglingListResponse>> {
    ensure_paper(&state, auth.user_id, paper_id).await?;

    let records: Vec<ConceptUnderstanding> = state
        .db
        .list_understandings(auth.user_id, paper_id)
        .await?
        .iter()
        .map(|r| r.to_core())
        .collect();

    let concepts = mastery_core::needs_practice(records);

    Ok(Json(StrugglingListResponse {
        count: concepts.len(),
        concepts,
    }))
}

/// GET /api/progress/{paper_id}/retention
pub async fn retention(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(paper_id): Path<Uuid>,
) -> Result<Json<RetentionStats>> {
    ensure_paper(&state, auth.user_id, paper_id).await?;

    let records: Vec<ConceptUnderstanding> = state
        .db
        .list_understandings(auth.user_id, paper_id)
        .await?
        .iter()
        .map(|r| r.to_core())
        .collect();

    let total_concepts = state.db.concept_count(paper_id).await? as usize;
    let stats = mastery_core::compute_stats(&records, total_concepts);

    Ok(Json(stats))
}
