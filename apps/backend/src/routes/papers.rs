//! Paper catalog endpoints
//!
//! Papers arrive here from the concept-extraction pipeline: a title plus the
//! extracted concept list. Registering a paper also seeds a default
//! understanding record per concept for the owner.

use std::collections::HashSet;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{
    ConceptCatalogResponse, CreatePaperRequest, CreatePaperResponse, PaperListResponse,
};
use crate::routes::auth::AuthenticatedUser;
use crate::routes::ensure_paper;
use crate::AppState;

/// POST /api/papers
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreatePaperRequest>,
) -> Result<Json<CreatePaperResponse>> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "paper title must not be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for concept in &payload.concepts {
        if concept.id.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "concept id must not be empty".to_string(),
            ));
        }
        if !seen.insert(concept.id.as_str()) {
            return Err(ApiError::BadRequest(format!(
                "duplicate concept id: {}",
                concept.id
            )));
        }
    }

    let paper = state
        .db
        .create_paper(auth.user_id, &payload.title, &payload.concepts)
        .await?;

    tracing::info!(
        "Registered paper {} with {} concepts",
        paper.id,
        payload.concepts.len()
    );

    Ok(Json(CreatePaperResponse {
        paper_id: paper.id,
        concept_count: payload.concepts.len(),
    }))
}

/// GET /api/papers
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<PaperListResponse>> {
    let papers = state.db.list_papers(auth.user_id).await?;
    Ok(Json(PaperListResponse { papers }))
}

/// GET /api/papers/{paper_id}/concepts
pub async fn concepts(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(paper_id): Path<Uuid>,
) -> Result<Json<ConceptCatalogResponse>> {
    ensure_paper(&state, auth.user_id, paper_id).await?;

    let concepts = state.db.list_concepts(paper_id).await?;
    Ok(Json(ConceptCatalogResponse { concepts }))
}
