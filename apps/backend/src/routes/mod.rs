//! HTTP route handlers

pub mod auth;
pub mod papers;
pub mod progress;
pub mod quiz;
pub mod users;

use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Fail with not-found unless the paper exists in the user's catalog
pub(crate) async fn ensure_paper(state: &AppState, user_id: Uuid, paper_id: Uuid) -> Result<()> {
    state
        .db
        .get_paper(user_id, paper_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Paper not found".to_string()))?;

    Ok(())
}

/// Fail with not-found unless the concept exists in the paper's catalog
pub(crate) async fn ensure_concept(
    state: &AppState,
    user_id: Uuid,
    paper_id: Uuid,
    concept_id: &str,
) -> Result<()> {
    ensure_paper(state, user_id, paper_id).await?;

    if !state.db.concept_exists(paper_id, concept_id).await? {
        return Err(ApiError::NotFound(format!(
            "Concept {} not found",
            concept_id
        )));
    }

    Ok(())
}
