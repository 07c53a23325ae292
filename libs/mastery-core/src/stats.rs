//! Paper-level retention aggregation.

use crate::types::{ConceptUnderstanding, RetentionStats};

/// Confidence ceiling below which a quizzed concept counts as struggling in
/// aggregate statistics. Distinct from
/// [`crate::queue::NEEDS_PRACTICE_CONFIDENCE`].
pub const STRUGGLING_CONFIDENCE: f64 = 0.5;

/// Minimum graded answers before a concept can count as struggling.
pub const STRUGGLING_MIN_QUIZZED: u32 = 2;

/// Derive retention statistics from a paper's understanding records.
///
/// `total_concepts` is the catalog size for the paper. Concepts without a
/// record behave as if they had a default one (confidence 0, never quizzed):
/// they land in the in-progress bucket and contribute nothing to the averages.
pub fn compute_stats(records: &[ConceptUnderstanding], total_concepts: usize) -> RetentionStats {
    if total_concepts == 0 {
        return RetentionStats::zero();
    }

    let mastered = records.iter().filter(|r| r.is_understood).count();
    let struggling = records
        .iter()
        .filter(|r| {
            r.times_quizzed >= STRUGGLING_MIN_QUIZZED
                && r.confidence_level < STRUGGLING_CONFIDENCE
        })
        .count();
    let in_progress = total_concepts.saturating_sub(mastered + struggling);

    let average_confidence = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.confidence_level).sum::<f64>() / records.len() as f64
    };

    RetentionStats {
        overall_retention: mastered as f64 / total_concepts as f64,
        concepts_mastered: mastered,
        concepts_in_progress: in_progress,
        concepts_struggling: struggling,
        average_confidence,
    }
}
