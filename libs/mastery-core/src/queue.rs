//! Review queue selection over understanding records.

use chrono::{DateTime, Utc};

use crate::types::ConceptUnderstanding;

/// Minimum graded answers before a concept can be flagged for practice.
pub const NEEDS_PRACTICE_MIN_QUIZZED: u32 = 2;

/// Confidence ceiling below which a quizzed concept needs more practice.
/// Distinct from [`crate::stats::STRUGGLING_CONFIDENCE`]; the dashboard count
/// and the practice filter are separate knobs.
pub const NEEDS_PRACTICE_CONFIDENCE: f64 = 0.6;

/// Records due for review at `as_of`.
///
/// A record that has never been reviewed (`next_review` unset) is always due
/// and sorts ahead of every scheduled record; the rest order by scheduled
/// date, most overdue first.
pub fn due_for_review(
    records: Vec<ConceptUnderstanding>,
    as_of: DateTime<Utc>,
) -> Vec<ConceptUnderstanding> {
    let mut due: Vec<ConceptUnderstanding> = records
        .into_iter()
        .filter(|r| match r.next_review {
            None => true,
            Some(next) => next <= as_of,
        })
        .collect();

    // Option sorts None first, which is exactly the never-reviewed priority.
    due.sort_by_key(|r| r.next_review);
    due
}

/// Records the learner keeps missing: quizzed at least twice with confidence
/// still below the practice threshold.
pub fn needs_practice(records: Vec<ConceptUnderstanding>) -> Vec<ConceptUnderstanding> {
    records
        .into_iter()
        .filter(|r| {
            r.times_quizzed >= NEEDS_PRACTICE_MIN_QUIZZED
                && r.confidence_level < NEEDS_PRACTICE_CONFIDENCE
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConceptKey;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn record(concept_id: &str) -> ConceptUnderstanding {
        ConceptUnderstanding::new(ConceptKey::new(Uuid::new_v4(), Uuid::new_v4(), concept_id))
    }

    fn scheduled(concept_id: &str, next_review: DateTime<Utc>) -> ConceptUnderstanding {
        let mut r = record(concept_id);
        r.next_review = Some(next_review);
        r.last_reviewed = Some(next_review - Duration::days(1));
        r
    }

    #[test]
    fn never_reviewed_records_are_always_due() {
        let as_of = Utc::now();
        let due = due_for_review(vec![record("a")], as_of);
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn future_records_are_not_due() {
        let as_of = Utc::now();
        let due = due_for_review(vec![scheduled("a", as_of + Duration::days(2))], as_of);
        assert!(due.is_empty());
    }

    #[test]
    fn record_due_exactly_at_as_of_is_included() {
        let as_of = Utc::now();
        let due = due_for_review(vec![scheduled("a", as_of)], as_of);
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn never_reviewed_sorts_before_any_scheduled_record() {
        let as_of = Utc::now();
        let overdue = scheduled("overdue", as_of - Duration::days(30));
        let fresh = record("fresh");

        let due = due_for_review(vec![overdue, fresh], as_of);

        assert_eq!(due[0].concept_id, "fresh");
        assert_eq!(due[1].concept_id, "overdue");
    }

    #[test]
    fn scheduled_records_order_most_overdue_first() {
        let as_of = Utc::now();
        let slightly = scheduled("slightly", as_of - Duration::days(1));
        let very = scheduled("very", as_of - Duration::days(10));

        let due = due_for_review(vec![slightly, very], as_of);

        assert_eq!(due[0].concept_id, "very");
        assert_eq!(due[1].concept_id, "slightly");
    }

    #[test]
    fn needs_practice_requires_two_graded_answers() {
        let mut low_confidence = record("low");
        low_confidence.confidence_level = 0.2;
        low_confidence.times_quizzed = 1;

        assert!(needs_practice(vec![low_confidence]).is_empty());
    }

    #[test]
    fn needs_practice_uses_the_point_six_threshold() {
        let mut borderline = record("borderline");
        borderline.confidence_level = 0.55;
        borderline.times_quizzed = 3;

        let mut confident = record("confident");
        confident.confidence_level = 0.6;
        confident.times_quizzed = 3;

        let flagged = needs_practice(vec![borderline, confident]);

        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].concept_id, "borderline");
    }
}
