//! SM-2 style spaced repetition scheduling with confidence tracking.
//!
//! Based on SuperMemo 2 with configurable parameters.

use chrono::{DateTime, Duration, Utc};

use crate::types::{ConceptUnderstanding, ReviewOutcome};

/// Scheduling and mastery parameters.
#[derive(Debug, Clone)]
pub struct Scheduler {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub ease_reward: f64,
    pub ease_penalty: f64,
    /// Recency weight for the confidence moving average.
    pub confidence_weight: f64,
    /// Confidence floor for marking a concept understood.
    pub mastery_confidence: f64,
    /// Minimum graded answers before a concept can be marked understood.
    pub mastery_min_quizzes: u32,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            ease_reward: 0.1,
            ease_penalty: 0.2,
            confidence_weight: 0.3,
            mastery_confidence: 0.8,
            mastery_min_quizzes: 2,
        }
    }
}

impl Scheduler {
    /// Apply one review outcome to a record.
    ///
    /// Successful recall grows the ease factor and multiplies the interval by
    /// it; failure shrinks the ease factor and drops back to daily review.
    /// Both dates are stamped from `now` and the review counter advances.
    pub fn review(
        &self,
        record: &ConceptUnderstanding,
        outcome: ReviewOutcome,
        now: DateTime<Utc>,
    ) -> ConceptUnderstanding {
        let mut next = record.clone();

        match outcome {
            ReviewOutcome::Correct => {
                next.ease_factor = (record.ease_factor + self.ease_reward).max(self.minimum_ease);
                let interval = (record.interval_days as f64 * next.ease_factor).round() as u32;
                next.interval_days = interval.max(1);
            }
            ReviewOutcome::Incorrect => {
                next.ease_factor = (record.ease_factor - self.ease_penalty).max(self.minimum_ease);
                next.interval_days = 1;
            }
        }

        next.last_reviewed = Some(now);
        next.next_review = Some(now + Duration::days(next.interval_days as i64));
        next.times_reviewed = record.times_reviewed + 1;

        next
    }

    /// Apply one graded quiz answer.
    ///
    /// Updates the quiz counters, moves the confidence estimate toward the
    /// answer signal, runs the shared scheduling step, and re-derives the
    /// mastery flag.
    pub fn quiz_answer(
        &self,
        record: &ConceptUnderstanding,
        correct: bool,
        now: DateTime<Utc>,
    ) -> ConceptUnderstanding {
        let mut next = record.clone();

        next.times_quizzed = record.times_quizzed + 1;
        if correct {
            next.correct_answers = record.correct_answers + 1;
        }

        let signal = if correct { 1.0 } else { 0.0 };
        let confidence =
            record.confidence_level + self.confidence_weight * (signal - record.confidence_level);
        next.confidence_level = confidence.clamp(0.0, 1.0);

        let mut next = self.review(&next, ReviewOutcome::from_correct(correct), now);

        next.is_understood = next.confidence_level >= self.mastery_confidence
            && next.times_quizzed >= self.mastery_min_quizzes;

        next
    }
}
