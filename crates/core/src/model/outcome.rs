use chrono::{DateTime, Utc};
use thiserror::Error;

//
// ─── ANSWER OUTCOME ────────────────────────────────────────────────────────────
//

/// Resolution of a single question: what was correct, what was chosen.
///
/// `selected` is `None` when the answering window expired without input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    question_index: usize,
    correct_index: usize,
    selected: Option<usize>,
}

impl AnswerOutcome {
    #[must_use]
    pub fn new(question_index: usize, correct_index: usize, selected: Option<usize>) -> Self {
        Self {
            question_index,
            correct_index,
            selected,
        }
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.selected == Some(self.correct_index)
    }

    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.selected.is_none()
    }
}

//
// ─── ROUND SUMMARY ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("answered questions ({answered}) exceed the session total ({total})")]
    CountMismatch { answered: usize, total: usize },
}

/// Aggregate tally for a finished quiz session.
///
/// In-memory only; nothing here is persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    total: usize,
    correct: usize,
    wrong: usize,
    timed_out: usize,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl RoundSummary {
    /// Build a summary from the recorded outcomes.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before
    /// `started_at`, and `SummaryError::CountMismatch` if more outcomes were
    /// recorded than questions presented.
    pub fn from_outcomes(
        total: usize,
        outcomes: &[AnswerOutcome],
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        if outcomes.len() > total {
            return Err(SummaryError::CountMismatch {
                answered: outcomes.len(),
                total,
            });
        }

        let mut correct = 0_usize;
        let mut wrong = 0_usize;
        let mut timed_out = 0_usize;
        for outcome in outcomes {
            if outcome.timed_out() {
                timed_out += 1;
            } else if outcome.is_correct() {
                correct += 1;
            } else {
                wrong += 1;
            }
        }

        Ok(Self {
            total,
            correct,
            wrong,
            timed_out,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Questions that reached a resolution, by either path.
    #[must_use]
    pub fn answered(&self) -> usize {
        self.correct + self.wrong + self.timed_out
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> usize {
        self.wrong
    }

    #[must_use]
    pub fn timed_out(&self) -> usize {
        self.timed_out
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn summary_classifies_outcomes() {
        let now = fixed_now();
        let outcomes = vec![
            AnswerOutcome::new(0, 1, Some(1)),
            AnswerOutcome::new(1, 0, Some(2)),
            AnswerOutcome::new(2, 2, None),
            AnswerOutcome::new(3, 0, Some(0)),
        ];

        let summary = RoundSummary::from_outcomes(4, &outcomes, now, now).unwrap();
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.answered(), 4);
        assert_eq!(summary.correct(), 2);
        assert_eq!(summary.wrong(), 1);
        assert_eq!(summary.timed_out(), 1);
    }

    #[test]
    fn completed_before_started_is_rejected() {
        let now = fixed_now();
        let err = RoundSummary::from_outcomes(1, &[], now, now - Duration::seconds(1)).unwrap_err();
        assert_eq!(err, SummaryError::InvalidTimeRange);
    }

    #[test]
    fn more_outcomes_than_questions_is_rejected() {
        let now = fixed_now();
        let outcomes = vec![
            AnswerOutcome::new(0, 0, None),
            AnswerOutcome::new(1, 0, None),
        ];
        let err = RoundSummary::from_outcomes(1, &outcomes, now, now).unwrap_err();
        assert_eq!(
            err,
            SummaryError::CountMismatch {
                answered: 2,
                total: 1
            }
        );
    }

    #[test]
    fn timeout_outcome_is_never_correct() {
        let outcome = AnswerOutcome::new(0, 2, None);
        assert!(outcome.timed_out());
        assert!(!outcome.is_correct());
    }
}
