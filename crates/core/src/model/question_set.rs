use thiserror::Error;

use crate::model::question::QuestionRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("question set cannot be empty")]
    Empty,
}

/// Ordered, non-empty collection of questions for one session.
///
/// Immutable after construction except for the two operations the bank
/// needs: `swap` (a shuffle is a permutation, so the multiset of records
/// never changes) and `truncate` (capping to the session limit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    records: Vec<QuestionRecord>,
}

impl QuestionSet {
    /// Build a set from validated records.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError::Empty` if no records are provided, which
    /// is what makes "start a round with no content" unrepresentable.
    pub fn new(records: Vec<QuestionRecord>) -> Result<Self, QuestionSetError> {
        if records.is_empty() {
            return Err(QuestionSetError::Empty);
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept so the type plays well with emptiness checks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.records.iter()
    }

    /// Swap two records in place.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.records.swap(a, b);
    }

    /// Keep only the first `min(limit, len)` records.
    ///
    /// A zero limit would break the non-empty invariant; settings
    /// validation rejects it upstream, and it is ignored here.
    pub fn truncate(&mut self, limit: usize) {
        if limit == 0 {
            return;
        }
        self.records.truncate(limit);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
