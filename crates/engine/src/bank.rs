//! Loading, shuffling and capping of question sets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::debug;

use quiz_core::model::{QuestionDraft, QuestionSet, RoundSettings};

use crate::error::LoadError;

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

/// Wire shape of the question document.
#[derive(Debug, Deserialize)]
struct RawDocument {
    questions: Vec<RawQuestion>,
}

/// The `output` field name is kept for compatibility with existing
/// documents; it is the prompt shown to the player.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    output: String,
    options: Vec<String>,
    #[serde(rename = "correctIndex")]
    correct_index: i64,
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Parses, validates, shuffles and caps question documents.
pub struct QuestionBank;

impl QuestionBank {
    /// Parse and validate a raw question document.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Parse` on malformed JSON, `LoadError::EmptySet`
    /// if the document holds no questions, and `LoadError::InvalidRecord`
    /// for the first record that fails validation.
    pub fn load(bytes: &[u8]) -> Result<QuestionSet, LoadError> {
        let document: RawDocument = serde_json::from_slice(bytes)?;

        let mut records = Vec::with_capacity(document.questions.len());
        for (index, raw) in document.questions.into_iter().enumerate() {
            let record = QuestionDraft {
                prompt: raw.output,
                options: raw.options,
                correct_index: raw.correct_index,
            }
            .validate()
            .map_err(|source| LoadError::InvalidRecord { index, source })?;
            records.push(record);
        }

        let set = QuestionSet::new(records).map_err(|_| LoadError::EmptySet)?;
        debug!(questions = set.len(), "question document loaded");
        Ok(set)
    }

    /// Apply a uniform random permutation to the set, Fisher–Yates style.
    ///
    /// Deterministic for a seeded generator, which is what makes shuffled
    /// sessions reproducible in tests.
    pub fn shuffle<R: Rng>(set: &mut QuestionSet, rng: &mut R) {
        let n = set.len();
        for i in 0..n.saturating_sub(1) {
            let j = rng.random_range(i..n);
            set.swap(i, j);
        }
    }

    /// Keep the first `min(limit, len)` questions of the set.
    ///
    /// `limit` is validated non-zero by `RoundSettings`.
    pub fn cap(set: &mut QuestionSet, limit: u32) {
        set.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }

    /// Load, shuffle and cap in one pass using the session settings.
    ///
    /// # Errors
    ///
    /// Propagates `LoadError` from `load`.
    pub fn prepare(bytes: &[u8], settings: &RoundSettings) -> Result<QuestionSet, LoadError> {
        let mut set = Self::load(bytes)?;
        match settings.random_seed() {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Self::shuffle(&mut set, &mut rng);
            }
            None => {
                let mut rng = rand::rng();
                Self::shuffle(&mut set, &mut rng);
            }
        }
        Self::cap(&mut set, settings.max_questions());
        Ok(set)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionError;
    use std::collections::BTreeSet;

    fn document(prompts: &[&str]) -> Vec<u8> {
        let questions: Vec<String> = prompts
            .iter()
            .map(|p| {
                format!(
                    r#"{{"output":"{p}","options":["a","b","c"],"correctIndex":1}}"#
                )
            })
            .collect();
        format!(r#"{{"questions":[{}]}}"#, questions.join(",")).into_bytes()
    }

    #[test]
    fn load_parses_wire_document() {
        let set = QuestionBank::load(&document(&["q1", "q2"])).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().prompt(), "q1");
        assert_eq!(set.get(0).unwrap().correct_index(), 1);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = QuestionBank::load(b"{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn document_without_questions_is_empty_set() {
        let err = QuestionBank::load(br#"{"questions":[]}"#).unwrap_err();
        assert!(matches!(err, LoadError::EmptySet));
    }

    #[test]
    fn invalid_record_reports_its_index() {
        let bytes = br#"{"questions":[
            {"output":"fine","options":["a","b","c"],"correctIndex":0},
            {"output":"broken","options":["a","b","c"],"correctIndex":3}
        ]}"#;
        let err = QuestionBank::load(bytes).unwrap_err();
        match err {
            LoadError::InvalidRecord { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(
                    source,
                    QuestionError::CorrectIndexOutOfBounds { index: 3 }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut set = QuestionBank::load(&document(&["a", "b", "c", "d", "e"])).unwrap();
        let before: BTreeSet<String> = set.iter().map(|q| q.prompt().to_string()).collect();

        let mut rng = StdRng::seed_from_u64(42);
        QuestionBank::shuffle(&mut set, &mut rng);

        let after: BTreeSet<String> = set.iter().map(|q| q.prompt().to_string()).collect();
        assert_eq!(before, after);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let order_for = |seed: u64| -> Vec<String> {
            let mut set = QuestionBank::load(&document(&["a", "b", "c", "d", "e", "f"])).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            QuestionBank::shuffle(&mut set, &mut rng);
            set.iter().map(|q| q.prompt().to_string()).collect()
        };

        assert_eq!(order_for(7), order_for(7));

        // Not every pair of seeds reorders a six-element set differently,
        // but at least one of these must.
        let base = order_for(7);
        assert!((0..20_u64).any(|seed| order_for(seed) != base));
    }

    #[test]
    fn single_question_set_survives_shuffle() {
        let mut set = QuestionBank::load(&document(&["only"])).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        QuestionBank::shuffle(&mut set, &mut rng);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn cap_keeps_a_prefix() {
        let mut set = QuestionBank::load(&document(&["a", "b", "c", "d"])).unwrap();
        QuestionBank::cap(&mut set, 2);
        assert_eq!(set.len(), 2);

        QuestionBank::cap(&mut set, 100);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn prepare_shuffles_then_caps() {
        let settings = RoundSettings::new(10.0, 3, 0.5, 1.5, Some(11)).unwrap();
        let a = QuestionBank::prepare(&document(&["a", "b", "c", "d", "e"]), &settings).unwrap();
        let b = QuestionBank::prepare(&document(&["a", "b", "c", "d", "e"]), &settings).unwrap();

        assert_eq!(a.len(), 3);
        assert_eq!(a, b);
    }
}
