//! Shared error types for the engine crate.

use thiserror::Error;

use quiz_core::model::QuestionError;

/// Errors emitted while loading a question document.
///
/// A failed load never yields a partial question set: the loader aborts on
/// the first invalid record and the host reports the reason upstream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The host could not find the question document at all. Constructed by
    /// the host glue (the engine itself performs no I/O).
    #[error("question source not found: {path}")]
    SourceNotFound { path: String },

    #[error("malformed question document")]
    Parse(#[from] serde_json::Error),

    #[error("question document contains no questions")]
    EmptySet,

    #[error("invalid question record at index {index}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: QuestionError,
    },
}
