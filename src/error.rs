//! Error types for Support Triage.

/// Top-level error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Priority error: {0}")]
    Priority(#[from] PriorityError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Priority engine errors.
///
/// The default rule tables never produce these; they become reachable only
/// when custom rules strip a signal of its vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum PriorityError {
    #[error("{signal} rules have no vocabulary entries")]
    EmptyVocabulary { signal: &'static str },

    #[error("fallback word lists are empty")]
    EmptyFallbackLists,
}

/// Pipeline-related errors (ingestion and persistence seams).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Source fetch failed: {0}")]
    SourceFetch(String),

    #[error("Sink store failed: {0}")]
    SinkStore(String),
}

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
