//! # Error Types

use std::path::PathBuf;

/// Result alias for vocabconv operations.
pub type VCResult<T> = Result<T, VocabConvError>;

/// Errors raised while loading, converting, or writing a vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum VocabConvError {
    /// A file could not be opened, read, created, or written.
    #[error("io error on {path:?}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The input is not well-formed JSON.
    #[error("malformed JSON: {source}")]
    Json {
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The input is JSON, but not a `{"model": {"vocab": {..}}}` document.
    #[error("invalid tokenizer document (expected `model.vocab` of token -> rank): {source}")]
    Schema {
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A tiktoken record could not be parsed.
    #[error("invalid tiktoken record on line {line}: {message}")]
    TiktokenLine {
        /// 1-based line number.
        line: usize,

        /// What was wrong with the record.
        message: String,
    },

    /// A configuration value could not be used.
    #[error("invalid config value {key}={value:?}: {message}")]
    Config {
        /// The config key.
        key: &'static str,

        /// The rejected value.
        value: String,

        /// Why it was rejected.
        message: String,
    },

    /// A written vocabulary did not match its source.
    #[error("verification failed: {message}")]
    Verify {
        /// Description of the mismatch.
        message: String,
    },
}

impl VocabConvError {
    /// Build a [`VocabConvError::Io`] for `path`.
    pub fn io<P: Into<PathBuf>>(
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify a `serde_json` error as malformed input or a bad document shape.
    pub fn from_json(source: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match source.classify() {
            Category::Data => Self::Schema { source },
            Category::Io | Category::Syntax | Category::Eof => Self::Json { source },
        }
    }
}
