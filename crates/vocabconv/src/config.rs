//! # Converter Configuration

use std::env;

use crate::errors::{VCResult, VocabConvError};

/// The number of leading special-token ranks dropped by default.
pub const DEFAULT_SPECIAL_TOKEN_OFFSET: u64 = 5;

/// Environment variable key to override the default offset.
pub const VOCABCONV_OFFSET: &str = "VOCABCONV_OFFSET";

/// Get the special-token offset.
///
/// The resolution order is:
/// 1. `offset`, if present.
/// 2. [`VOCABCONV_OFFSET`] env var.
/// 3. [`DEFAULT_SPECIAL_TOKEN_OFFSET`].
///
/// A present but unparseable env var is an error, not a fallthrough.
pub fn resolve_offset(offset: Option<u64>) -> VCResult<u64> {
    if let Some(offset) = offset {
        return Ok(offset);
    }

    match env::var(VOCABCONV_OFFSET) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|err| VocabConvError::Config {
                key: VOCABCONV_OFFSET,
                value: value.clone(),
                message: err.to_string(),
            }),
        Err(env::VarError::NotPresent) => Ok(DEFAULT_SPECIAL_TOKEN_OFFSET),
        Err(env::VarError::NotUnicode(value)) => Err(VocabConvError::Config {
            key: VOCABCONV_OFFSET,
            value: value.to_string_lossy().into_owned(),
            message: "not valid unicode".to_string(),
        }),
    }
}
