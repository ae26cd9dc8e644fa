//! Shared primitives for all Rust crates in dirtrim.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across dirtrim crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested operation is intentionally not implemented.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Filesystem entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns whether the error reports a missing filesystem entry.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn not_found_is_classified_as_not_found() {
        let error = AppError::NotFound("gone".to_owned());
        assert!(error.is_not_found());
    }

    #[test]
    fn validation_is_not_classified_as_not_found() {
        let error = AppError::Validation("bad input".to_owned());
        assert!(!error.is_not_found());
    }

    #[test]
    fn errors_render_their_category_prefix() {
        let error = AppError::Unsupported("recursive truncation".to_owned());
        assert_eq!(
            error.to_string(),
            "unsupported operation: recursive truncation"
        );
    }
}
