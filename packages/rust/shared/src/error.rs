//! Error types for tocsmith.
//!
//! Library crates use [`TocError`] via `thiserror`. The outline builder is
//! the only fallible stage; everything else in the pipeline recovers
//! transparently (missing identifiers are generated, an empty heading
//! sequence yields an empty outline, an absent marker falls back to
//! prepending).

/// Top-level error type for all tocsmith operations.
#[derive(Debug, thiserror::Error)]
pub enum TocError {
    /// The outline builder's internal stack invariant was broken.
    ///
    /// Raised when the heading sequence is inconsistent with document order,
    /// including a record whose depth lies outside `1..=6`. This is a
    /// programming or input-data error, not a user-recoverable one; it is
    /// never caught inside the library.
    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TocError>;

impl TocError {
    /// Create an invariant-violation error from any displayable message.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = TocError::invariant("outline stack underflow at depth 2");
        assert_eq!(
            err.to_string(),
            "invariant violation: outline stack underflow at depth 2"
        );
    }
}
