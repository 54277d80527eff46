//! Error types for region expansion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur around the expansion engine.
///
/// The geometric path itself is total: degenerate input produces empty
/// results, not errors. These variants cover parameter validation and
/// debug export only.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// Non-positive total expansion distance.
    #[error("Invalid expansion distance: {0} (must be > 0)")]
    InvalidExpansion(f64),

    /// Non-positive expansion step.
    #[error("Invalid expansion step: {0} (must be > 0)")]
    InvalidStep(f64),

    /// Zero step-count ceiling.
    #[error("Invalid step count: 0 (must be > 0)")]
    InvalidStepCount,

    /// IO error during export.
    #[error("Failed to write to {path}: {source}")]
    IoWrite {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for expansion operations.
pub type ExpandResult<T> = std::result::Result<T, ExpandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpandError::InvalidExpansion(-2.5);
        assert!(format!("{err}").contains("-2.5"));

        let err = ExpandError::InvalidStepCount;
        assert_eq!(format!("{err}"), "Invalid step count: 0 (must be > 0)");
    }
}
