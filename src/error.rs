//! Error types for the helm-v2-cleanup CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::commands::cleanup::Phase;
use crate::exit_codes;
use thiserror::Error;

/// Main error type for cleanup operations.
///
/// Each variant maps to a specific exit code via [`CleanupError::exit_code`].
#[derive(Error, Debug)]
pub enum CleanupError {
    /// User provided invalid arguments or settings.
    #[error("{0}")]
    UserError(String),

    /// The requested cleanup options contradict each other.
    #[error("{0}")]
    ValidationError(String),

    /// The confirmation prompt could not be written or read.
    #[error("failed to read confirmation: {0}")]
    PromptError(#[from] std::io::Error),

    /// Stored release versions could not be enumerated.
    #[error("failed to look up release versions: {0}")]
    LookupError(String),

    /// Removal of release data, Tiller, or the configuration folder failed.
    #[error("{0}")]
    DeletionError(String),

    /// A cleanup phase failed after zero or more earlier phases had already
    /// committed their changes.
    #[error("{phase} cleanup failed: {source}. {}", completed_summary(.completed))]
    PhaseFailed {
        phase: Phase,
        completed: Vec<Phase>,
        source: Box<CleanupError>,
    },
}

impl CleanupError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CleanupError::UserError(_) => exit_codes::USER_ERROR,
            CleanupError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            CleanupError::PromptError(_) => exit_codes::USER_ERROR,
            CleanupError::LookupError(_) => exit_codes::CLEANUP_FAILURE,
            CleanupError::DeletionError(_) => exit_codes::CLEANUP_FAILURE,
            CleanupError::PhaseFailed { source, .. } => source.exit_code(),
        }
    }
}

fn completed_summary(completed: &[Phase]) -> String {
    if completed.is_empty() {
        return "No cleanup phase completed before the failure".to_string();
    }
    let names: Vec<String> = completed.iter().map(|p| p.to_string()).collect();
    format!(
        "Completed before the failure: {}; resume the remaining cleanup manually",
        names.join(", ")
    )
}

/// Result type alias for cleanup operations.
pub type Result<T> = std::result::Result<T, CleanupError>;
