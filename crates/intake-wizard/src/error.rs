//! Error types for the wizard controller
//!
//! Validation failures are data (entries in the session's error map) and
//! never surface here. [`WizardError`] covers integration mistakes: writing an
//! undeclared field, navigating out of range, touching a submitted session.

use intake_form::FormError;
use intake_schema::{CatalogError, Category, PathError};
use uuid::Uuid;

use crate::config::ConfigError;

/// Main wizard error type
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Session already reached its terminal state
    #[error("session {0} has already been submitted")]
    AlreadySubmitted(Uuid),

    /// Step index outside the session's catalog
    #[error("step index {index} out of range (session has {len} steps)")]
    InvalidStepIndex { index: usize, len: usize },

    /// Jump target lies ahead of the current step
    #[error("cannot jump forward from step {from} to step {to}")]
    ForwardJump { from: usize, to: usize },

    /// Backward jumps are disabled by configuration
    #[error("jumping between steps is disabled")]
    JumpsDisabled,

    /// Submission attempted without consent and signature
    #[error("consent and a signature are required before submission")]
    MissingConsent,

    /// Unknown category id at session start
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Rejected write
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// Malformed field path
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Controller has no engine for the session's category
    #[error("no validators registered for category {0}")]
    UnsupportedCategory(Category),
}

impl WizardError {
    /// Check whether the caller can fix the input and retry on the same session
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidStepIndex { .. }
                | Self::ForwardJump { .. }
                | Self::MissingConsent
                | Self::Form(_)
                | Self::Path(_)
        )
    }
}

/// Result type for wizard operations
pub type Result<T> = std::result::Result<T, WizardError>;
