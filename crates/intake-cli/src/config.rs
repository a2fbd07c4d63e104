//! Wizard configuration for a command-line run

use intake_wizard::{Result, WizardConfig};
use std::path::Path;

/// Load the wizard configuration from `path`, or use the defaults
///
/// # Errors
/// Returns [`WizardError::Config`](intake_wizard::WizardError::Config) when the
/// file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<WizardConfig> {
    match path {
        Some(path) => {
            let config = WizardConfig::from_file(path)?;
            tracing::debug!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(WizardConfig::default()),
    }
}
