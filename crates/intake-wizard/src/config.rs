//! Controller configuration
//!
//! [`WizardConfig`] is plain data with builder-style setters. It can be loaded
//! from TOML:
//!
//! ```toml
//! dependent_field_policy = "clear-on-deactivate"
//! clear_error_on_edit = true
//! allow_backward_jumps = true
//! validate_on_edit = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What happens to a dependent field when its guard switches off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependentFieldPolicy {
    /// Reset the field to its empty value and drop its error
    #[default]
    ClearOnDeactivate,
    /// Keep the stale value
    Retain,
}

/// Wizard controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Dependent-field handling on edits
    pub dependent_field_policy: DependentFieldPolicy,
    /// Drop the edited field's error on every write
    pub clear_error_on_edit: bool,
    /// Allow `go_to` to revisit earlier steps
    pub allow_backward_jumps: bool,
    /// Revalidate the current step's entry for the edited field on every write
    pub validate_on_edit: bool,
}

impl WizardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With dependent-field policy
    #[inline]
    #[must_use]
    pub fn with_dependent_field_policy(mut self, policy: DependentFieldPolicy) -> Self {
        self.dependent_field_policy = policy;
        self
    }

    /// With error clearing on edit
    #[inline]
    #[must_use]
    pub fn with_clear_error_on_edit(mut self, enabled: bool) -> Self {
        self.clear_error_on_edit = enabled;
        self
    }

    /// With backward jumps
    #[inline]
    #[must_use]
    pub fn with_backward_jumps(mut self, enabled: bool) -> Self {
        self.allow_backward_jumps = enabled;
        self
    }

    /// With validation on edit
    #[inline]
    #[must_use]
    pub fn with_validate_on_edit(mut self, enabled: bool) -> Self {
        self.validate_on_edit = enabled;
        self
    }

    /// Parse from a TOML document; missing keys take their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown values.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// - [`ConfigError::Read`] if the file cannot be read
    /// - [`ConfigError::Parse`] if its contents are invalid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            dependent_field_policy: DependentFieldPolicy::ClearOnDeactivate,
            clear_error_on_edit: true,
            allow_backward_jumps: true,
            validate_on_edit: false,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Contents are not a valid configuration
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WizardConfig::default();
        assert_eq!(config.dependent_field_policy, DependentFieldPolicy::ClearOnDeactivate);
        assert!(config.clear_error_on_edit);
        assert!(config.allow_backward_jumps);
        assert!(!config.validate_on_edit);
    }

    #[test]
    fn builder() {
        let config = WizardConfig::new()
            .with_dependent_field_policy(DependentFieldPolicy::Retain)
            .with_backward_jumps(false)
            .with_validate_on_edit(true)
            .with_clear_error_on_edit(false);
        assert_eq!(config.dependent_field_policy, DependentFieldPolicy::Retain);
        assert!(!config.allow_backward_jumps);
        assert!(config.validate_on_edit);
        assert!(!config.clear_error_on_edit);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = WizardConfig::from_toml_str("dependent_field_policy = \"retain\"\n").unwrap();
        assert_eq!(config.dependent_field_policy, DependentFieldPolicy::Retain);
        assert!(config.clear_error_on_edit);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = WizardConfig::from_toml_str("dependent_field_policy = \"forget\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = WizardConfig::from_file("/nonexistent/intake.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
