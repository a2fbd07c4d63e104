//! Intake Validation
//!
//! Per-step validation for the intake wizard and the error state built from it.
//!
//! # Core Concepts
//!
//! - [`Rule`]: one check on one field (required, format, range, comparison),
//!   optionally guarded by a [`Condition`]
//! - [`StepValidator`]: validates the fields a step owns; [`ValidatorRegistry`]
//!   holds one per catalog step
//! - [`ErrorMap`]: failing fields keyed by path
//! - [`ErrorStateManager`]: merges results and clears errors scoped to a step
//! - [`deactivated`]: dependent fields whose guards an edit switched off
//!
//! # Example
//!
//! ```rust
//! use intake_form::FormState;
//! use intake_schema::{paths, Category, StepId};
//! use intake_validation::{ErrorKind, ValidatorRegistry};
//!
//! let registry = ValidatorRegistry::for_category(Category::Travel);
//! let form = FormState::for_category(Category::Travel);
//!
//! let errors = registry.validate(StepId::PersonalInfo, &form);
//! let first_name = errors.get(&paths::personal::FIRST_NAME).unwrap();
//! assert_eq!(first_name.kind, ErrorKind::MissingRequired);
//! assert_eq!(first_name.message, "First name is required");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod dependents;
pub mod error_map;
pub mod error_state;
pub mod formats;
pub mod registry;
pub mod rules;
pub mod steps;

pub use dependents::deactivated;
pub use error_map::{ErrorKind, ErrorMap, FieldError};
pub use error_state::ErrorStateManager;
pub use formats::Format;
pub use registry::{validate, RuleSetValidator, StepValidator, ValidatorRegistry};
pub use rules::{evaluate_all, humanize, Bound, Bounds, Check, Condition, Guard, GuardKind, Rule};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
