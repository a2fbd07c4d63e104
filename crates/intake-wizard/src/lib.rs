//! Intake Wizard
//!
//! Navigation state machine over the category step catalog, gating forward
//! movement on step validation and producing the submission record.
//!
//! # Core Concepts
//!
//! - [`WizardSession`]: explicit session value (category, steps, index, form,
//!   errors, status) owned by the caller
//! - [`WizardController`]: edits and navigation over a session
//! - [`Advance`] / [`Retreat`]: navigation outcomes
//! - [`SubmissionRecord`]: flattened form plus consent, built on the last step
//!
//! # Example
//!
//! ```rust
//! use intake_form::Section;
//! use intake_wizard::{Retreat, WizardController};
//!
//! let controller = WizardController::default();
//! let mut session = controller.start("travel", None).unwrap();
//!
//! // An empty applicant page blocks
//! assert!(controller.advance(&mut session).unwrap().is_blocked());
//! assert!(!session.errors().is_empty());
//!
//! // Editing a field drops its error
//! controller.set_section(&mut session, Section::PersonalInfo, "firstName", "Thandi").unwrap();
//!
//! // Retreat from the first step signals exit
//! assert_eq!(controller.retreat(&mut session).unwrap(), Retreat::Exit);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod session;
pub mod submission;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, DependentFieldPolicy, WizardConfig};
pub use controller::WizardController;
pub use error::{Result, WizardError};
pub use navigation::{Advance, Retreat, StepSummary};
pub use session::{Progress, Representative, SessionStatus, SnapshotError, WizardSession};
pub use submission::{SignatureArtifact, SignatureType, SubmissionRecord};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
