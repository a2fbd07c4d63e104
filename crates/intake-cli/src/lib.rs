//! Intake CLI
//!
//! Scenario replay over the intake wizard: print a category's steps, check a
//! scenario's form against every step, or drive a session through a scripted
//! sequence of edits and navigation.
//!
//! # Example
//!
//! ```rust
//! use intake_cli::{replay, Scenario};
//! use intake_wizard::WizardConfig;
//!
//! let scenario = Scenario::from_json_str(
//!     r#"{"category":"travel","actions":[{"action":"advance"}]}"#,
//! ).unwrap();
//! let replayed = replay(&scenario.controller(WizardConfig::default()), &scenario).unwrap();
//! assert!(replayed.last_blocked().is_some());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod report;
pub mod scenario;

pub use config::load_config;
pub use report::{all_valid, write_replay, write_steps, write_validation};
pub use scenario::{replay, validate, Action, Replay, ReplayEvent, Scenario, ScenarioError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
