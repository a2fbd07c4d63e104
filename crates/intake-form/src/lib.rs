//! Intake Form
//!
//! Persistent, structurally shared form record for the intake wizard.
//!
//! # Core Concepts
//!
//! - [`FieldValue`]: leaf or nested record stored at a path
//! - [`FormState`]: immutable tree; every update returns a new state
//! - [`Section`]: named top-level sections
//!
//! # Example
//!
//! ```rust
//! use intake_form::{FieldValue, FormState, Section};
//! use intake_schema::{paths, Category};
//!
//! let before = FormState::for_category(Category::Property);
//! let after = before
//!     .set_section(Section::PersonalInfo, "firstName", "Thandi")
//!     .unwrap();
//!
//! assert_eq!(before.get(&paths::personal::FIRST_NAME), Some(&FieldValue::from("")));
//! assert_eq!(after.get(&paths::personal::FIRST_NAME), Some(&FieldValue::from("Thandi")));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod section;
pub mod state;
pub mod value;

pub use error::{FormError, Result};
pub use section::Section;
pub use state::FormState;
pub use value::{FieldValue, Record};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
