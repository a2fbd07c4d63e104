//! Intake Schema
//!
//! Static description of the intake wizard: product categories, the ordered
//! step catalog, typed field paths, the field schema and step ownership.
//!
//! # Core Concepts
//!
//! - [`Category`]: closed set of product categories
//! - [`steps`]: deterministic step sequence per category
//! - [`FieldPath`]: dotted path addressing one leaf of the form record
//! - [`FieldSchema`]: legal leaves (fixed sections + open-bag keys) per category
//! - [`OwnershipTable`]: which step owns which paths
//!
//! # Example
//!
//! ```rust
//! use intake_schema::{steps, Category, StepId};
//!
//! let catalog = steps(Category::Vehicle);
//! assert_eq!(catalog.first().map(|s| s.id), Some(StepId::PersonalInfo));
//! assert_eq!(catalog.last().map(|s| s.id), Some(StepId::Consent));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalog;
pub mod category;
pub mod fields;
pub mod ownership;
pub mod path;
pub mod step;

pub use catalog::{applicant_step, category_steps, step_ids, steps, steps_for_id, CatalogError};
pub use category::Category;
pub use fields::{
    bag_fields, info, paths, risk, Bag, BagFieldDef, FieldDef, FieldKind, FieldSchema, FieldSpec,
    Scope,
};
pub use ownership::{OwnershipError, OwnershipTable};
pub use path::{FieldPath, PathError};
pub use step::{IconRef, Step, StepId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
