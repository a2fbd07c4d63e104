//! Category step catalog
//!
//! [`steps`] derives the ordered page sequence for a category. The baseline
//! sequence is the same for every category; 1-4 category-specific pages are
//! inserted between the needs-analysis pages and the terminal
//! review/disclosure/consent pages.

use crate::category::Category;
use crate::step::{Step, StepId};

/// Needs-analysis pages shared by every category, after the applicant page
const NEEDS_STEPS: [StepId; 4] = [
    StepId::CurrentSituation,
    StepId::CoverageNeeds,
    StepId::RiskFactors,
    StepId::Preferences,
];

/// Terminal pages shared by every category
const TERMINAL_STEPS: [StepId; 3] = [StepId::Review, StepId::Disclosure, StepId::Consent];

/// Applicant page for a category
#[inline]
#[must_use]
pub fn applicant_step(category: Category) -> StepId {
    if category.is_business() {
        StepId::CompanyInfo
    } else {
        StepId::PersonalInfo
    }
}

/// Category-specific pages, in order
#[must_use]
pub fn category_steps(category: Category) -> &'static [StepId] {
    match category {
        Category::Vehicle => &[
            StepId::VehicleDetails,
            StepId::DriverDetails,
            StepId::VehicleUsage,
        ],
        Category::Property => &[StepId::PropertyDetails, StepId::SecurityFeatures],
        Category::Business => &[StepId::BusinessOperations, StepId::BusinessAssets],
        Category::Transport => &[
            StepId::FleetDetails,
            StepId::CargoDetails,
            StepId::RoutesOperations,
        ],
        Category::Scheme => &[StepId::SchemeDetails, StepId::MemberDetails],
        Category::AviationMarine => &[StepId::CraftDetails, StepId::OperatorExperience],
        Category::Construction => &[
            StepId::ProjectDetails,
            StepId::ContractorDetails,
            StepId::SiteRisk,
        ],
        Category::Liability => &[StepId::LiabilityExposure],
        Category::Agriculture => &[StepId::FarmDetails, StepId::LivestockCrops],
        Category::Cyber => &[StepId::ItInfrastructure, StepId::DataProtection],
        Category::ProfessionalIndemnity => &[StepId::ProfessionalProfile],
        Category::Events => &[StepId::EventDetails, StepId::VenueDetails],
        Category::Travel => &[StepId::TripDetails],
        Category::PortablePossessions => &[StepId::ItemSchedule],
    }
}

/// Ordered step ids for a category
#[must_use]
pub fn step_ids(category: Category) -> Vec<StepId> {
    let extra = category_steps(category);
    let mut ids = Vec::with_capacity(1 + NEEDS_STEPS.len() + extra.len() + TERMINAL_STEPS.len());
    ids.push(applicant_step(category));
    ids.extend_from_slice(&NEEDS_STEPS);
    ids.extend_from_slice(extra);
    ids.extend_from_slice(&TERMINAL_STEPS);
    ids
}

/// Ordered steps for a category
///
/// Deterministic and total: every category has a non-empty sequence, and the
/// same category always yields the same ids in the same order.
#[must_use]
pub fn steps(category: Category) -> Vec<Step> {
    step_ids(category).into_iter().map(Step::from).collect()
}

/// Parse a category id and derive its steps
///
/// # Errors
/// Returns [`CatalogError::InvalidCategory`] for an unknown id.
pub fn steps_for_id(category_id: &str) -> Result<Vec<Step>, CatalogError> {
    let category: Category = category_id.parse()?;
    Ok(steps(category))
}

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Category id not in the closed enumeration
    #[error("invalid category: '{0}'")]
    InvalidCategory(String),

    /// Step id not known to the engine
    #[error("unknown step: '{0}'")]
    UnknownStep(String),
}
