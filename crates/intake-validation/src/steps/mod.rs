//! Per-step rule tables
//!
//! [`STEP_RULES`] registers one table builder per [`StepId`]. The validator
//! registry looks each catalog step up here once per category; nothing else
//! dispatches on step ids.

mod applicant;
mod closing;
mod commercial;
mod needs;
mod property;
mod risk;
mod specialty;
mod vehicle;

use intake_schema::{Category, StepId};

use crate::rules::Rule;

/// Builds the rules of one step for a category
pub type RuleTable = fn(Category) -> Vec<Rule>;

/// Registration table: step id to rule builder
pub static STEP_RULES: &[(StepId, RuleTable)] = &[
    (StepId::PersonalInfo, applicant::personal_info),
    (StepId::CompanyInfo, applicant::company_info),
    (StepId::CurrentSituation, needs::current_situation),
    (StepId::CoverageNeeds, needs::coverage_needs),
    (StepId::RiskFactors, risk::risk_factors),
    (StepId::Preferences, needs::preferences),
    (StepId::VehicleDetails, vehicle::vehicle_details),
    (StepId::DriverDetails, vehicle::driver_details),
    (StepId::VehicleUsage, vehicle::vehicle_usage),
    (StepId::PropertyDetails, property::property_details),
    (StepId::SecurityFeatures, property::security_features),
    (StepId::BusinessOperations, commercial::business_operations),
    (StepId::BusinessAssets, commercial::business_assets),
    (StepId::FleetDetails, commercial::fleet_details),
    (StepId::CargoDetails, commercial::cargo_details),
    (StepId::RoutesOperations, commercial::routes_operations),
    (StepId::SchemeDetails, commercial::scheme_details),
    (StepId::MemberDetails, commercial::member_details),
    (StepId::CraftDetails, specialty::craft_details),
    (StepId::OperatorExperience, specialty::operator_experience),
    (StepId::ProjectDetails, specialty::project_details),
    (StepId::ContractorDetails, specialty::contractor_details),
    (StepId::SiteRisk, specialty::site_risk),
    (StepId::LiabilityExposure, commercial::liability_exposure),
    (StepId::FarmDetails, specialty::farm_details),
    (StepId::LivestockCrops, specialty::livestock_crops),
    (StepId::ItInfrastructure, commercial::it_infrastructure),
    (StepId::DataProtection, commercial::data_protection),
    (StepId::ProfessionalProfile, commercial::professional_profile),
    (StepId::EventDetails, specialty::event_details),
    (StepId::VenueDetails, specialty::venue_details),
    (StepId::TripDetails, specialty::trip_details),
    (StepId::ItemSchedule, specialty::item_schedule),
    (StepId::Review, closing::review),
    (StepId::Disclosure, closing::disclosure),
    (StepId::Consent, closing::consent),
];

/// Rules of a step for a category
///
/// Steps without a registered table have no rules.
#[must_use]
pub fn rules_for(step: StepId, category: Category) -> Vec<Rule> {
    STEP_RULES
        .iter()
        .find(|(id, _)| *id == step)
        .map(|(_, table)| table(category))
        .unwrap_or_default()
}
