//! Wizard steps
//!
//! A [`Step`] is one page of the wizard. Steps are produced only by the catalog
//! and never mutated; [`StepId`] is the stable identifier used as the key of the
//! validator registry and the ownership table.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::catalog::CatalogError;

/// Stable step identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    PersonalInfo,
    CompanyInfo,
    CurrentSituation,
    CoverageNeeds,
    RiskFactors,
    Preferences,
    VehicleDetails,
    DriverDetails,
    VehicleUsage,
    PropertyDetails,
    SecurityFeatures,
    BusinessOperations,
    BusinessAssets,
    FleetDetails,
    CargoDetails,
    RoutesOperations,
    SchemeDetails,
    MemberDetails,
    CraftDetails,
    OperatorExperience,
    ProjectDetails,
    ContractorDetails,
    SiteRisk,
    LiabilityExposure,
    FarmDetails,
    LivestockCrops,
    ItInfrastructure,
    DataProtection,
    ProfessionalProfile,
    EventDetails,
    VenueDetails,
    TripDetails,
    ItemSchedule,
    Review,
    Disclosure,
    Consent,
}

impl StepId {
    /// Every step id known to the engine
    pub const ALL: [StepId; 36] = [
        StepId::PersonalInfo,
        StepId::CompanyInfo,
        StepId::CurrentSituation,
        StepId::CoverageNeeds,
        StepId::RiskFactors,
        StepId::Preferences,
        StepId::VehicleDetails,
        StepId::DriverDetails,
        StepId::VehicleUsage,
        StepId::PropertyDetails,
        StepId::SecurityFeatures,
        StepId::BusinessOperations,
        StepId::BusinessAssets,
        StepId::FleetDetails,
        StepId::CargoDetails,
        StepId::RoutesOperations,
        StepId::SchemeDetails,
        StepId::MemberDetails,
        StepId::CraftDetails,
        StepId::OperatorExperience,
        StepId::ProjectDetails,
        StepId::ContractorDetails,
        StepId::SiteRisk,
        StepId::LiabilityExposure,
        StepId::FarmDetails,
        StepId::LivestockCrops,
        StepId::ItInfrastructure,
        StepId::DataProtection,
        StepId::ProfessionalProfile,
        StepId::EventDetails,
        StepId::VenueDetails,
        StepId::TripDetails,
        StepId::ItemSchedule,
        StepId::Review,
        StepId::Disclosure,
        StepId::Consent,
    ];

    /// Stable kebab-case identifier
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::PersonalInfo => "personal-info",
            StepId::CompanyInfo => "company-info",
            StepId::CurrentSituation => "current-situation",
            StepId::CoverageNeeds => "coverage-needs",
            StepId::RiskFactors => "risk-factors",
            StepId::Preferences => "preferences",
            StepId::VehicleDetails => "vehicle-details",
            StepId::DriverDetails => "driver-details",
            StepId::VehicleUsage => "vehicle-usage",
            StepId::PropertyDetails => "property-details",
            StepId::SecurityFeatures => "security-features",
            StepId::BusinessOperations => "business-operations",
            StepId::BusinessAssets => "business-assets",
            StepId::FleetDetails => "fleet-details",
            StepId::CargoDetails => "cargo-details",
            StepId::RoutesOperations => "routes-operations",
            StepId::SchemeDetails => "scheme-details",
            StepId::MemberDetails => "member-details",
            StepId::CraftDetails => "craft-details",
            StepId::OperatorExperience => "operator-experience",
            StepId::ProjectDetails => "project-details",
            StepId::ContractorDetails => "contractor-details",
            StepId::SiteRisk => "site-risk",
            StepId::LiabilityExposure => "liability-exposure",
            StepId::FarmDetails => "farm-details",
            StepId::LivestockCrops => "livestock-crops",
            StepId::ItInfrastructure => "it-infrastructure",
            StepId::DataProtection => "data-protection",
            StepId::ProfessionalProfile => "professional-profile",
            StepId::EventDetails => "event-details",
            StepId::VenueDetails => "venue-details",
            StepId::TripDetails => "trip-details",
            StepId::ItemSchedule => "item-schedule",
            StepId::Review => "review",
            StepId::Disclosure => "disclosure",
            StepId::Consent => "consent",
        }
    }

    /// Page title shown by the rendering layer
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            StepId::PersonalInfo => "Personal Information",
            StepId::CompanyInfo => "Company Information",
            StepId::CurrentSituation => "Current Situation",
            StepId::CoverageNeeds => "Coverage Needs",
            StepId::RiskFactors => "Risk Factors",
            StepId::Preferences => "Budget & Preferences",
            StepId::VehicleDetails => "Vehicle Details",
            StepId::DriverDetails => "Driver Details",
            StepId::VehicleUsage => "Vehicle Usage",
            StepId::PropertyDetails => "Property Details",
            StepId::SecurityFeatures => "Security Features",
            StepId::BusinessOperations => "Business Operations",
            StepId::BusinessAssets => "Business Assets",
            StepId::FleetDetails => "Fleet Details",
            StepId::CargoDetails => "Cargo Details",
            StepId::RoutesOperations => "Routes & Operations",
            StepId::SchemeDetails => "Scheme Details",
            StepId::MemberDetails => "Trustees & Members",
            StepId::CraftDetails => "Craft Details",
            StepId::OperatorExperience => "Pilot / Skipper Experience",
            StepId::ProjectDetails => "Project Details",
            StepId::ContractorDetails => "Contractor Details",
            StepId::SiteRisk => "Site Risk",
            StepId::LiabilityExposure => "Liability Exposure",
            StepId::FarmDetails => "Farm Details",
            StepId::LivestockCrops => "Livestock & Crops",
            StepId::ItInfrastructure => "IT Infrastructure",
            StepId::DataProtection => "Data Protection",
            StepId::ProfessionalProfile => "Professional Profile",
            StepId::EventDetails => "Event Details",
            StepId::VenueDetails => "Venue Details",
            StepId::TripDetails => "Trip Details",
            StepId::ItemSchedule => "Item Schedule",
            StepId::Review => "Review",
            StepId::Disclosure => "Disclosure",
            StepId::Consent => "Consent & Signature",
        }
    }

    /// Opaque icon reference for the rendering layer
    #[must_use]
    pub fn icon(&self) -> IconRef {
        IconRef(match self {
            StepId::PersonalInfo => "user",
            StepId::CompanyInfo => "building",
            StepId::CurrentSituation => "file-text",
            StepId::CoverageNeeds => "shield",
            StepId::RiskFactors => "alert-triangle",
            StepId::Preferences => "wallet",
            StepId::VehicleDetails | StepId::VehicleUsage => "car",
            StepId::DriverDetails => "id-card",
            StepId::PropertyDetails => "home",
            StepId::SecurityFeatures => "lock",
            StepId::BusinessOperations | StepId::ProfessionalProfile => "briefcase",
            StepId::BusinessAssets => "package",
            StepId::FleetDetails | StepId::CargoDetails => "truck",
            StepId::RoutesOperations => "map",
            StepId::SchemeDetails => "building-2",
            StepId::MemberDetails => "users",
            StepId::CraftDetails => "plane",
            StepId::OperatorExperience => "compass",
            StepId::ProjectDetails | StepId::ContractorDetails => "hard-hat",
            StepId::SiteRisk => "construction",
            StepId::LiabilityExposure => "scale",
            StepId::FarmDetails | StepId::LivestockCrops => "tractor",
            StepId::ItInfrastructure => "server",
            StepId::DataProtection => "database",
            StepId::EventDetails | StepId::VenueDetails => "calendar",
            StepId::TripDetails => "globe",
            StepId::ItemSchedule => "list",
            StepId::Review => "check-square",
            StepId::Disclosure => "info",
            StepId::Consent => "pen-tool",
        })
    }

    /// Whether the step is one of the terminal review/disclosure/consent steps
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepId::Review | StepId::Disclosure | StepId::Consent)
    }
}

impl Display for StepId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownStep(s.to_string()))
    }
}

/// Opaque icon reference, interpreted only by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IconRef(&'static str);

impl IconRef {
    /// Raw icon name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// One page of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Step {
    /// Stable identifier
    pub id: StepId,
    /// Page title
    pub title: &'static str,
    /// Icon reference
    pub icon: IconRef,
}

impl From<StepId> for Step {
    fn from(id: StepId) -> Self {
        Self {
            id,
            title: id.title(),
            icon: id.icon(),
        }
    }
}

/// Serialized steps are rebuilt from their id alone
#[derive(Deserialize)]
struct StepRepr {
    id: StepId,
}

impl From<StepRepr> for Step {
    fn from(repr: StepRepr) -> Self {
        Step::from(repr.id)
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        StepRepr::deserialize(deserializer).map(Step::from)
    }
}
