//! Product categories
//!
//! A [`Category`] is fixed when a wizard session starts and selects the step
//! catalog, the open-bag field schema and the validation rules for that session.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::catalog::CatalogError;

/// Product category driving a wizard session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Private motor vehicle
    Vehicle,
    /// Home buildings and contents
    Property,
    /// Commercial business package
    Business,
    /// Fleet and goods in transit
    Transport,
    /// Sectional title scheme / body corporate
    Scheme,
    /// Aircraft and watercraft
    AviationMarine,
    /// Contract works and construction projects
    Construction,
    /// Public and products liability
    Liability,
    /// Farming operations
    Agriculture,
    /// Cyber and data breach
    Cyber,
    /// Professional indemnity
    ProfessionalIndemnity,
    /// Event cancellation and liability
    Events,
    /// Travel
    Travel,
    /// Specified portable possessions
    PortablePossessions,
}

impl Category {
    /// Every category, in catalog order
    pub const ALL: [Category; 14] = [
        Category::Vehicle,
        Category::Property,
        Category::Business,
        Category::Transport,
        Category::Scheme,
        Category::AviationMarine,
        Category::Construction,
        Category::Liability,
        Category::Agriculture,
        Category::Cyber,
        Category::ProfessionalIndemnity,
        Category::Events,
        Category::Travel,
        Category::PortablePossessions,
    ];

    /// Stable kebab-case identifier
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vehicle => "vehicle",
            Category::Property => "property",
            Category::Business => "business",
            Category::Transport => "transport",
            Category::Scheme => "scheme",
            Category::AviationMarine => "aviation-marine",
            Category::Construction => "construction",
            Category::Liability => "liability",
            Category::Agriculture => "agriculture",
            Category::Cyber => "cyber",
            Category::ProfessionalIndemnity => "professional-indemnity",
            Category::Events => "events",
            Category::Travel => "travel",
            Category::PortablePossessions => "portable-possessions",
        }
    }

    /// Human-readable product name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Vehicle => "Vehicle Insurance",
            Category::Property => "Property Insurance",
            Category::Business => "Business Insurance",
            Category::Transport => "Transport & Fleet Insurance",
            Category::Scheme => "Scheme Insurance",
            Category::AviationMarine => "Aviation & Marine Insurance",
            Category::Construction => "Construction & Engineering Insurance",
            Category::Liability => "Liability Insurance",
            Category::Agriculture => "Agricultural Insurance",
            Category::Cyber => "Cyber Insurance",
            Category::ProfessionalIndemnity => "Professional Indemnity Insurance",
            Category::Events => "Event Insurance",
            Category::Travel => "Travel Insurance",
            Category::PortablePossessions => "Portable Possessions Insurance",
        }
    }

    /// Whether the applicant is a business (collects company info)
    #[must_use]
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            Category::Business
                | Category::Transport
                | Category::Scheme
                | Category::Construction
                | Category::Liability
                | Category::Agriculture
                | Category::Cyber
                | Category::ProfessionalIndemnity
                | Category::Events
        )
    }

    /// Whether the session carries a driver details sub-record
    #[inline]
    #[must_use]
    pub fn has_driver_details(&self) -> bool {
        matches!(self, Category::Vehicle)
    }

    /// Whether the session carries top-level project fields
    #[inline]
    #[must_use]
    pub fn has_project_fields(&self) -> bool {
        matches!(self, Category::Construction)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| CatalogError::InvalidCategory(s.to_string()))
    }
}
