//! Field schema
//!
//! Declares every leaf of the form record: the fixed sections shared by all
//! categories and the category-specific keys of the two open bags
//! (`needsAnalysis.riskFactors` and `insuranceInfo`). The schema decides which
//! paths a session may write and what an empty value looks like; which fields
//! are *required* is decided by the validation rules alone.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::path::FieldPath;
use crate::step::StepId;

/// Value shape of a leaf field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text
    Text,
    /// Numeric input (numeric text is accepted)
    Number,
    /// Checkbox / yes-no toggle
    Bool,
    /// ISO-8601 calendar date (`YYYY-MM-DD`)
    Date,
    /// Single choice from an option list
    Choice,
    /// Multi-select
    List,
}

impl FieldKind {
    /// Whether the kind is stored as text
    #[inline]
    #[must_use]
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Date | FieldKind::Choice)
    }
}

/// Which categories carry a fixed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every category
    All,
    /// Personal (non-business) categories
    Personal,
    /// Business categories
    Business,
    /// Vehicle only
    Vehicle,
    /// Construction only
    Construction,
}

impl Scope {
    /// Check whether the scope covers a category
    #[must_use]
    pub fn applies_to(&self, category: Category) -> bool {
        match self {
            Scope::All => true,
            Scope::Personal => !category.is_business(),
            Scope::Business => category.is_business(),
            Scope::Vehicle => category.has_driver_details(),
            Scope::Construction => category.has_project_fields(),
        }
    }
}

/// Fixed field declaration
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Full path
    pub path: FieldPath,
    /// Value shape
    pub kind: FieldKind,
    /// Categories carrying the field
    pub scope: Scope,
}

const fn def(path: &'static str, kind: FieldKind, scope: Scope) -> FieldDef {
    FieldDef {
        path: FieldPath::from_static(path),
        kind,
        scope,
    }
}

/// Open bags with category-specific keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bag {
    /// `needsAnalysis.riskFactors`
    RiskFactors,
    /// `insuranceInfo`
    InsuranceInfo,
}

impl Bag {
    /// Path of the bag container
    #[must_use]
    pub fn root(&self) -> FieldPath {
        match self {
            Bag::RiskFactors => paths::RISK_FACTORS,
            Bag::InsuranceInfo => paths::INSURANCE_INFO,
        }
    }

    /// Path of a key inside the bag
    #[inline]
    #[must_use]
    pub fn path(&self, key: &str) -> FieldPath {
        self.root().child(key)
    }
}

/// Shorthand for a `needsAnalysis.riskFactors` key path
#[inline]
#[must_use]
pub fn risk(key: &str) -> FieldPath {
    Bag::RiskFactors.path(key)
}

/// Shorthand for an `insuranceInfo` key path
#[inline]
#[must_use]
pub fn info(key: &str) -> FieldPath {
    Bag::InsuranceInfo.path(key)
}

/// Open-bag key declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagFieldDef {
    /// Bag holding the key
    pub bag: Bag,
    /// Key inside the bag
    pub key: &'static str,
    /// Value shape
    pub kind: FieldKind,
    /// Step that collects and validates the key
    pub owner: StepId,
}

impl BagFieldDef {
    /// Full path of the key
    #[inline]
    #[must_use]
    pub fn path(&self) -> FieldPath {
        self.bag.path(self.key)
    }
}

/// Typed constants for the fixed fields
pub mod paths {
    use crate::path::FieldPath;

    macro_rules! field_paths {
        ($($name:ident => $path:literal),* $(,)?) => {
            $(
                #[doc = concat!("`", $path, "`")]
                pub const $name: FieldPath = FieldPath::from_static($path);
            )*
        };
    }

    field_paths! {
        PERSONAL_INFO => "personalInfo",
        COMPANY_INFO => "companyInfo",
        CO_INSURED => "coInsured",
        NEEDS_ANALYSIS => "needsAnalysis",
        CURRENT_SITUATION => "needsAnalysis.currentSituation",
        CLAIMS_HISTORY => "needsAnalysis.currentSituation.claimsHistory",
        COVERAGE_PREFERENCES => "needsAnalysis.coveragePreferences",
        DRIVER_DETAILS => "needsAnalysis.driverDetails",
        RISK_FACTORS => "needsAnalysis.riskFactors",
        BUDGET_PREFERENCES => "needsAnalysis.budgetPreferences",
        INSURANCE_INFO => "insuranceInfo",
        DISCLOSURE => "disclosure",
        CONSENT => "consent",
    }

    /// `personalInfo.*`
    pub mod personal {
        use crate::path::FieldPath;

        field_paths! {
            TITLE => "personalInfo.title",
            FIRST_NAME => "personalInfo.firstName",
            LAST_NAME => "personalInfo.lastName",
            ID_NUMBER => "personalInfo.idNumber",
            DATE_OF_BIRTH => "personalInfo.dateOfBirth",
            EMAIL => "personalInfo.email",
            PHONE => "personalInfo.phone",
            ALTERNATIVE_PHONE => "personalInfo.alternativePhone",
            STREET_ADDRESS => "personalInfo.streetAddress",
            SUBURB => "personalInfo.suburb",
            CITY => "personalInfo.city",
            PROVINCE => "personalInfo.province",
            POSTAL_CODE => "personalInfo.postalCode",
            COUNTRY => "personalInfo.country",
            OTHER_COUNTRY => "personalInfo.otherCountry",
            OCCUPATION => "personalInfo.occupation",
            MARITAL_STATUS => "personalInfo.maritalStatus",
            HAS_CO_INSURED => "personalInfo.hasCoInsured",
        }
    }

    /// `coInsured.*`
    pub mod co_insured {
        use crate::path::FieldPath;

        field_paths! {
            FIRST_NAME => "coInsured.firstName",
            LAST_NAME => "coInsured.lastName",
            ID_NUMBER => "coInsured.idNumber",
            RELATIONSHIP => "coInsured.relationship",
            RELATIONSHIP_OTHER => "coInsured.relationshipOther",
            PHONE => "coInsured.phone",
            EMAIL => "coInsured.email",
            SAME_ADDRESS => "coInsured.sameAddress",
            ADDRESS => "coInsured.address",
            ADDRESS_STREET => "coInsured.address.streetAddress",
            ADDRESS_CITY => "coInsured.address.city",
            ADDRESS_POSTAL_CODE => "coInsured.address.postalCode",
        }
    }

    /// `companyInfo.*`
    pub mod company {
        use crate::path::FieldPath;

        field_paths! {
            COMPANY_NAME => "companyInfo.companyName",
            REGISTRATION_NUMBER => "companyInfo.registrationNumber",
            VAT_NUMBER => "companyInfo.vatNumber",
            INDUSTRY => "companyInfo.industry",
            YEARS_IN_BUSINESS => "companyInfo.yearsInBusiness",
            NUMBER_OF_EMPLOYEES => "companyInfo.numberOfEmployees",
            ANNUAL_TURNOVER => "companyInfo.annualTurnover",
            PHYSICAL_ADDRESS => "companyInfo.physicalAddress",
            POSTAL_CODE => "companyInfo.postalCode",
            BUSINESS_PHONE => "companyInfo.businessPhone",
            BUSINESS_EMAIL => "companyInfo.businessEmail",
            CONTACT_POSITION => "companyInfo.contactPosition",
        }
    }

    /// `needsAnalysis.currentSituation.*`
    pub mod situation {
        use crate::path::FieldPath;

        field_paths! {
            HAS_EXISTING_INSURANCE => "needsAnalysis.currentSituation.hasExistingInsurance",
            CURRENT_PROVIDER => "needsAnalysis.currentSituation.currentProvider",
            CURRENT_PREMIUM => "needsAnalysis.currentSituation.currentPremium",
            POLICY_RENEWAL_DATE => "needsAnalysis.currentSituation.policyRenewalDate",
            REASON_FOR_REVIEW => "needsAnalysis.currentSituation.reasonForReview",
            REASON_FOR_REVIEW_OTHER => "needsAnalysis.currentSituation.reasonForReviewOther",
        }
    }

    /// `needsAnalysis.currentSituation.claimsHistory.*`
    pub mod claims {
        use crate::path::FieldPath;

        field_paths! {
            HAS_CLAIMS_LAST_THREE_YEARS => "needsAnalysis.currentSituation.claimsHistory.hasClaimsLastThreeYears",
            DAMAGE_TYPE => "needsAnalysis.currentSituation.claimsHistory.damageType",
            INCIDENT_DESCRIPTION => "needsAnalysis.currentSituation.claimsHistory.incidentDescription",
            NUMBER_OF_CLAIMS => "needsAnalysis.currentSituation.claimsHistory.numberOfClaims",
            TOTAL_CLAIM_AMOUNT => "needsAnalysis.currentSituation.claimsHistory.totalClaimAmount",
            MULTIPLE_CLAIMS_EXPLANATION => "needsAnalysis.currentSituation.claimsHistory.multipleClaimsExplanation",
            LAST_CLAIM_DATE => "needsAnalysis.currentSituation.claimsHistory.lastClaimDate",
        }
    }

    /// `needsAnalysis.coveragePreferences.*`
    pub mod coverage {
        use crate::path::FieldPath;

        field_paths! {
            COVERAGE_TYPE => "needsAnalysis.coveragePreferences.coverageType",
            SUM_INSURED => "needsAnalysis.coveragePreferences.sumInsured",
            EXCESS_PREFERENCE => "needsAnalysis.coveragePreferences.excessPreference",
            ADDITIONAL_COVERS => "needsAnalysis.coveragePreferences.additionalCovers",
            START_DATE => "needsAnalysis.coveragePreferences.startDate",
        }
    }

    /// `needsAnalysis.driverDetails.*`
    pub mod driver {
        use crate::path::FieldPath;

        field_paths! {
            IS_POLICYHOLDER_MAIN_DRIVER => "needsAnalysis.driverDetails.isPolicyholderMainDriver",
            MAIN_DRIVER_NAME => "needsAnalysis.driverDetails.mainDriverName",
            MAIN_DRIVER_ID_NUMBER => "needsAnalysis.driverDetails.mainDriverIdNumber",
            RELATIONSHIP => "needsAnalysis.driverDetails.relationshipToPolicyholder",
            RELATIONSHIP_OTHER => "needsAnalysis.driverDetails.relationshipOther",
            LICENCE_TYPE => "needsAnalysis.driverDetails.licenceType",
            LICENCE_ISSUE_DATE => "needsAnalysis.driverDetails.licenceIssueDate",
            YEARS_LICENSED => "needsAnalysis.driverDetails.yearsLicensed",
            HAS_ACCIDENTS_OR_CONVICTIONS => "needsAnalysis.driverDetails.hasAccidentsOrConvictions",
            CONVICTION_DETAILS => "needsAnalysis.driverDetails.convictionDetails",
            ADDITIONAL_DRIVERS => "needsAnalysis.driverDetails.additionalDrivers",
        }
    }

    /// `needsAnalysis.budgetPreferences.*`
    pub mod budget {
        use crate::path::FieldPath;

        field_paths! {
            MONTHLY_BUDGET => "needsAnalysis.budgetPreferences.monthlyBudget",
            PAYMENT_FREQUENCY => "needsAnalysis.budgetPreferences.paymentFrequency",
            PAYMENT_METHOD => "needsAnalysis.budgetPreferences.preferredPaymentMethod",
            DEBIT_ORDER_DAY => "needsAnalysis.budgetPreferences.debitOrderDay",
            PRIORITIES => "needsAnalysis.budgetPreferences.priorities",
        }
    }

    /// `disclosure.*`
    pub mod disclosure {
        use crate::path::FieldPath;

        field_paths! {
            INFORMATION_ACCURATE => "disclosure.informationAccurate",
            TERMS_ACCEPTED => "disclosure.termsAccepted",
            MATERIAL_FACTS_DISCLOSED => "disclosure.materialFactsDisclosed",
            ADDITIONAL_DISCLOSURES => "disclosure.additionalDisclosures",
        }
    }

    /// `consent.*`
    pub mod consent {
        use crate::path::FieldPath;

        field_paths! {
            CONSENT_GIVEN => "consent.consentGiven",
            DIGITAL_SIGNATURE => "consent.digitalSignature",
            SIGNATURE_TYPE => "consent.signatureType",
            SIGNATURE_FILE_NAME => "consent.signatureFileName",
        }
    }

    /// Construction top-level scalars
    pub mod project {
        use crate::path::FieldPath;

        field_paths! {
            PROJECT_NAME => "projectName",
            PROJECT_DESCRIPTION => "projectDescription",
            CONTRACT_VALUE => "contractValue",
            PROJECT_START_DATE => "projectStartDate",
            PROJECT_END_DATE => "projectEndDate",
            SITE_ADDRESS => "siteAddress",
            SITE_POSTAL_CODE => "sitePostalCode",
        }
    }
}

use FieldKind::{Bool, Choice, Date, List, Number, Text};

/// Fixed fields, in form order
pub static FIXED_FIELDS: &[FieldDef] = &[
    // personalInfo
    def("personalInfo.title", Choice, Scope::All),
    def("personalInfo.firstName", Text, Scope::All),
    def("personalInfo.lastName", Text, Scope::All),
    def("personalInfo.idNumber", Text, Scope::All),
    def("personalInfo.dateOfBirth", Date, Scope::All),
    def("personalInfo.email", Text, Scope::All),
    def("personalInfo.phone", Text, Scope::All),
    def("personalInfo.alternativePhone", Text, Scope::All),
    def("personalInfo.streetAddress", Text, Scope::All),
    def("personalInfo.suburb", Text, Scope::All),
    def("personalInfo.city", Text, Scope::All),
    def("personalInfo.province", Choice, Scope::All),
    def("personalInfo.postalCode", Text, Scope::All),
    def("personalInfo.country", Choice, Scope::All),
    def("personalInfo.otherCountry", Text, Scope::All),
    def("personalInfo.occupation", Text, Scope::All),
    def("personalInfo.maritalStatus", Choice, Scope::All),
    def("personalInfo.hasCoInsured", Bool, Scope::Personal),
    // coInsured (optional record, allocated on first write)
    def("coInsured.firstName", Text, Scope::Personal),
    def("coInsured.lastName", Text, Scope::Personal),
    def("coInsured.idNumber", Text, Scope::Personal),
    def("coInsured.relationship", Choice, Scope::Personal),
    def("coInsured.relationshipOther", Text, Scope::Personal),
    def("coInsured.phone", Text, Scope::Personal),
    def("coInsured.email", Text, Scope::Personal),
    def("coInsured.sameAddress", Bool, Scope::Personal),
    def("coInsured.address.streetAddress", Text, Scope::Personal),
    def("coInsured.address.city", Text, Scope::Personal),
    def("coInsured.address.postalCode", Text, Scope::Personal),
    // companyInfo
    def("companyInfo.companyName", Text, Scope::Business),
    def("companyInfo.registrationNumber", Text, Scope::Business),
    def("companyInfo.vatNumber", Text, Scope::Business),
    def("companyInfo.industry", Choice, Scope::Business),
    def("companyInfo.yearsInBusiness", Number, Scope::Business),
    def("companyInfo.numberOfEmployees", Number, Scope::Business),
    def("companyInfo.annualTurnover", Number, Scope::Business),
    def("companyInfo.physicalAddress", Text, Scope::Business),
    def("companyInfo.postalCode", Text, Scope::Business),
    def("companyInfo.businessPhone", Text, Scope::Business),
    def("companyInfo.businessEmail", Text, Scope::Business),
    def("companyInfo.contactPosition", Text, Scope::Business),
    // needsAnalysis.currentSituation
    def("needsAnalysis.currentSituation.hasExistingInsurance", Bool, Scope::All),
    def("needsAnalysis.currentSituation.currentProvider", Text, Scope::All),
    def("needsAnalysis.currentSituation.currentPremium", Number, Scope::All),
    def("needsAnalysis.currentSituation.policyRenewalDate", Date, Scope::All),
    def("needsAnalysis.currentSituation.reasonForReview", Choice, Scope::All),
    def("needsAnalysis.currentSituation.reasonForReviewOther", Text, Scope::All),
    def("needsAnalysis.currentSituation.claimsHistory.hasClaimsLastThreeYears", Bool, Scope::All),
    def("needsAnalysis.currentSituation.claimsHistory.damageType", Choice, Scope::All),
    def("needsAnalysis.currentSituation.claimsHistory.incidentDescription", Text, Scope::All),
    def("needsAnalysis.currentSituation.claimsHistory.numberOfClaims", Number, Scope::All),
    def("needsAnalysis.currentSituation.claimsHistory.totalClaimAmount", Number, Scope::All),
    def("needsAnalysis.currentSituation.claimsHistory.multipleClaimsExplanation", Text, Scope::All),
    def("needsAnalysis.currentSituation.claimsHistory.lastClaimDate", Date, Scope::All),
    // needsAnalysis.coveragePreferences
    def("needsAnalysis.coveragePreferences.coverageType", Choice, Scope::All),
    def("needsAnalysis.coveragePreferences.sumInsured", Number, Scope::All),
    def("needsAnalysis.coveragePreferences.excessPreference", Choice, Scope::All),
    def("needsAnalysis.coveragePreferences.additionalCovers", List, Scope::All),
    def("needsAnalysis.coveragePreferences.startDate", Date, Scope::All),
    // needsAnalysis.driverDetails
    def("needsAnalysis.driverDetails.isPolicyholderMainDriver", Bool, Scope::Vehicle),
    def("needsAnalysis.driverDetails.mainDriverName", Text, Scope::Vehicle),
    def("needsAnalysis.driverDetails.mainDriverIdNumber", Text, Scope::Vehicle),
    def("needsAnalysis.driverDetails.relationshipToPolicyholder", Choice, Scope::Vehicle),
    def("needsAnalysis.driverDetails.relationshipOther", Text, Scope::Vehicle),
    def("needsAnalysis.driverDetails.licenceType", Choice, Scope::Vehicle),
    def("needsAnalysis.driverDetails.licenceIssueDate", Date, Scope::Vehicle),
    def("needsAnalysis.driverDetails.yearsLicensed", Number, Scope::Vehicle),
    def("needsAnalysis.driverDetails.hasAccidentsOrConvictions", Bool, Scope::Vehicle),
    def("needsAnalysis.driverDetails.convictionDetails", Text, Scope::Vehicle),
    def("needsAnalysis.driverDetails.additionalDrivers", Number, Scope::Vehicle),
    // needsAnalysis.budgetPreferences
    def("needsAnalysis.budgetPreferences.monthlyBudget", Number, Scope::All),
    def("needsAnalysis.budgetPreferences.paymentFrequency", Choice, Scope::All),
    def("needsAnalysis.budgetPreferences.preferredPaymentMethod", Choice, Scope::All),
    def("needsAnalysis.budgetPreferences.debitOrderDay", Number, Scope::All),
    def("needsAnalysis.budgetPreferences.priorities", List, Scope::All),
    // disclosure
    def("disclosure.informationAccurate", Bool, Scope::All),
    def("disclosure.termsAccepted", Bool, Scope::All),
    def("disclosure.materialFactsDisclosed", Bool, Scope::All),
    def("disclosure.additionalDisclosures", Text, Scope::All),
    // consent
    def("consent.consentGiven", Bool, Scope::All),
    def("consent.digitalSignature", Text, Scope::All),
    def("consent.signatureType", Choice, Scope::All),
    def("consent.signatureFileName", Text, Scope::All),
    // construction project scalars
    def("projectName", Text, Scope::Construction),
    def("projectDescription", Text, Scope::Construction),
    def("contractValue", Number, Scope::Construction),
    def("projectStartDate", Date, Scope::Construction),
    def("projectEndDate", Date, Scope::Construction),
    def("siteAddress", Text, Scope::Construction),
    def("sitePostalCode", Text, Scope::Construction),
];

/// Records that exist only once the applicant opts in (first write allocates them)
pub static OPTIONAL_RECORDS: &[FieldPath] = &[paths::CO_INSURED];

const fn r(key: &'static str, kind: FieldKind, owner: StepId) -> BagFieldDef {
    BagFieldDef {
        bag: Bag::RiskFactors,
        key,
        kind,
        owner,
    }
}

const fn i(key: &'static str, kind: FieldKind, owner: StepId) -> BagFieldDef {
    BagFieldDef {
        bag: Bag::InsuranceInfo,
        key,
        kind,
        owner,
    }
}

use StepId as S;

static VEHICLE_BAG: &[BagFieldDef] = &[
    r("previousClaims", Choice, S::RiskFactors),
    r("exactClaimCount", Number, S::RiskFactors),
    r("overnightParking", Choice, S::RiskFactors),
    r("trackingDevice", Bool, S::RiskFactors),
    r("immobiliser", Bool, S::RiskFactors),
    i("vehicleMake", Text, S::VehicleDetails),
    i("vehicleModel", Text, S::VehicleDetails),
    i("vehicleYear", Number, S::VehicleDetails),
    i("registrationNumber", Text, S::VehicleDetails),
    i("vinNumber", Text, S::VehicleDetails),
    i("vehicleValue", Number, S::VehicleDetails),
    i("financed", Bool, S::VehicleDetails),
    i("financeHouse", Text, S::VehicleDetails),
    i("vehicleUse", Choice, S::VehicleUsage),
    i("annualKilometres", Number, S::VehicleUsage),
    i("businessUseDescription", Text, S::VehicleUsage),
];

static PROPERTY_BAG: &[BagFieldDef] = &[
    r("constructionType", Choice, S::RiskFactors),
    r("roofType", Choice, S::RiskFactors),
    r("propertyOccupancy", Choice, S::RiskFactors),
    r("floodRisk", Bool, S::RiskFactors),
    i("propertyType", Choice, S::PropertyDetails),
    i("propertyAddress", Text, S::PropertyDetails),
    i("propertyPostalCode", Text, S::PropertyDetails),
    i("buildingValue", Number, S::PropertyDetails),
    i("contentsValue", Number, S::PropertyDetails),
    i("ownership", Choice, S::PropertyDetails),
    i("bondHolder", Text, S::PropertyDetails),
    r("alarmSystem", Bool, S::SecurityFeatures),
    r("armedResponse", Bool, S::SecurityFeatures),
    r("armedResponseProvider", Text, S::SecurityFeatures),
    r("burglarBars", Bool, S::SecurityFeatures),
    r("securityGates", Bool, S::SecurityFeatures),
    r("electricFence", Bool, S::SecurityFeatures),
];

static BUSINESS_BAG: &[BagFieldDef] = &[
    r("premisesType", Choice, S::RiskFactors),
    r("fireProtection", List, S::RiskFactors),
    r("hazardousMaterials", Bool, S::RiskFactors),
    r("hazardousMaterialsDetails", Text, S::RiskFactors),
    i("businessDescription", Text, S::BusinessOperations),
    i("operatingHours", Text, S::BusinessOperations),
    i("premisesOwnership", Choice, S::BusinessOperations),
    i("tradingSince", Date, S::BusinessOperations),
    i("buildingsValue", Number, S::BusinessAssets),
    i("stockValue", Number, S::BusinessAssets),
    i("equipmentValue", Number, S::BusinessAssets),
    i("businessInterruptionCover", Bool, S::BusinessAssets),
    i("grossProfit", Number, S::BusinessAssets),
];

static TRANSPORT_BAG: &[BagFieldDef] = &[
    r("previousClaims", Choice, S::RiskFactors),
    r("exactClaimCount", Number, S::RiskFactors),
    r("goodsType", Choice, S::RiskFactors),
    r("hazardousGoods", Bool, S::RiskFactors),
    r("hazardousGoodsClass", Choice, S::RiskFactors),
    i("numberOfVehicles", Number, S::FleetDetails),
    i("fleetValue", Number, S::FleetDetails),
    i("vehicleTypes", List, S::FleetDetails),
    i("trackingInstalled", Bool, S::FleetDetails),
    i("fleetManagerName", Text, S::FleetDetails),
    i("cargoType", Choice, S::CargoDetails),
    i("maxLoadValue", Number, S::CargoDetails),
    i("refrigerated", Bool, S::CargoDetails),
    i("operatingRadius", Choice, S::RoutesOperations),
    i("crossBorder", Bool, S::RoutesOperations),
    i("crossBorderCountries", List, S::RoutesOperations),
];

static SCHEME_BAG: &[BagFieldDef] = &[
    r("buildingAge", Number, S::RiskFactors),
    r("numberOfUnits", Number, S::RiskFactors),
    r("fireEquipmentServiced", Bool, S::RiskFactors),
    r("securityMeasures", List, S::RiskFactors),
    i("schemeName", Text, S::SchemeDetails),
    i("schemeType", Choice, S::SchemeDetails),
    i("replacementValue", Number, S::SchemeDetails),
    i("managingAgent", Text, S::SchemeDetails),
    i("csosRegistered", Bool, S::SchemeDetails),
    i("trusteeCount", Number, S::MemberDetails),
    i("chairpersonName", Text, S::MemberDetails),
    i("chairpersonPhone", Text, S::MemberDetails),
    i("chairpersonEmail", Text, S::MemberDetails),
];

static AVIATION_MARINE_BAG: &[BagFieldDef] = &[
    r("craftType", Choice, S::RiskFactors),
    r("storageLocation", Choice, S::RiskFactors),
    r("commercialUse", Bool, S::RiskFactors),
    r("commercialUseDetails", Text, S::RiskFactors),
    i("craftMake", Text, S::CraftDetails),
    i("craftModel", Text, S::CraftDetails),
    i("craftYear", Number, S::CraftDetails),
    i("craftValue", Number, S::CraftDetails),
    i("registrationMark", Text, S::CraftDetails),
    i("homeBase", Text, S::CraftDetails),
    i("operatorLicence", Choice, S::OperatorExperience),
    i("operatorHours", Number, S::OperatorExperience),
    i("incidentsLastFiveYears", Bool, S::OperatorExperience),
    i("incidentDetails", Text, S::OperatorExperience),
];

static CONSTRUCTION_BAG: &[BagFieldDef] = &[
    r("siteSecurity", Choice, S::RiskFactors),
    r("adjacentStructures", Bool, S::RiskFactors),
    r("adjacentStructuresDetails", Text, S::RiskFactors),
    i("principalName", Text, S::ContractorDetails),
    i("contractType", Choice, S::ContractorDetails),
    i("subcontractorsUsed", Bool, S::ContractorDetails),
    i("subcontractorCount", Number, S::ContractorDetails),
    r("excavationDepth", Number, S::SiteRisk),
    r("workAtHeight", Bool, S::SiteRisk),
    r("maxWorkingHeight", Number, S::SiteRisk),
];

static LIABILITY_BAG: &[BagFieldDef] = &[
    r("publicAccess", Bool, S::RiskFactors),
    r("dailyVisitors", Number, S::RiskFactors),
    r("previousLiabilityClaims", Bool, S::RiskFactors),
    i("limitOfIndemnity", Number, S::LiabilityExposure),
    i("productsSold", Bool, S::LiabilityExposure),
    i("productDescription", Text, S::LiabilityExposure),
    i("contractualLiability", Bool, S::LiabilityExposure),
];

static AGRICULTURE_BAG: &[BagFieldDef] = &[
    r("fireBreaks", Bool, S::RiskFactors),
    r("irrigation", Bool, S::RiskFactors),
    r("droughtExposure", Choice, S::RiskFactors),
    i("farmSize", Number, S::FarmDetails),
    i("farmType", Choice, S::FarmDetails),
    i("district", Text, S::FarmDetails),
    i("livestockCount", Number, S::LivestockCrops),
    i("livestockValue", Number, S::LivestockCrops),
    i("cropTypes", List, S::LivestockCrops),
    i("cropValue", Number, S::LivestockCrops),
];

static CYBER_BAG: &[BagFieldDef] = &[
    r("previousBreach", Bool, S::RiskFactors),
    r("breachDetails", Text, S::RiskFactors),
    r("mfaEnabled", Bool, S::RiskFactors),
    r("backupFrequency", Choice, S::RiskFactors),
    i("numberOfEndpoints", Number, S::ItInfrastructure),
    i("cloudProvider", Choice, S::ItInfrastructure),
    i("recordsHeld", Number, S::ItInfrastructure),
    i("informationOfficer", Text, S::DataProtection),
    i("popiaCompliant", Bool, S::DataProtection),
    i("encryptionAtRest", Bool, S::DataProtection),
    i("incidentResponsePlan", Bool, S::DataProtection),
    i("lastAuditDate", Date, S::DataProtection),
];

static PROFESSIONAL_INDEMNITY_BAG: &[BagFieldDef] = &[
    r("previousComplaints", Bool, S::RiskFactors),
    r("complaintsDetails", Text, S::RiskFactors),
    r("qualityControls", Choice, S::RiskFactors),
    i("profession", Choice, S::ProfessionalProfile),
    i("professionalBody", Text, S::ProfessionalProfile),
    i("professionalRegistrationNumber", Text, S::ProfessionalProfile),
    i("yearsPracticing", Number, S::ProfessionalProfile),
    i("feeIncome", Number, S::ProfessionalProfile),
];

static EVENTS_BAG: &[BagFieldDef] = &[
    r("alcoholServed", Bool, S::RiskFactors),
    r("securityProvider", Text, S::RiskFactors),
    r("expectedAttendance", Number, S::RiskFactors),
    i("eventName", Text, S::EventDetails),
    i("eventType", Choice, S::EventDetails),
    i("eventDate", Date, S::EventDetails),
    i("eventDurationDays", Number, S::EventDetails),
    i("venueName", Text, S::VenueDetails),
    i("venueAddress", Text, S::VenueDetails),
    i("indoor", Bool, S::VenueDetails),
    i("venueCapacity", Number, S::VenueDetails),
];

static TRAVEL_BAG: &[BagFieldDef] = &[
    r("preExistingConditions", Bool, S::RiskFactors),
    r("conditionsDetails", Text, S::RiskFactors),
    r("adventureActivities", Bool, S::RiskFactors),
    i("destination", Text, S::TripDetails),
    i("departureDate", Date, S::TripDetails),
    i("returnDate", Date, S::TripDetails),
    i("travellers", Number, S::TripDetails),
    i("tripPurpose", Choice, S::TripDetails),
];

static PORTABLE_POSSESSIONS_BAG: &[BagFieldDef] = &[
    r("safeInstalled", Bool, S::RiskFactors),
    r("travelsFrequently", Bool, S::RiskFactors),
    r("storageWhenAway", Choice, S::RiskFactors),
    i("itemDescription", Text, S::ItemSchedule),
    i("itemCategory", Choice, S::ItemSchedule),
    i("itemValue", Number, S::ItemSchedule),
    i("serialNumber", Text, S::ItemSchedule),
    i("valuationCertificate", Text, S::ItemSchedule),
];

/// Open-bag keys declared for a category
#[must_use]
pub fn bag_fields(category: Category) -> &'static [BagFieldDef] {
    match category {
        Category::Vehicle => VEHICLE_BAG,
        Category::Property => PROPERTY_BAG,
        Category::Business => BUSINESS_BAG,
        Category::Transport => TRANSPORT_BAG,
        Category::Scheme => SCHEME_BAG,
        Category::AviationMarine => AVIATION_MARINE_BAG,
        Category::Construction => CONSTRUCTION_BAG,
        Category::Liability => LIABILITY_BAG,
        Category::Agriculture => AGRICULTURE_BAG,
        Category::Cyber => CYBER_BAG,
        Category::ProfessionalIndemnity => PROFESSIONAL_INDEMNITY_BAG,
        Category::Events => EVENTS_BAG,
        Category::Travel => TRAVEL_BAG,
        Category::PortablePossessions => PORTABLE_POSSESSIONS_BAG,
    }
}

/// Leaf description resolved for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Value shape
    pub kind: FieldKind,
    /// Whether the field lives in an optional record
    pub optional_record: bool,
}

/// Every writable leaf for one category
///
/// Built once per session; lookups are by exact path.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    category: Category,
    fields: IndexMap<FieldPath, FieldSpec>,
}

impl FieldSchema {
    /// Resolve the schema for a category
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        let mut fields = IndexMap::new();
        for def in FIXED_FIELDS.iter().filter(|d| d.scope.applies_to(category)) {
            let optional_record = OPTIONAL_RECORDS.iter().any(|r| r.is_ancestor_of(&def.path));
            fields.insert(
                def.path.clone(),
                FieldSpec {
                    kind: def.kind,
                    optional_record,
                },
            );
        }
        for def in bag_fields(category) {
            fields.insert(
                def.path(),
                FieldSpec {
                    kind: def.kind,
                    optional_record: false,
                },
            );
        }
        Self { category, fields }
    }

    /// Category the schema was resolved for
    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Look up a leaf
    #[inline]
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&FieldSpec> {
        self.fields.get(path)
    }

    /// Check whether a leaf is declared
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.fields.contains_key(path)
    }

    /// Iterate over leaves in form order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldSpec)> {
        self.fields.iter()
    }

    /// Leaves allocated when a session starts
    pub fn preallocated(&self) -> impl Iterator<Item = (&FieldPath, FieldKind)> {
        self.fields
            .iter()
            .filter(|(_, spec)| !spec.optional_record)
            .map(|(path, spec)| (path, spec.kind))
    }

    /// Number of declared leaves
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no leaves are declared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
