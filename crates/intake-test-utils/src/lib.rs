//! Testing utilities for the intake workspace
//!
//! Shared fixtures: fully valid forms for every category, applicant data that
//! passes the format checks, and proptest strategies.

#![allow(missing_docs)]

use intake_form::{FieldValue, FormState};
use intake_schema::paths::{
    budget, claims, co_insured, company, consent, coverage, disclosure, driver, personal, project,
    situation,
};
use intake_schema::{info, risk, Category, FieldPath, StepId};
use proptest::prelude::*;

/// ID number with a valid checksum
pub const VALID_ID_NUMBER: &str = "8001015009087";

/// Same digits with a broken check digit
pub const INVALID_ID_NUMBER: &str = "8001015009086";

pub const VALID_PHONE: &str = "0821234567";
pub const VALID_EMAIL: &str = "thandi@example.co.za";
pub const SIGNATURE_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

/// Apply `(path, value)` pairs in order
pub fn fill(form: FormState, fields: Vec<(FieldPath, FieldValue)>) -> FormState {
    fields
        .into_iter()
        .fold(form, |form, (path, value)| form.set_path(&path, value))
}

fn text(s: &str) -> FieldValue {
    FieldValue::from(s)
}

fn num(n: i64) -> FieldValue {
    FieldValue::from(n)
}

fn flag(b: bool) -> FieldValue {
    FieldValue::from(b)
}

fn list(items: &[&str]) -> FieldValue {
    FieldValue::from(items)
}

pub fn contact_person() -> Vec<(FieldPath, FieldValue)> {
    vec![
        (personal::FIRST_NAME, text("Thandi")),
        (personal::LAST_NAME, text("Mokoena")),
        (personal::EMAIL, text(VALID_EMAIL)),
        (personal::PHONE, text(VALID_PHONE)),
        (personal::ID_NUMBER, text(VALID_ID_NUMBER)),
    ]
}

pub fn personal_details() -> Vec<(FieldPath, FieldValue)> {
    let mut fields = contact_person();
    fields.extend([
        (personal::TITLE, text("ms")),
        (personal::DATE_OF_BIRTH, text("1980-01-01")),
        (personal::STREET_ADDRESS, text("12 Kloof Street")),
        (personal::SUBURB, text("Gardens")),
        (personal::CITY, text("Cape Town")),
        (personal::PROVINCE, text("western-cape")),
        (personal::POSTAL_CODE, text("8001")),
        (personal::COUNTRY, text("south-africa")),
    ]);
    fields
}

pub fn company_details() -> Vec<(FieldPath, FieldValue)> {
    let mut fields = contact_person();
    fields.extend([
        (company::COMPANY_NAME, text("Mokoena Holdings (Pty) Ltd")),
        (company::REGISTRATION_NUMBER, text("2015/123456/07")),
        (company::VAT_NUMBER, text("4123456789")),
        (company::INDUSTRY, text("retail")),
        (company::YEARS_IN_BUSINESS, num(8)),
        (company::NUMBER_OF_EMPLOYEES, num(25)),
        (company::ANNUAL_TURNOVER, num(4_500_000)),
        (company::PHYSICAL_ADDRESS, text("4 Rivonia Road, Sandton")),
        (company::POSTAL_CODE, text("2196")),
        (company::BUSINESS_PHONE, text("0721234567")),
        (company::BUSINESS_EMAIL, text("info@mokoena.co.za")),
        (company::CONTACT_POSITION, text("Director")),
    ]);
    fields
}

pub fn needs_analysis() -> Vec<(FieldPath, FieldValue)> {
    vec![
        (situation::HAS_EXISTING_INSURANCE, flag(true)),
        (situation::CURRENT_PROVIDER, text("Santam")),
        (situation::CURRENT_PREMIUM, num(850)),
        (situation::POLICY_RENEWAL_DATE, text("2025-04-01")),
        (situation::REASON_FOR_REVIEW, text("better-price")),
        (claims::HAS_CLAIMS_LAST_THREE_YEARS, flag(false)),
        (coverage::COVERAGE_TYPE, text("comprehensive")),
        (coverage::SUM_INSURED, num(350_000)),
        (coverage::START_DATE, text("2025-03-01")),
        (budget::MONTHLY_BUDGET, num(900)),
        (budget::PAYMENT_FREQUENCY, text("monthly")),
        (budget::PAYMENT_METHOD, text("debit-order")),
        (budget::DEBIT_ORDER_DAY, num(25)),
    ]
}

pub fn declarations() -> Vec<(FieldPath, FieldValue)> {
    vec![
        (disclosure::INFORMATION_ACCURATE, flag(true)),
        (disclosure::MATERIAL_FACTS_DISCLOSED, flag(true)),
        (disclosure::TERMS_ACCEPTED, flag(true)),
    ]
}

pub fn signed_consent() -> Vec<(FieldPath, FieldValue)> {
    vec![
        (consent::CONSENT_GIVEN, flag(true)),
        (consent::DIGITAL_SIGNATURE, text(SIGNATURE_DATA_URL)),
        (consent::SIGNATURE_TYPE, text("drawn")),
    ]
}

/// Risk-factor and category-page values for a category
pub fn category_details(category: Category) -> Vec<(FieldPath, FieldValue)> {
    match category {
        Category::Vehicle => vec![
            (risk("previousClaims"), text("none")),
            (risk("overnightParking"), text("garage")),
            (risk("trackingDevice"), flag(true)),
            (info("vehicleMake"), text("Toyota")),
            (info("vehicleModel"), text("Corolla")),
            (info("vehicleYear"), num(2019)),
            (info("registrationNumber"), text("CA 123-456")),
            (info("vinNumber"), text("JTDBR32E720123456")),
            (info("vehicleValue"), num(245_000)),
            (info("financed"), flag(false)),
            (driver::IS_POLICYHOLDER_MAIN_DRIVER, flag(true)),
            (driver::LICENCE_TYPE, text("code-b")),
            (driver::LICENCE_ISSUE_DATE, text("2001-06-15")),
            (driver::YEARS_LICENSED, num(23)),
            (driver::ADDITIONAL_DRIVERS, num(1)),
            (info("vehicleUse"), text("private")),
            (info("annualKilometres"), num(15_000)),
        ],
        Category::Property => vec![
            (risk("constructionType"), text("brick")),
            (risk("roofType"), text("tile")),
            (risk("propertyOccupancy"), text("owner-occupied")),
            (info("propertyType"), text("house")),
            (info("propertyAddress"), text("12 Kloof Street, Gardens")),
            (info("propertyPostalCode"), text("8001")),
            (info("buildingValue"), num(2_500_000)),
            (info("contentsValue"), num(400_000)),
            (info("ownership"), text("owned")),
            (risk("alarmSystem"), flag(true)),
            (risk("armedResponse"), flag(true)),
            (risk("armedResponseProvider"), text("ADT")),
        ],
        Category::Business => vec![
            (risk("premisesType"), text("retail")),
            (info("businessDescription"), text("Homeware retail")),
            (info("operatingHours"), text("08:00-17:00")),
            (info("premisesOwnership"), text("leased")),
            (info("tradingSince"), text("2016-04-01")),
            (info("stockValue"), num(300_000)),
            (info("businessInterruptionCover"), flag(true)),
            (info("grossProfit"), num(1_200_000)),
        ],
        Category::Transport => vec![
            (risk("previousClaims"), text("none")),
            (risk("goodsType"), text("general")),
            (info("numberOfVehicles"), num(12)),
            (info("fleetValue"), num(9_000_000)),
            (info("vehicleTypes"), list(&["rigid-truck", "light-delivery"])),
            (info("fleetManagerName"), text("Sipho Ndlovu")),
            (info("cargoType"), text("general")),
            (info("maxLoadValue"), num(750_000)),
            (info("operatingRadius"), text("national")),
            (info("crossBorder"), flag(false)),
        ],
        Category::Scheme => vec![
            (risk("buildingAge"), num(12)),
            (risk("numberOfUnits"), num(40)),
            (info("schemeName"), text("Seaview Body Corporate")),
            (info("schemeType"), text("sectional-title")),
            (info("replacementValue"), num(85_000_000)),
            (info("trusteeCount"), num(5)),
            (info("chairpersonName"), text("Lerato Khumalo")),
            (info("chairpersonPhone"), text("0831234567")),
            (info("chairpersonEmail"), text("chair@seaview.co.za")),
        ],
        Category::AviationMarine => vec![
            (risk("craftType"), text("light-aircraft")),
            (risk("storageLocation"), text("hangar")),
            (info("craftMake"), text("Cessna")),
            (info("craftModel"), text("172")),
            (info("craftYear"), num(2008)),
            (info("craftValue"), num(3_200_000)),
            (info("registrationMark"), text("ZS-ABC")),
            (info("operatorLicence"), text("ppl")),
            (info("operatorHours"), num(450)),
            (info("incidentsLastFiveYears"), flag(false)),
        ],
        Category::Construction => vec![
            (risk("siteSecurity"), text("guarded")),
            (project::PROJECT_NAME, text("N2 bridge widening")),
            (project::PROJECT_DESCRIPTION, text("Widening of two spans")),
            (project::CONTRACT_VALUE, num(12_500_000)),
            (project::PROJECT_START_DATE, text("2025-02-01")),
            (project::PROJECT_END_DATE, text("2026-01-31")),
            (project::SITE_ADDRESS, text("N2, Somerset West")),
            (project::SITE_POSTAL_CODE, text("7130")),
            (info("principalName"), text("SANRAL")),
            (info("contractType"), text("jbcc")),
            (info("subcontractorsUsed"), flag(true)),
            (info("subcontractorCount"), num(4)),
            (risk("excavationDepth"), num(3)),
            (risk("workAtHeight"), flag(true)),
            (risk("maxWorkingHeight"), num(18)),
        ],
        Category::Liability => vec![
            (risk("publicAccess"), flag(true)),
            (risk("dailyVisitors"), num(150)),
            (info("limitOfIndemnity"), num(10_000_000)),
            (info("productsSold"), flag(false)),
        ],
        Category::Agriculture => vec![
            (risk("droughtExposure"), text("moderate")),
            (info("farmSize"), num(450)),
            (info("farmType"), text("mixed")),
            (info("district"), text("Swartland")),
            (info("livestockCount"), num(120)),
            (info("livestockValue"), num(1_800_000)),
            (info("cropTypes"), list(&["wheat"])),
            (info("cropValue"), num(950_000)),
        ],
        Category::Cyber => vec![
            (risk("backupFrequency"), text("daily")),
            (risk("mfaEnabled"), flag(true)),
            (info("numberOfEndpoints"), num(60)),
            (info("cloudProvider"), text("azure")),
            (info("recordsHeld"), num(250_000)),
            (info("informationOfficer"), text("Naledi Dube")),
            (info("popiaCompliant"), flag(true)),
            (info("lastAuditDate"), text("2024-09-30")),
        ],
        Category::ProfessionalIndemnity => vec![
            (risk("qualityControls"), text("peer-review")),
            (info("profession"), text("engineer")),
            (info("professionalBody"), text("ECSA")),
            (info("yearsPracticing"), num(14)),
            (info("feeIncome"), num(3_200_000)),
        ],
        Category::Events => vec![
            (risk("expectedAttendance"), num(800)),
            (info("eventName"), text("Winelands Jazz")),
            (info("eventType"), text("festival")),
            (info("eventDate"), text("2025-12-06")),
            (info("eventDurationDays"), num(2)),
            (info("venueName"), text("Spier Amphitheatre")),
            (info("venueAddress"), text("R310, Stellenbosch")),
            (info("venueCapacity"), num(1_200)),
        ],
        Category::Travel => vec![
            (info("destination"), text("Portugal")),
            (info("departureDate"), text("2025-07-01")),
            (info("returnDate"), text("2025-07-21")),
            (info("travellers"), num(2)),
            (info("tripPurpose"), text("leisure")),
        ],
        Category::PortablePossessions => vec![
            (risk("safeInstalled"), flag(true)),
            (info("itemDescription"), text("Canon EOS R6")),
            (info("itemCategory"), text("electronics")),
            (info("itemValue"), num(42_000)),
            (info("serialNumber"), text("CR6-00921")),
            (info("valuationCertificate"), text("VAL-2024-0192")),
        ],
    }
}

/// Form that passes every step of its category
pub fn valid_form(category: Category) -> FormState {
    let applicant = if category.is_business() {
        company_details()
    } else {
        personal_details()
    };
    let mut fields = applicant;
    fields.extend(needs_analysis());
    fields.extend(category_details(category));
    fields.extend(declarations());
    fields.extend(signed_consent());
    fill(FormState::for_category(category), fields)
}

/// Valid form with an opted-in co-insured sharing the applicant's address
pub fn with_co_insured(form: FormState) -> FormState {
    fill(
        form,
        vec![
            (personal::HAS_CO_INSURED, flag(true)),
            (co_insured::FIRST_NAME, text("Kabelo")),
            (co_insured::LAST_NAME, text("Mokoena")),
            (co_insured::ID_NUMBER, text(VALID_ID_NUMBER)),
            (co_insured::RELATIONSHIP, text("spouse")),
            (co_insured::SAME_ADDRESS, flag(true)),
        ],
    )
}

/// Fresh session form with every field empty
pub fn blank_form(category: Category) -> FormState {
    FormState::for_category(category)
}

pub fn any_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

pub fn any_personal_category() -> impl Strategy<Value = Category> {
    prop::sample::select(
        Category::ALL
            .into_iter()
            .filter(|c| !c.is_business())
            .collect::<Vec<_>>(),
    )
}

pub fn any_step() -> impl Strategy<Value = StepId> {
    prop::sample::select(StepId::ALL.to_vec())
}
