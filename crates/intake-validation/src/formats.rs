//! Field formats
//!
//! Pattern and algorithm checks used by format rules. Every check takes the
//! raw text as entered; callers skip empty values.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// `+27` or `0`, mobile prefix 6-8, then eight digits
static SA_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+27|0)[6-8][0-9]{8}$").expect("phone pattern"));

static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("postal code pattern"));

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern"));

/// CIPC registration, e.g. `2015/123456/07`
static COMPANY_REG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}/[0-9]{6}/[0-9]{2}$").expect("registration pattern"));

static VAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^4[0-9]{9}$").expect("vat pattern"));

/// 17 characters; I, O and Q are never used
static VIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").expect("vin pattern"));

/// Check an email address (`local@domain.tld`)
#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Check a South African phone number, ignoring whitespace
#[must_use]
pub fn is_sa_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    SA_PHONE_RE.is_match(&compact)
}

/// Check a four-digit postal code
#[must_use]
pub fn is_postal_code(value: &str) -> bool {
    POSTAL_CODE_RE.is_match(value.trim())
}

/// Check a 13-digit South African ID number
///
/// Digits at even positions 0..=10 are summed as-is; digits at odd
/// positions 1..=11 are doubled, with 9 subtracted when the double exceeds 9.
/// The check digit (position 12) must equal `(10 - total % 10) % 10`.
#[must_use]
pub fn is_sa_id(value: &str) -> bool {
    let value = value.trim();
    if value.len() != 13 {
        return false;
    }
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 13 {
        return false;
    }

    let total: u32 = digits[..12]
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                d
            } else {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            }
        })
        .sum();

    (10 - total % 10) % 10 == digits[12]
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`)
#[must_use]
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !ISO_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Check an ISO-8601 calendar date
#[inline]
#[must_use]
pub fn is_iso_date(value: &str) -> bool {
    parse_iso_date(value).is_some()
}

/// Check a company registration number (`YYYY/NNNNNN/NN`)
#[must_use]
pub fn is_company_registration(value: &str) -> bool {
    COMPANY_REG_RE.is_match(value.trim())
}

/// Check a VAT number (10 digits starting with 4)
#[must_use]
pub fn is_vat_number(value: &str) -> bool {
    VAT_RE.is_match(value.trim())
}

/// Check a vehicle identification number (case-insensitive)
#[must_use]
pub fn is_vin(value: &str) -> bool {
    VIN_RE.is_match(&value.trim().to_ascii_uppercase())
}

/// Named format a rule can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    Email,
    SaPhone,
    PostalCode,
    SaId,
    IsoDate,
    CompanyRegistration,
    VatNumber,
    Vin,
}

impl Format {
    /// Check a raw value against the format
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Format::Email => is_email(value),
            Format::SaPhone => is_sa_phone(value),
            Format::PostalCode => is_postal_code(value),
            Format::SaId => is_sa_id(value),
            Format::IsoDate => is_iso_date(value),
            Format::CompanyRegistration => is_company_registration(value),
            Format::VatNumber => is_vat_number(value),
            Format::Vin => is_vin(value),
        }
    }

    /// Message for a value that fails the format
    #[must_use]
    pub fn message(&self, label: &str) -> String {
        match self {
            Format::Email => "Please enter a valid email address".to_string(),
            Format::SaPhone => "Please enter a valid South African phone number".to_string(),
            Format::PostalCode => format!("{label} must be 4 digits"),
            Format::SaId => "Please enter a valid South African ID number".to_string(),
            Format::IsoDate => format!("{label} must be a valid date (YYYY-MM-DD)"),
            Format::CompanyRegistration => {
                format!("{label} must look like YYYY/NNNNNN/NN")
            }
            Format::VatNumber => format!("{label} must be 10 digits starting with 4"),
            Format::Vin => format!("{label} must be 17 characters without I, O or Q"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sa_id_checksum() {
        assert!(is_sa_id("8001015009087"));
        assert!(!is_sa_id("8001015009086"));
        assert!(!is_sa_id("800101500908"));
        assert!(!is_sa_id("80010150090870"));
        assert!(!is_sa_id("80010150090a7"));
    }

    #[test]
    fn sa_phone_ignores_whitespace() {
        assert!(is_sa_phone("082 123 4567"));
        assert!(is_sa_phone("+27821234567"));
        assert!(is_sa_phone("+27 72 123 4567"));
        assert!(!is_sa_phone("0521234567"));
        assert!(!is_sa_phone("08212345"));
        assert!(!is_sa_phone("+2782123456789"));
    }

    #[test]
    fn email_shape() {
        assert!(is_email("thandi@example.co.za"));
        assert!(!is_email("thandi@example"));
        assert!(!is_email("thandi example@x.co"));
        assert!(!is_email("@example.com"));
    }

    #[test]
    fn postal_code_is_four_digits() {
        assert!(is_postal_code("2196"));
        assert!(is_postal_code(" 0001 "));
        assert!(!is_postal_code("219"));
        assert!(!is_postal_code("21960"));
    }

    #[test]
    fn iso_dates_must_exist() {
        assert!(is_iso_date("2024-02-29"));
        assert!(!is_iso_date("2023-02-29"));
        assert!(!is_iso_date("2024-2-1"));
        assert!(!is_iso_date("01/02/2024"));
    }

    #[test]
    fn company_identifiers() {
        assert!(is_company_registration("2015/123456/07"));
        assert!(!is_company_registration("2015/12345/07"));
        assert!(is_vat_number("4123456789"));
        assert!(!is_vat_number("5123456789"));
        assert!(!is_vat_number("412345678"));
    }

    #[test]
    fn vin_excludes_ambiguous_letters() {
        assert!(is_vin("1HGCM82633A004352"));
        assert!(is_vin("1hgcm82633a004352"));
        assert!(!is_vin("1HGCM82633A00435"));
        assert!(!is_vin("1HGCM82633O004352"));
    }
}
