//! Commercial-line steps: business, transport, scheme, liability, cyber and
//! professional indemnity

use intake_schema::{info, Category};

use crate::formats::Format;
use crate::rules::{Bounds, Condition, Rule};

/// Fleets of this size must name a fleet manager
const FLEET_MANAGER_THRESHOLD: f64 = 10.0;

/// Holding this many personal records requires a recent audit
const AUDIT_RECORDS_THRESHOLD: f64 = 100_000.0;

pub(super) fn business_operations(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("businessDescription")),
        Rule::required(info("operatingHours")),
        Rule::required(info("premisesOwnership")),
        Rule::format(info("tradingSince"), Format::IsoDate),
    ]
}

pub(super) fn business_assets(_category: Category) -> Vec<Rule> {
    let interruption = || Condition::IsTrue(info("businessInterruptionCover"));
    vec![
        Rule::range(info("buildingsValue"), Bounds::at_least(0.0)),
        Rule::range(info("stockValue"), Bounds::at_least(0.0)),
        Rule::range(info("equipmentValue"), Bounds::at_least(0.0)),
        Rule::required(info("grossProfit")).when(interruption()),
        Rule::range(info("grossProfit"), Bounds::greater_than(0.0)).when(interruption()),
    ]
}

pub(super) fn fleet_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("numberOfVehicles")),
        Rule::range(info("numberOfVehicles"), Bounds::at_least(1.0)),
        Rule::required(info("fleetValue")),
        Rule::range(info("fleetValue"), Bounds::greater_than(0.0)),
        Rule::required(info("vehicleTypes")),
        Rule::required(info("fleetManagerName")).when_threshold(Condition::NumberAtLeast(
            info("numberOfVehicles"),
            FLEET_MANAGER_THRESHOLD,
        )),
    ]
}

pub(super) fn cargo_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("cargoType")),
        Rule::required(info("maxLoadValue")).labelled("Maximum load value"),
        Rule::range(info("maxLoadValue"), Bounds::greater_than(0.0)).labelled("Maximum load value"),
    ]
}

pub(super) fn routes_operations(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("operatingRadius")),
        Rule::required(info("crossBorderCountries"))
            .when(Condition::IsTrue(info("crossBorder"))),
    ]
}

pub(super) fn scheme_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("schemeName")),
        Rule::required(info("schemeType")),
        Rule::required(info("replacementValue")),
        Rule::range(info("replacementValue"), Bounds::greater_than(0.0)),
    ]
}

pub(super) fn member_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("trusteeCount")),
        Rule::range(info("trusteeCount"), Bounds::at_least(1.0)),
        Rule::required(info("chairpersonName")),
        Rule::required(info("chairpersonPhone")),
        Rule::format(info("chairpersonPhone"), Format::SaPhone),
        Rule::format(info("chairpersonEmail"), Format::Email),
    ]
}

pub(super) fn liability_exposure(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("limitOfIndemnity")),
        Rule::range(info("limitOfIndemnity"), Bounds::greater_than(0.0)),
        Rule::required(info("productDescription")).when(Condition::IsTrue(info("productsSold"))),
    ]
}

pub(super) fn it_infrastructure(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("numberOfEndpoints")),
        Rule::range(info("numberOfEndpoints"), Bounds::at_least(1.0)),
        Rule::required(info("cloudProvider")),
        Rule::required(info("recordsHeld")).labelled("Number of personal records held"),
        Rule::range(info("recordsHeld"), Bounds::at_least(0.0)).labelled("Number of personal records held"),
    ]
}

pub(super) fn data_protection(_category: Category) -> Vec<Rule> {
    let large_holder = || Condition::NumberAtLeast(info("recordsHeld"), AUDIT_RECORDS_THRESHOLD);
    vec![
        Rule::required(info("informationOfficer")),
        Rule::required(info("lastAuditDate")).when_threshold(large_holder()),
        Rule::format(info("lastAuditDate"), Format::IsoDate),
    ]
}

pub(super) fn professional_profile(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("profession")),
        Rule::required(info("professionalBody")),
        Rule::required(info("yearsPracticing")),
        Rule::range(info("yearsPracticing"), Bounds::at_least(0.0)),
        Rule::required(info("feeIncome")),
        Rule::range(info("feeIncome"), Bounds::greater_than(0.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_map::ErrorKind;
    use crate::rules::evaluate_all;
    use intake_form::{FieldValue, FormState};

    #[test]
    fn large_fleet_needs_manager() {
        let form = FormState::for_category(Category::Transport)
            .set_path(&info("fleetValue"), "4500000".into())
            .set_path(&info("vehicleTypes"), FieldValue::from(&["rigid"][..]))
            .set_path(&info("numberOfVehicles"), "9".into());
        assert!(evaluate_all(&fleet_details(Category::Transport), &form).is_empty());

        let form = form.set_path(&info("numberOfVehicles"), "10".into());
        assert_eq!(
            evaluate_all(&fleet_details(Category::Transport), &form)
                .get(&info("fleetManagerName"))
                .map(|e| e.kind),
            Some(ErrorKind::CrossFieldThreshold)
        );
    }

    #[test]
    fn audit_date_required_for_large_record_holders() {
        let form = FormState::for_category(Category::Cyber)
            .set_path(&info("informationOfficer"), "N. Dlamini".into())
            .set_path(&info("recordsHeld"), "99999".into());
        assert!(evaluate_all(&data_protection(Category::Cyber), &form).is_empty());

        let form = form.set_path(&info("recordsHeld"), "100000".into());
        assert!(evaluate_all(&data_protection(Category::Cyber), &form).contains(&info("lastAuditDate")));
    }
}
