//! Vehicle steps

use intake_schema::paths::driver;
use intake_schema::{info, Category};

use crate::formats::Format;
use crate::rules::{Bounds, Condition, Rule};

pub(super) fn vehicle_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("vehicleMake")).labelled("Make"),
        Rule::required(info("vehicleModel")).labelled("Model"),
        Rule::required(info("vehicleYear")).labelled("Year"),
        Rule::range(info("vehicleYear"), Bounds::between(1900.0, 2100.0)).labelled("Year"),
        Rule::required(info("registrationNumber")),
        Rule::format(info("vinNumber"), Format::Vin).labelled("VIN"),
        Rule::required(info("vehicleValue")),
        Rule::range(info("vehicleValue"), Bounds::greater_than(0.0)),
        Rule::required(info("financeHouse")).when(Condition::IsTrue(info("financed"))),
    ]
}

pub(super) fn driver_details(_category: Category) -> Vec<Rule> {
    let other_driver = || Condition::IsFalse(driver::IS_POLICYHOLDER_MAIN_DRIVER);

    vec![
        Rule::required(driver::MAIN_DRIVER_NAME).when(other_driver()),
        Rule::required(driver::MAIN_DRIVER_ID_NUMBER)
            .labelled("Main driver ID number")
            .when(other_driver()),
        Rule::format(driver::MAIN_DRIVER_ID_NUMBER, Format::SaId).when(other_driver()),
        Rule::required(driver::RELATIONSHIP)
            .labelled("Relationship to policyholder")
            .when(other_driver()),
        Rule::required(driver::RELATIONSHIP_OTHER)
            .labelled("Relationship description")
            .when(other_driver().and(Condition::Equals(driver::RELATIONSHIP, "other"))),
        Rule::required(driver::LICENCE_TYPE),
        Rule::required(driver::LICENCE_ISSUE_DATE),
        Rule::format(driver::LICENCE_ISSUE_DATE, Format::IsoDate),
        Rule::range(driver::YEARS_LICENSED, Bounds::at_least(0.0)),
        Rule::required(driver::CONVICTION_DETAILS)
            .when(Condition::IsTrue(driver::HAS_ACCIDENTS_OR_CONVICTIONS)),
        Rule::range(driver::ADDITIONAL_DRIVERS, Bounds::between(0.0, 10.0)),
    ]
}

pub(super) fn vehicle_usage(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("vehicleUse")),
        Rule::required(info("annualKilometres")),
        Rule::range(info("annualKilometres"), Bounds::at_least(1.0)),
        Rule::required(info("businessUseDescription"))
            .labelled("Description of business use")
            .when(Condition::OneOf(info("vehicleUse"), &["business", "mixed"])),
    ]
}
