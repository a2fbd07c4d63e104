//! Applicant steps: personal details (with co-insured) and company details

use intake_schema::paths::{co_insured, company, personal};
use intake_schema::Category;

use crate::formats::Format;
use crate::rules::{Bounds, Condition, Rule};

fn contact_rules() -> Vec<Rule> {
    vec![
        Rule::required(personal::FIRST_NAME),
        Rule::required(personal::LAST_NAME),
        Rule::required(personal::EMAIL),
        Rule::format(personal::EMAIL, Format::Email),
        Rule::required(personal::PHONE),
        Rule::format(personal::PHONE, Format::SaPhone),
        Rule::format(personal::ALTERNATIVE_PHONE, Format::SaPhone),
    ]
}

pub(super) fn personal_info(category: Category) -> Vec<Rule> {
    let mut rules = contact_rules();
    rules.extend([
        Rule::required(personal::ID_NUMBER).labelled("ID number"),
        Rule::format(personal::ID_NUMBER, Format::SaId),
        Rule::format(personal::DATE_OF_BIRTH, Format::IsoDate).labelled("Date of birth"),
        Rule::required(personal::STREET_ADDRESS),
        Rule::required(personal::CITY),
        Rule::required(personal::PROVINCE),
        Rule::required(personal::POSTAL_CODE),
        Rule::format(personal::POSTAL_CODE, Format::PostalCode),
        Rule::required(personal::OTHER_COUNTRY)
            .labelled("Country name")
            .when(Condition::Equals(personal::COUNTRY, "other")),
    ]);
    if !category.is_business() {
        rules.extend(co_insured_rules());
    }
    rules
}

fn co_insured_rules() -> Vec<Rule> {
    let active = || Condition::IsTrue(personal::HAS_CO_INSURED);
    let separate_address = || active().and(Condition::IsFalse(co_insured::SAME_ADDRESS));

    vec![
        Rule::required(co_insured::FIRST_NAME)
            .labelled("Co-insured first name")
            .when(active()),
        Rule::required(co_insured::LAST_NAME)
            .labelled("Co-insured last name")
            .when(active()),
        Rule::required(co_insured::ID_NUMBER)
            .labelled("Co-insured ID number")
            .when(active()),
        Rule::format(co_insured::ID_NUMBER, Format::SaId).when(active()),
        Rule::required(co_insured::RELATIONSHIP).when(active()),
        Rule::required(co_insured::RELATIONSHIP_OTHER)
            .labelled("Relationship description")
            .when(active().and(Condition::Equals(co_insured::RELATIONSHIP, "other"))),
        Rule::format(co_insured::PHONE, Format::SaPhone).when(active()),
        Rule::format(co_insured::EMAIL, Format::Email).when(active()),
        Rule::required(co_insured::ADDRESS_STREET)
            .labelled("Co-insured street address")
            .when(separate_address()),
        Rule::required(co_insured::ADDRESS_CITY)
            .labelled("Co-insured city")
            .when(separate_address()),
        Rule::required(co_insured::ADDRESS_POSTAL_CODE)
            .labelled("Co-insured postal code")
            .when(separate_address()),
        Rule::format(co_insured::ADDRESS_POSTAL_CODE, Format::PostalCode)
            .labelled("Co-insured postal code")
            .when(separate_address()),
    ]
}

pub(super) fn company_info(_category: Category) -> Vec<Rule> {
    let mut rules = vec![
        Rule::required(company::COMPANY_NAME),
        Rule::required(company::REGISTRATION_NUMBER),
        Rule::format(company::REGISTRATION_NUMBER, Format::CompanyRegistration),
        Rule::format(company::VAT_NUMBER, Format::VatNumber).labelled("VAT number"),
        Rule::required(company::INDUSTRY),
        Rule::range(company::YEARS_IN_BUSINESS, Bounds::at_least(0.0)),
        Rule::required(company::NUMBER_OF_EMPLOYEES),
        Rule::range(company::NUMBER_OF_EMPLOYEES, Bounds::at_least(1.0)),
        Rule::required(company::ANNUAL_TURNOVER),
        Rule::range(company::ANNUAL_TURNOVER, Bounds::greater_than(0.0)),
        Rule::required(company::PHYSICAL_ADDRESS),
        Rule::required(company::POSTAL_CODE),
        Rule::format(company::POSTAL_CODE, Format::PostalCode),
        Rule::required(company::BUSINESS_PHONE),
        Rule::format(company::BUSINESS_PHONE, Format::SaPhone),
        Rule::required(company::BUSINESS_EMAIL),
        Rule::format(company::BUSINESS_EMAIL, Format::Email),
        Rule::required(company::CONTACT_POSITION),
    ];
    rules.extend(contact_rules());
    rules.push(Rule::format(personal::ID_NUMBER, Format::SaId));
    rules
}
