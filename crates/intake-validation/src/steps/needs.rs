//! Needs-analysis steps shared by every category

use intake_schema::paths::{budget, claims, coverage, situation};
use intake_schema::Category;

use crate::formats::Format;
use crate::rules::{Bounds, Condition, Rule};

pub(super) fn current_situation(_category: Category) -> Vec<Rule> {
    let insured = || Condition::IsTrue(situation::HAS_EXISTING_INSURANCE);
    let claimed = || Condition::IsTrue(claims::HAS_CLAIMS_LAST_THREE_YEARS);

    vec![
        Rule::required(situation::CURRENT_PROVIDER).when(insured()),
        Rule::required(situation::CURRENT_PREMIUM).when(insured()),
        Rule::range(situation::CURRENT_PREMIUM, Bounds::greater_than(0.0)).when(insured()),
        Rule::format(situation::POLICY_RENEWAL_DATE, Format::IsoDate),
        Rule::required(situation::REASON_FOR_REVIEW_OTHER)
            .labelled("Reason for review")
            .when(Condition::Equals(situation::REASON_FOR_REVIEW, "other")),
        Rule::required(claims::DAMAGE_TYPE).within(claimed()),
        Rule::required(claims::INCIDENT_DESCRIPTION).within(claimed()),
        Rule::required(claims::NUMBER_OF_CLAIMS).within(claimed()),
        Rule::range(claims::NUMBER_OF_CLAIMS, Bounds::at_least(1.0)).within(claimed()),
        Rule::required(claims::TOTAL_CLAIM_AMOUNT).within(claimed()),
        Rule::range(claims::TOTAL_CLAIM_AMOUNT, Bounds::at_least(0.0)).within(claimed()),
        Rule::format(claims::LAST_CLAIM_DATE, Format::IsoDate).within(claimed()),
        Rule::required(claims::MULTIPLE_CLAIMS_EXPLANATION)
            .labelled("Explanation of multiple claims")
            .when_threshold(
                claimed().and(Condition::NumberAtLeast(claims::NUMBER_OF_CLAIMS, 2.0)),
            ),
    ]
}

pub(super) fn coverage_needs(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(coverage::COVERAGE_TYPE),
        Rule::required(coverage::SUM_INSURED),
        Rule::range(coverage::SUM_INSURED, Bounds::greater_than(0.0)),
        Rule::required(coverage::START_DATE),
        Rule::format(coverage::START_DATE, Format::IsoDate),
    ]
}

pub(super) fn preferences(_category: Category) -> Vec<Rule> {
    let debit_order = || Condition::Equals(budget::PAYMENT_METHOD, "debit-order");

    vec![
        Rule::required(budget::MONTHLY_BUDGET),
        Rule::range(budget::MONTHLY_BUDGET, Bounds::greater_than(0.0)),
        Rule::required(budget::PAYMENT_FREQUENCY),
        Rule::required(budget::PAYMENT_METHOD).labelled("Payment method"),
        Rule::required(budget::DEBIT_ORDER_DAY).when(debit_order()),
        Rule::range(budget::DEBIT_ORDER_DAY, Bounds::between(1.0, 31.0)).when(debit_order()),
    ]
}
