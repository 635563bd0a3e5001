use super::common::*;
use crate::scoring::ports::ScoringError;
use crate::scoring::search::find_safe_amount;

#[test]
fn probes_the_fixed_factors_in_descending_order() {
    let model = AmountScheduleModel::new(0.9, &[]);

    let recommended = find_safe_amount(&application(), &model).expect("search runs");

    assert_eq!(recommended, None);
    assert_eq!(model.probes(), vec![160.0, 120.0, 100.0, 80.0]);
}

#[test]
fn returns_the_first_qualifying_amount_not_the_smallest() {
    let model = AmountScheduleModel::new(0.9, &[(120.0, 0.45), (100.0, 0.2), (80.0, 0.05)]);

    let recommended = find_safe_amount(&application(), &model).expect("search runs");

    assert_eq!(recommended, Some(120.0));
    assert_eq!(model.probes(), vec![160.0, 120.0]);
}

#[test]
fn stops_at_the_first_factor_when_it_qualifies() {
    let model = AmountScheduleModel::new(0.9, &[(160.0, 0.49)]);

    let recommended = find_safe_amount(&application(), &model).expect("search runs");

    assert_eq!(recommended, Some(160.0));
    assert_eq!(model.probes().len(), 1);
}

#[test]
fn threshold_probability_does_not_qualify() {
    let model = AmountScheduleModel::new(0.9, &[(160.0, 0.5), (120.0, 0.4999)]);

    let recommended = find_safe_amount(&application(), &model).expect("search runs");

    assert_eq!(recommended, Some(120.0));
}

#[test]
fn never_recommends_at_or_above_the_request() {
    let mut applicant = application();
    for amount in [0.05, 1.0, 33.33, 200.0, 98_765.43] {
        applicant.loan_amount = amount;
        let recommended =
            find_safe_amount(&applicant, &ConstantModel(0.1)).expect("search runs");
        if let Some(recommended) = recommended {
            assert!(recommended < amount, "{recommended} >= {amount}");
            assert!(recommended > 0.0);
        }
    }
}

#[test]
fn rounds_recommendations_to_cents() {
    let mut applicant = application();
    applicant.loan_amount = 123.456;

    let recommended = find_safe_amount(&applicant, &ConstantModel(0.1)).expect("search runs");

    assert_eq!(recommended, Some(98.76));
}

#[test]
fn skips_candidates_that_round_onto_the_request() {
    let mut applicant = application();
    applicant.loan_amount = 0.01;
    let model = AmountScheduleModel::new(0.1, &[]);

    let recommended = find_safe_amount(&applicant, &model).expect("search runs");

    assert_eq!(recommended, None);
    assert!(model.probes().is_empty());
}

#[test]
fn rejects_non_positive_amounts() {
    let mut applicant = application();
    for amount in [0.0, -50.0, f64::NAN] {
        applicant.loan_amount = amount;
        match find_safe_amount(&applicant, &ConstantModel(0.1)) {
            Err(ScoringError::NonPositiveLoanAmount { .. }) => {}
            other => panic!("expected rejection for {amount}, got {other:?}"),
        }
    }
}

#[test]
fn propagates_contract_violations_from_probes() {
    let model = AmountScheduleModel::new(0.9, &[(120.0, 1.7)]);

    match find_safe_amount(&application(), &model) {
        Err(ScoringError::ProbabilityOutOfRange { probability }) => {
            assert_eq!(probability, 1.7)
        }
        other => panic!("expected out of range probability, got {other:?}"),
    }
}

#[test]
fn leaves_the_application_untouched() {
    let applicant = application();
    let model = AmountScheduleModel::new(0.9, &[(80.0, 0.1)]);

    let recommended = find_safe_amount(&applicant, &model).expect("search runs");

    assert_eq!(recommended, Some(80.0));
    assert_eq!(applicant, application());
}
