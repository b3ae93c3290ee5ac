use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ProjectError;
use super::metrics::{calculate_metrics, contingency_factor};
use super::types::{ContractType, ProjectFinancials};
use super::validation::validate_financials;

fn financials(contract_type: ContractType) -> ProjectFinancials {
    ProjectFinancials {
        contract_type,
        total_value: dec!(0.00),
        hourly_rate: dec!(100.00),
        contracted_hours: dec!(0.00),
        contingency_percent: dec!(0.00),
        cutover_planned_start: None,
        cutover_planned_end: None,
    }
}

#[test]
fn test_fixed_value_derives_contracted_hours() {
    let mut input = financials(ContractType::FixedValue);
    input.total_value = dec!(1000.00);
    input.hourly_rate = dec!(100.00);
    let metrics = calculate_metrics(&input);
    assert_eq!(metrics.contracted_hours, dec!(10.00));
    assert_eq!(metrics.total_value, dec!(1000.00));
}

#[test]
fn test_fixed_value_with_contingency() {
    let mut input = financials(ContractType::FixedValue);
    input.total_value = dec!(1000.00);
    input.hourly_rate = dec!(100.00);
    input.contingency_percent = dec!(20.00);
    let metrics = calculate_metrics(&input);
    assert_eq!(metrics.available_hours, dec!(8.00));
    assert_eq!(metrics.available_value, dec!(800.00));
}

#[test]
fn test_hourly_project_derives_total_value() {
    let mut input = financials(ContractType::HourlyProject);
    input.contracted_hours = dec!(10.00);
    input.hourly_rate = dec!(150.00);
    let metrics = calculate_metrics(&input);
    assert_eq!(metrics.total_value, dec!(1500.00));
    assert_eq!(metrics.contracted_hours, dec!(10.00));
}

#[test]
fn test_zero_hourly_rate_zeroes_derived_side() {
    let mut input = financials(ContractType::FixedValue);
    input.total_value = dec!(1000.00);
    input.hourly_rate = dec!(0.00);
    assert_eq!(calculate_metrics(&input).contracted_hours, dec!(0.00));

    let mut input = financials(ContractType::AdHoc);
    input.contracted_hours = dec!(10.00);
    input.hourly_rate = dec!(0.00);
    assert_eq!(calculate_metrics(&input).total_value, dec!(0.00));
}

#[test]
fn test_contingency_factor_clamps_at_zero() {
    assert_eq!(contingency_factor(dec!(0)), dec!(1));
    assert_eq!(contingency_factor(dec!(25)), dec!(0.75));
    assert_eq!(contingency_factor(dec!(100)), dec!(0));
    assert_eq!(contingency_factor(dec!(150)), dec!(0));
}

#[test]
fn test_metrics_derivation_is_idempotent() {
    let mut input = financials(ContractType::FixedHours);
    input.contracted_hours = dec!(37.33);
    input.hourly_rate = dec!(173.50);
    input.contingency_percent = dec!(12.50);

    let first = calculate_metrics(&input);
    input.total_value = first.total_value;
    input.contracted_hours = first.contracted_hours;
    let second = calculate_metrics(&input);
    assert_eq!(first, second);
}

#[test]
fn test_derivation_quantizes_half_up() {
    let mut input = financials(ContractType::FixedValue);
    // 1000 / 300 = 3.333... -> 3.33
    input.total_value = dec!(1000.00);
    input.hourly_rate = dec!(300.00);
    assert_eq!(calculate_metrics(&input).contracted_hours, dec!(3.33));
}

#[test]
fn test_validate_ok() {
    let mut input = financials(ContractType::FixedValue);
    input.total_value = dec!(1000.00);
    assert!(validate_financials(&input).is_ok());
}

#[test]
fn test_validate_contingency_range() {
    let mut input = financials(ContractType::FixedValue);
    input.total_value = dec!(1000.00);
    input.contingency_percent = dec!(100.01);
    let errors = validate_financials(&input).unwrap_err();
    assert_eq!(errors, vec![ProjectError::ContingencyOutOfRange]);
    assert_eq!(errors[0].field(), "contingency_percent");
}

#[test]
fn test_validate_hourly_rate_positive() {
    let mut input = financials(ContractType::FixedValue);
    input.total_value = dec!(1000.00);
    input.hourly_rate = dec!(0.00);
    let errors = validate_financials(&input).unwrap_err();
    assert_eq!(errors, vec![ProjectError::NonPositiveHourlyRate]);
}

#[test]
fn test_validate_contract_type_positivity() {
    let input = financials(ContractType::FixedValue);
    let errors = validate_financials(&input).unwrap_err();
    assert!(errors.contains(&ProjectError::NonPositiveTotalValue));

    let input = financials(ContractType::HourlyProject);
    let errors = validate_financials(&input).unwrap_err();
    assert!(errors.contains(&ProjectError::NonPositiveContractedHours));
}

#[test]
fn test_validate_cutover_ordering() {
    let mut input = financials(ContractType::AdHoc);
    input.contracted_hours = dec!(10.00);
    input.cutover_planned_start = NaiveDate::from_ymd_opt(2025, 5, 10);
    input.cutover_planned_end = NaiveDate::from_ymd_opt(2025, 5, 9);
    let errors = validate_financials(&input).unwrap_err();
    assert_eq!(errors, vec![ProjectError::CutoverEndBeforeStart]);
}

fn money_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn prop_available_never_exceeds_contracted(
        hours in money_strategy(),
        rate in money_strategy(),
        contingency in 0i64..=10_000,
    ) {
        let mut input = financials(ContractType::FixedHours);
        input.contracted_hours = hours;
        input.hourly_rate = rate;
        input.contingency_percent = Decimal::new(contingency, 2);
        let metrics = calculate_metrics(&input);
        prop_assert!(metrics.available_hours <= metrics.contracted_hours);
        prop_assert!(metrics.available_value <= metrics.total_value);
        prop_assert!(metrics.available_hours >= Decimal::ZERO);
        prop_assert!(metrics.available_value >= Decimal::ZERO);
    }

    #[test]
    fn prop_metrics_idempotent(
        value in money_strategy(),
        rate in money_strategy(),
        contingency in 0i64..=10_000,
    ) {
        let mut input = financials(ContractType::FixedValue);
        input.total_value = value;
        input.hourly_rate = rate;
        input.contingency_percent = Decimal::new(contingency, 2);
        let first = calculate_metrics(&input);
        input.total_value = first.total_value;
        input.contracted_hours = first.contracted_hours;
        prop_assert_eq!(calculate_metrics(&input), first);
    }
}
