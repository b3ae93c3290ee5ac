use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use praxis_shared::types::{ModuleId, ProductId, SubmoduleId};

use super::error::ActivityError;
use super::hours::{hours_available, hours_contingency};
use super::types::{ActivityStatus, AssumedReason, BillingType, CatalogRefs, ScheduleState};
use super::validation::{
    normalize_assumed_reason, schedule_state, validate_activity, ActivityDates,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn consistent_catalog() -> CatalogRefs {
    let product = ProductId::new();
    let module = ModuleId::new();
    CatalogRefs {
        product,
        module,
        module_product: product,
        submodule: SubmoduleId::new(),
        submodule_module: module,
        submodule_product: product,
    }
}

#[rstest]
#[case(dec!(40.00), dec!(0.00), dec!(40.00), dec!(0.00))]
#[case(dec!(40.00), dec!(25.00), dec!(30.00), dec!(10.00))]
#[case(dec!(10.00), dec!(33.33), dec!(6.67), dec!(3.33))]
#[case(dec!(10.00), dec!(100.00), dec!(0.00), dec!(10.00))]
fn test_hours_split(
    #[case] hours: Decimal,
    #[case] contingency: Decimal,
    #[case] available: Decimal,
    #[case] held: Decimal,
) {
    assert_eq!(hours_available(hours, contingency), available);
    assert_eq!(hours_contingency(hours, contingency), held);
}

#[test]
fn test_validate_consistent_activity() {
    let result = validate_activity(
        &consistent_catalog(),
        &ActivityDates::default(),
        Some(dec!(120.00)),
        BillingType::Billable,
        None,
    );
    assert!(result.is_ok());
}

#[test]
fn test_validate_catalog_chain() {
    let mut catalog = consistent_catalog();
    catalog.module_product = ProductId::new();
    catalog.submodule_module = ModuleId::new();
    catalog.submodule_product = ProductId::new();
    let errors = validate_activity(
        &catalog,
        &ActivityDates::default(),
        None,
        BillingType::Billable,
        None,
    )
    .unwrap_err();
    assert!(errors.contains(&ActivityError::ModuleNotInProduct));
    assert!(errors.contains(&ActivityError::SubmoduleNotInModule));
    assert!(errors.contains(&ActivityError::SubmoduleNotInProduct));
}

#[test]
fn test_validate_date_ordering() {
    let dates = ActivityDates {
        planned_start: Some(date(2025, 5, 10)),
        planned_end: Some(date(2025, 5, 9)),
        actual_start: Some(date(2025, 5, 12)),
        actual_end: Some(date(2025, 5, 11)),
    };
    let errors = validate_activity(
        &consistent_catalog(),
        &dates,
        None,
        BillingType::Billable,
        None,
    )
    .unwrap_err();
    assert!(errors.contains(&ActivityError::PlannedEndBeforeStart));
    assert!(errors.contains(&ActivityError::ActualEndBeforeStart));
}

#[test]
fn test_validate_negative_consultant_rate() {
    let errors = validate_activity(
        &consistent_catalog(),
        &ActivityDates::default(),
        Some(dec!(-1.00)),
        BillingType::Billable,
        None,
    )
    .unwrap_err();
    assert_eq!(errors, vec![ActivityError::NegativeConsultantRate]);
}

#[test]
fn test_assumed_company_requires_reason() {
    let errors = validate_activity(
        &consistent_catalog(),
        &ActivityDates::default(),
        None,
        BillingType::AssumedCompany,
        None,
    )
    .unwrap_err();
    assert_eq!(errors, vec![ActivityError::AssumedReasonRequired]);

    let result = validate_activity(
        &consistent_catalog(),
        &ActivityDates::default(),
        None,
        BillingType::AssumedCompany,
        Some(AssumedReason::Rework),
    );
    assert!(result.is_ok());
}

#[test]
fn test_normalize_clears_stale_reason() {
    assert_eq!(
        normalize_assumed_reason(BillingType::Billable, Some(AssumedReason::Courtesy)),
        None
    );
    assert_eq!(
        normalize_assumed_reason(BillingType::AssumedCompany, Some(AssumedReason::Courtesy)),
        Some(AssumedReason::Courtesy)
    );
}

#[test]
fn test_schedule_state_without_planned_dates() {
    assert_eq!(
        schedule_state(&ActivityDates::default(), date(2025, 5, 1)),
        None
    );
}

#[rstest]
// finished: judged against the planned end
#[case(Some(date(2025, 5, 12)), date(2025, 5, 1), ScheduleState::Late)]
#[case(Some(date(2025, 5, 10)), date(2025, 5, 20), ScheduleState::OnTime)]
fn test_schedule_state_with_actual_end(
    #[case] actual_end: Option<NaiveDate>,
    #[case] today: NaiveDate,
    #[case] expected: ScheduleState,
) {
    let dates = ActivityDates {
        planned_start: Some(date(2025, 5, 1)),
        planned_end: Some(date(2025, 5, 10)),
        actual_start: Some(date(2025, 5, 1)),
        actual_end,
    };
    assert_eq!(schedule_state(&dates, today), Some(expected));
}

#[test]
fn test_schedule_state_started_and_past_end_is_late() {
    let dates = ActivityDates {
        planned_start: Some(date(2025, 5, 1)),
        planned_end: Some(date(2025, 5, 10)),
        actual_start: Some(date(2025, 5, 2)),
        actual_end: None,
    };
    assert_eq!(schedule_state(&dates, date(2025, 5, 11)), Some(ScheduleState::Late));
    assert_eq!(schedule_state(&dates, date(2025, 5, 9)), Some(ScheduleState::OnTime));
}

#[test]
fn test_schedule_state_not_started() {
    let dates = ActivityDates {
        planned_start: Some(date(2025, 5, 10)),
        planned_end: Some(date(2025, 5, 20)),
        ..ActivityDates::default()
    };
    assert_eq!(
        schedule_state(&dates, date(2025, 5, 1)),
        Some(ScheduleState::NotStarted)
    );
    assert_eq!(
        schedule_state(&dates, date(2025, 5, 21)),
        Some(ScheduleState::Late)
    );
    assert_eq!(
        schedule_state(&dates, date(2025, 5, 15)),
        Some(ScheduleState::OnTime)
    );
}

#[test]
fn test_status_round_trip() {
    for status in [
        ActivityStatus::Planned,
        ActivityStatus::Released,
        ActivityStatus::InProgress,
        ActivityStatus::Done,
        ActivityStatus::Blocked,
        ActivityStatus::Canceled,
    ] {
        assert_eq!(ActivityStatus::parse(status.as_str()), Some(status));
    }
    assert!(ActivityStatus::Done.is_closed());
    assert!(!ActivityStatus::Released.is_closed());
}
