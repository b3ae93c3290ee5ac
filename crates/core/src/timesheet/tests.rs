use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::activity::ActivityStatus;

use super::error::TimesheetError;
use super::reconcile::{
    activity_start_sync, completion_sync, review, total_hours, validate_entry, ApprovedSpan,
    CompletionUpdate,
};
use super::types::{EntryHours, ReviewDecision, TimeEntryStatus, WeekHours};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn span(total: Decimal, start: NaiveDate, end: Option<NaiveDate>) -> ApprovedSpan {
    ApprovedSpan {
        start_date: start,
        end_date: end,
        total_hours: total,
    }
}

#[test]
fn test_daily_total() {
    assert_eq!(total_hours(&EntryHours::Daily { hours: Some(dec!(7.5)) }), dec!(7.50));
    assert_eq!(total_hours(&EntryHours::Daily { hours: None }), dec!(0.00));
}

#[test]
fn test_weekly_total_sums_named_days() {
    let week = WeekHours {
        monday: Some(dec!(8.00)),
        tuesday: Some(dec!(6.25)),
        friday: Some(dec!(4.00)),
        ..WeekHours::default()
    };
    assert_eq!(total_hours(&EntryHours::Weekly(week)), dec!(18.25));
}

#[test]
fn test_weekly_total_quantizes() {
    let week = WeekHours {
        monday: Some(dec!(1.005)),
        tuesday: Some(dec!(2.000)),
        ..WeekHours::default()
    };
    assert_eq!(total_hours(&EntryHours::Weekly(week)), dec!(3.01));
}

#[test]
fn test_validate_requires_released_activity() {
    let errors = validate_entry(
        ActivityStatus::Planned,
        date(2025, 4, 1),
        date(2025, 4, 5),
        dec!(5.00),
        dec!(40.00),
        dec!(0.00),
        dec!(0.00),
    )
    .unwrap_err();
    assert_eq!(errors, vec![TimesheetError::ActivityNotReleased]);
}

#[test]
fn test_validate_date_ordering() {
    let errors = validate_entry(
        ActivityStatus::Released,
        date(2025, 4, 5),
        date(2025, 4, 1),
        dec!(5.00),
        dec!(40.00),
        dec!(0.00),
        dec!(0.00),
    )
    .unwrap_err();
    assert_eq!(errors, vec![TimesheetError::EndBeforeStart]);
}

#[test]
fn test_validate_positive_hours() {
    let errors = validate_entry(
        ActivityStatus::Released,
        date(2025, 4, 1),
        date(2025, 4, 5),
        dec!(0.00),
        dec!(40.00),
        dec!(0.00),
        dec!(0.00),
    )
    .unwrap_err();
    assert_eq!(errors, vec![TimesheetError::NonPositiveHours]);
}

#[test]
fn test_validate_cap_counts_approved_and_pending() {
    // activity 10h, approved 6h elsewhere: 5h no longer fits
    let errors = validate_entry(
        ActivityStatus::Released,
        date(2025, 4, 1),
        date(2025, 4, 5),
        dec!(5.00),
        dec!(10.00),
        dec!(6.00),
        dec!(0.00),
    )
    .unwrap_err();
    assert_eq!(
        errors,
        vec![TimesheetError::ExceedsAvailableHours {
            available: dec!(4.00)
        }]
    );

    // pending hours also consume the balance
    let errors = validate_entry(
        ActivityStatus::Released,
        date(2025, 4, 1),
        date(2025, 4, 5),
        dec!(5.00),
        dec!(10.00),
        dec!(3.00),
        dec!(3.00),
    )
    .unwrap_err();
    assert!(matches!(
        errors[0],
        TimesheetError::ExceedsAvailableHours { .. }
    ));
}

#[test]
fn test_validate_exact_fit_is_accepted() {
    let result = validate_entry(
        ActivityStatus::Released,
        date(2025, 4, 1),
        date(2025, 4, 5),
        dec!(4.00),
        dec!(10.00),
        dec!(6.00),
        dec!(0.00),
    );
    assert!(result.is_ok());
}

#[test]
fn test_review_approves_pending() {
    assert_eq!(
        review(TimeEntryStatus::Pending, &ReviewDecision::Approve),
        Ok(TimeEntryStatus::Approved)
    );
}

#[test]
fn test_review_rejects_with_reason() {
    let decision = ReviewDecision::Reject {
        reason: "Horas lancadas em atividade errada".to_string(),
    };
    assert_eq!(
        review(TimeEntryStatus::Pending, &decision),
        Ok(TimeEntryStatus::Rejected)
    );
}

#[test]
fn test_review_requires_rejection_reason() {
    let decision = ReviewDecision::Reject {
        reason: "   ".to_string(),
    };
    assert_eq!(
        review(TimeEntryStatus::Pending, &decision),
        Err(TimesheetError::RejectionReasonRequired)
    );
}

#[test]
fn test_review_terminal_states_are_final() {
    for status in [TimeEntryStatus::Approved, TimeEntryStatus::Rejected] {
        assert_eq!(
            review(status, &ReviewDecision::Approve),
            Err(TimesheetError::AlreadyReviewed { status })
        );
    }
}

#[test]
fn test_start_sync_only_when_unset() {
    assert_eq!(
        activity_start_sync(None, Some(date(2025, 4, 1))),
        Some(date(2025, 4, 1))
    );
    assert_eq!(activity_start_sync(Some(date(2025, 3, 1)), Some(date(2025, 4, 1))), None);
    assert_eq!(activity_start_sync(None, None), None);
}

#[test]
fn test_completion_below_budget_is_noop() {
    let approved = [span(dec!(30.00), date(2025, 4, 1), Some(date(2025, 4, 10)))];
    assert_eq!(
        completion_sync(dec!(40.00), ActivityStatus::Released, None, &approved),
        None
    );
}

#[test]
fn test_completion_marks_done_and_sets_actual_end() {
    let approved = [span(dec!(40.00), date(2025, 4, 1), Some(date(2025, 4, 10)))];
    assert_eq!(
        completion_sync(dec!(40.00), ActivityStatus::Released, None, &approved),
        Some(CompletionUpdate {
            mark_done: true,
            actual_end: Some(date(2025, 4, 10)),
        })
    );
}

#[test]
fn test_completion_uses_start_date_when_end_absent() {
    let approved = [span(dec!(40.00), date(2025, 4, 8), None)];
    let update =
        completion_sync(dec!(40.00), ActivityStatus::Released, None, &approved).unwrap();
    assert_eq!(update.actual_end, Some(date(2025, 4, 8)));
}

#[test]
fn test_completion_advances_but_never_regresses_actual_end() {
    // A later approval with a later end date pushes actual_end forward.
    let approved = [
        span(dec!(40.00), date(2025, 4, 1), Some(date(2025, 4, 10))),
        span(dec!(5.00), date(2025, 4, 12), Some(date(2025, 4, 15))),
    ];
    let update = completion_sync(
        dec!(40.00),
        ActivityStatus::Done,
        Some(date(2025, 4, 10)),
        &approved,
    )
    .unwrap();
    assert!(!update.mark_done);
    assert_eq!(update.actual_end, Some(date(2025, 4, 15)));

    // An earlier end date never pulls it back.
    let approved = [
        span(dec!(40.00), date(2025, 4, 1), Some(date(2025, 4, 10))),
        span(dec!(5.00), date(2025, 3, 1), Some(date(2025, 3, 5))),
    ];
    assert_eq!(
        completion_sync(
            dec!(45.00),
            ActivityStatus::Done,
            Some(date(2025, 4, 10)),
            &approved,
        ),
        None
    );
}

#[test]
fn test_completion_is_idempotent() {
    let approved = [span(dec!(40.00), date(2025, 4, 1), Some(date(2025, 4, 10)))];
    let first = completion_sync(dec!(40.00), ActivityStatus::Released, None, &approved).unwrap();
    // Re-running after applying the update changes nothing further.
    assert_eq!(
        completion_sync(
            dec!(40.00),
            ActivityStatus::Done,
            first.actual_end,
            &approved
        ),
        None
    );
}

#[test]
fn test_completion_ignores_zero_hour_budget() {
    let approved = [span(dec!(10.00), date(2025, 4, 1), Some(date(2025, 4, 10)))];
    assert_eq!(
        completion_sync(dec!(0.00), ActivityStatus::Released, None, &approved),
        None
    );
}
