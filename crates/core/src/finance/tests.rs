use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::FinanceError;
use super::payment::PaymentService;
use super::status::sync_status;
use super::types::{FinancialStatus, PaymentMethod, Title};
use super::validation::validate_title;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn title() -> Title {
    Title {
        document_number: "NF-1001".to_string(),
        description: "Mensalidade de consultoria".to_string(),
        issue_date: date(2025, 3, 1),
        due_date: date(2025, 3, 31),
        amount: dec!(1000.00),
        discount: dec!(0.00),
        interest: dec!(0.00),
        penalty: dec!(0.00),
        status: FinancialStatus::Open,
        settlement_date: None,
        payment_method: None,
        notes: String::new(),
    }
}

#[test]
fn test_total_amount_combines_all_components() {
    let mut t = title();
    t.amount = dec!(1000.00);
    t.discount = dec!(50.00);
    t.interest = dec!(10.00);
    t.penalty = dec!(5.00);
    assert_eq!(t.total_amount(), dec!(965.00));
}

#[test]
fn test_total_amount_quantizes_half_up() {
    let mut t = title();
    t.amount = dec!(10.005);
    assert_eq!(t.total_amount(), dec!(10.01));
}

#[test]
fn test_sync_overdue_when_past_due() {
    let status = sync_status(FinancialStatus::Open, None, date(2025, 3, 31), date(2025, 4, 1));
    assert_eq!(status, FinancialStatus::Overdue);
}

#[test]
fn test_sync_not_overdue_on_due_date() {
    let status = sync_status(FinancialStatus::Open, None, date(2025, 3, 31), date(2025, 3, 31));
    assert_eq!(status, FinancialStatus::Open);
}

#[test]
fn test_sync_settlement_wins_over_due_date() {
    let status = sync_status(
        FinancialStatus::Overdue,
        Some(date(2025, 4, 10)),
        date(2025, 3, 31),
        date(2025, 5, 1),
    );
    assert_eq!(status, FinancialStatus::Paid);
}

#[test]
fn test_sync_overdue_reverts_to_open_when_due_date_moved_forward() {
    let status = sync_status(FinancialStatus::Overdue, None, date(2025, 6, 30), date(2025, 4, 1));
    assert_eq!(status, FinancialStatus::Open);
}

#[test]
fn test_sync_canceled_is_terminal() {
    let status = sync_status(
        FinancialStatus::Canceled,
        Some(date(2025, 4, 10)),
        date(2025, 3, 31),
        date(2025, 5, 1),
    );
    assert_eq!(status, FinancialStatus::Canceled);
}

#[test]
fn test_sync_in_place() {
    let mut t = title();
    t.settlement_date = Some(date(2025, 3, 15));
    t.sync(date(2025, 3, 20));
    assert_eq!(t.status, FinancialStatus::Paid);
}

#[test]
fn test_validate_ok() {
    let mut t = title();
    t.discount = dec!(100.00);
    assert!(validate_title(&t).is_ok());
}

#[test]
fn test_validate_negative_fields_collected() {
    let mut t = title();
    t.discount = dec!(-1.00);
    t.penalty = dec!(-2.00);
    let errors = validate_title(&t).unwrap_err();
    assert!(errors.contains(&FinanceError::NegativeField { field: "discount" }));
    assert!(errors.contains(&FinanceError::NegativeField { field: "penalty" }));
}

#[test]
fn test_validate_discount_exceeds_amount() {
    let mut t = title();
    t.discount = dec!(1000.01);
    let errors = validate_title(&t).unwrap_err();
    assert!(errors.contains(&FinanceError::DiscountExceedsAmount));
    assert_eq!(FinanceError::DiscountExceedsAmount.field(), Some("discount"));
}

#[test]
fn test_validate_due_before_issue() {
    let mut t = title();
    t.due_date = date(2025, 2, 28);
    let errors = validate_title(&t).unwrap_err();
    assert_eq!(errors, vec![FinanceError::DueBeforeIssue]);
}

#[test]
fn test_validate_settlement_before_issue() {
    let mut t = title();
    t.settlement_date = Some(date(2025, 2, 1));
    t.status = FinancialStatus::Paid;
    let errors = validate_title(&t).unwrap_err();
    assert!(errors.contains(&FinanceError::SettlementBeforeIssue));
}

#[test]
fn test_validate_paid_requires_settlement() {
    let mut t = title();
    t.status = FinancialStatus::Paid;
    let errors = validate_title(&t).unwrap_err();
    assert_eq!(errors, vec![FinanceError::PaidWithoutSettlement]);
}

#[test]
fn test_validate_canceled_forbids_settlement() {
    let mut t = title();
    t.status = FinancialStatus::Canceled;
    t.settlement_date = Some(date(2025, 3, 15));
    let errors = validate_title(&t).unwrap_err();
    assert_eq!(errors, vec![FinanceError::CanceledWithSettlement]);
}

#[test]
fn test_payment_within_remaining_balance() {
    // total 500.00, one existing payment of 300.00 -> remaining 200.00
    let result = PaymentService::validate_payment(dec!(500.00), &[dec!(300.00)], None, dec!(200.00));
    assert!(result.is_ok());
}

#[test]
fn test_payment_exceeding_remaining_balance() {
    let result = PaymentService::validate_payment(dec!(500.00), &[dec!(300.00)], None, dec!(250.00));
    assert_eq!(
        result,
        Err(FinanceError::PaymentExceedsBalance {
            remaining: dec!(200.00)
        })
    );
}

#[test]
fn test_payment_edit_excludes_own_previous_amount() {
    // Editing the 300.00 payment itself: remaining is the full 500.00.
    let result =
        PaymentService::validate_payment(dec!(500.00), &[dec!(300.00)], Some(dec!(300.00)), dec!(500.00));
    assert!(result.is_ok());
}

#[test]
fn test_payment_must_be_positive() {
    let result = PaymentService::validate_payment(dec!(500.00), &[], None, dec!(0.00));
    assert_eq!(result, Err(FinanceError::NonPositivePayment));
}

#[test]
fn test_full_payment_does_not_settle() {
    // Accumulating payments to the full total leaves the title untouched:
    // settlement is an explicit action. Observed source behavior, kept.
    let mut t = title();
    assert!(PaymentService::validate_payment(t.total_amount(), &[], None, dec!(1000.00)).is_ok());
    t.sync(date(2025, 3, 20));
    assert_eq!(t.status, FinancialStatus::Open);
    assert_eq!(t.settlement_date, None);
}

#[test]
fn test_status_round_trip() {
    for status in [
        FinancialStatus::Open,
        FinancialStatus::Overdue,
        FinancialStatus::Paid,
        FinancialStatus::Canceled,
    ] {
        assert_eq!(FinancialStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(FinancialStatus::parse("bogus"), None);
}

#[test]
fn test_payment_method_round_trip() {
    for method in [
        PaymentMethod::Pix,
        PaymentMethod::Transfer,
        PaymentMethod::Boleto,
        PaymentMethod::Card,
        PaymentMethod::Cash,
        PaymentMethod::Other,
    ] {
        assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
    }
}

fn money_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn prop_sync_status_is_idempotent(
        settled in proptest::option::of(0i64..=100),
        due_offset in -100i64..=100,
    ) {
        let today = date(2025, 6, 15);
        let settlement = settled.map(|d| today - chrono::Days::new(u64::try_from(d).unwrap()));
        let due = if due_offset >= 0 {
            today + chrono::Days::new(u64::try_from(due_offset).unwrap())
        } else {
            today - chrono::Days::new(u64::try_from(-due_offset).unwrap())
        };
        let once = sync_status(FinancialStatus::Open, settlement, due, today);
        let twice = sync_status(once, settlement, due, today);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_total_amount_stable_under_resave(
        amount in money_strategy(),
        discount in money_strategy(),
        interest in money_strategy(),
        penalty in money_strategy(),
    ) {
        let mut t = title();
        t.amount = amount;
        t.discount = discount;
        t.interest = interest;
        t.penalty = penalty;
        let first = t.total_amount();
        // Repeated saves recompute from the same fields.
        prop_assert_eq!(t.total_amount(), first);
        prop_assert_eq!(first.scale(), 2);
    }

    #[test]
    fn prop_remaining_balance_never_counts_edited_payment_twice(
        total in money_strategy(),
        payment in money_strategy(),
    ) {
        let remaining =
            PaymentService::remaining_balance(total, &[payment], Some(payment));
        prop_assert_eq!(remaining, total);
    }
}
