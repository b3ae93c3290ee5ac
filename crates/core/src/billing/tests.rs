use crate::finance::FinancialStatus;

use super::aggregate::recompute_payment_status;
use super::types::PaymentStatus;

#[test]
fn test_no_receivables_is_unpaid() {
    assert_eq!(recompute_payment_status(&[]), PaymentStatus::Unpaid);
}

#[test]
fn test_one_open_receivable_keeps_invoice_unpaid() {
    let statuses = [FinancialStatus::Paid, FinancialStatus::Open];
    assert_eq!(recompute_payment_status(&statuses), PaymentStatus::Unpaid);
}

#[test]
fn test_all_paid_marks_invoice_paid() {
    let statuses = [FinancialStatus::Paid, FinancialStatus::Paid];
    assert_eq!(recompute_payment_status(&statuses), PaymentStatus::Paid);
}

#[test]
fn test_canceled_receivable_keeps_invoice_unpaid() {
    let statuses = [FinancialStatus::Paid, FinancialStatus::Canceled];
    assert_eq!(recompute_payment_status(&statuses), PaymentStatus::Unpaid);
}

#[test]
fn test_recompute_is_idempotent() {
    let statuses = [FinancialStatus::Paid];
    let first = recompute_payment_status(&statuses);
    assert_eq!(recompute_payment_status(&statuses), first);
}
