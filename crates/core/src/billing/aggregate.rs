//! Invoice payment-status derivation.

use crate::finance::FinancialStatus;

use super::types::PaymentStatus;

/// Rolls up an invoice's payment status from its linked receivables.
///
/// An invoice with no receivables is unpaid; one unpaid receivable
/// keeps the invoice unpaid; only a fully-paid set marks it paid.
/// Triggered from the receivable side on every receivable save; the
/// repository persists the result only when it differs from the stored
/// value.
#[must_use]
pub fn recompute_payment_status(receivable_statuses: &[FinancialStatus]) -> PaymentStatus {
    if receivable_statuses.is_empty() {
        return PaymentStatus::Unpaid;
    }
    if receivable_statuses
        .iter()
        .any(|status| *status != FinancialStatus::Paid)
    {
        PaymentStatus::Unpaid
    } else {
        PaymentStatus::Paid
    }
}
