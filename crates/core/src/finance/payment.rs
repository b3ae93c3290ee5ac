//! Payment application against a title's open balance.

use rust_decimal::Decimal;

use super::error::FinanceError;

/// Stateless service validating payments against a parent title.
pub struct PaymentService;

impl PaymentService {
    /// Remaining open balance of a title given its existing payments.
    ///
    /// When a payment is being edited, its previous amount is excluded
    /// from the paid total so the edit can keep or lower its own value.
    #[must_use]
    pub fn remaining_balance(
        title_total: Decimal,
        existing_payments: &[Decimal],
        editing_amount: Option<Decimal>,
    ) -> Decimal {
        let mut paid_total: Decimal = existing_payments.iter().copied().sum();
        if let Some(editing) = editing_amount {
            paid_total -= editing;
        }
        title_total - paid_total
    }

    /// Validates a candidate payment amount against the remaining balance.
    ///
    /// Advisory validation at the application boundary: accepting a
    /// payment never transitions the parent title. Even when payments
    /// accumulate to the full total, settlement remains a distinct,
    /// explicit action (setting the settlement date on the title).
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::NonPositivePayment` for amounts <= 0 and
    /// `FinanceError::PaymentExceedsBalance` when the candidate exceeds
    /// the remaining open balance.
    pub fn validate_payment(
        title_total: Decimal,
        existing_payments: &[Decimal],
        editing_amount: Option<Decimal>,
        candidate: Decimal,
    ) -> Result<(), FinanceError> {
        if candidate <= Decimal::ZERO {
            return Err(FinanceError::NonPositivePayment);
        }
        let remaining = Self::remaining_balance(title_total, existing_payments, editing_amount);
        if candidate > remaining {
            return Err(FinanceError::PaymentExceedsBalance { remaining });
        }
        Ok(())
    }
}
