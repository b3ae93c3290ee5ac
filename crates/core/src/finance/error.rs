//! Financial title error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by title validation and payment application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinanceError {
    /// A monetary field is negative.
    #[error("{field} cannot be negative")]
    NegativeField {
        /// The offending field.
        field: &'static str,
    },

    /// Discount exceeds the face amount.
    #[error("Discount cannot exceed the amount")]
    DiscountExceedsAmount,

    /// Due date earlier than issue date.
    #[error("Due date cannot be earlier than the issue date")]
    DueBeforeIssue,

    /// Settlement date earlier than issue date.
    #[error("Settlement date cannot be earlier than the issue date")]
    SettlementBeforeIssue,

    /// A paid title needs a settlement date.
    #[error("A paid title requires a settlement date")]
    PaidWithoutSettlement,

    /// A canceled title cannot carry a settlement date.
    #[error("A canceled title cannot have a settlement date")]
    CanceledWithSettlement,

    /// Payment amount must be positive.
    #[error("Payment amount must be greater than zero")]
    NonPositivePayment,

    /// Payment exceeds the remaining open balance.
    #[error("Payment exceeds the remaining open balance of {remaining}")]
    PaymentExceedsBalance {
        /// Remaining open balance of the parent title.
        remaining: Decimal,
    },

    /// A settled title cannot be canceled.
    #[error("A settled title cannot be canceled")]
    CancelSettled,
}

impl FinanceError {
    /// The form field this error maps to, when it is field-scoped.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NegativeField { field } => Some(field),
            Self::DiscountExceedsAmount => Some("discount"),
            Self::DueBeforeIssue => Some("due_date"),
            Self::SettlementBeforeIssue
            | Self::PaidWithoutSettlement
            | Self::CanceledWithSettlement => Some("settlement_date"),
            Self::NonPositivePayment | Self::PaymentExceedsBalance { .. } => Some("amount"),
            Self::CancelSettled => None,
        }
    }
}
