//! Invariant validation for financial titles.

use rust_decimal::Decimal;

use super::error::FinanceError;
use super::types::{FinancialStatus, Title};

/// Validates the field invariants of a title.
///
/// Collects every violation instead of stopping at the first, so
/// callers can surface a complete field -> message mapping. Runs after
/// [`super::sync_status`] on every save; a failed validation never
/// partially applies.
///
/// # Errors
///
/// Returns all violated invariants.
pub fn validate_title(title: &Title) -> Result<(), Vec<FinanceError>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("amount", title.amount),
        ("discount", title.discount),
        ("interest", title.interest),
        ("penalty", title.penalty),
    ] {
        if value < Decimal::ZERO {
            errors.push(FinanceError::NegativeField { field });
        }
    }

    if title.discount > title.amount {
        errors.push(FinanceError::DiscountExceedsAmount);
    }
    if title.due_date < title.issue_date {
        errors.push(FinanceError::DueBeforeIssue);
    }
    if let Some(settlement) = title.settlement_date
        && settlement < title.issue_date
    {
        errors.push(FinanceError::SettlementBeforeIssue);
    }
    if title.status == FinancialStatus::Paid && title.settlement_date.is_none() {
        errors.push(FinanceError::PaidWithoutSettlement);
    }
    if title.status == FinancialStatus::Canceled && title.settlement_date.is_some() {
        errors.push(FinanceError::CanceledWithSettlement);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
