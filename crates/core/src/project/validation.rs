//! Project financial validation.

use rust_decimal::Decimal;

use super::error::ProjectError;
use super::types::{ContractType, ProjectFinancials};

/// Validates the financial inputs of a project.
///
/// Runs before the metrics derivation is persisted; collects every
/// violation so the caller can surface a complete field -> message
/// mapping.
///
/// # Errors
///
/// Returns all violated invariants.
pub fn validate_financials(financials: &ProjectFinancials) -> Result<(), Vec<ProjectError>> {
    let mut errors = Vec::new();

    if financials.contingency_percent < Decimal::ZERO
        || financials.contingency_percent > Decimal::ONE_HUNDRED
    {
        errors.push(ProjectError::ContingencyOutOfRange);
    }
    if financials.hourly_rate <= Decimal::ZERO {
        errors.push(ProjectError::NonPositiveHourlyRate);
    }
    if financials.contract_type == ContractType::FixedValue {
        if financials.total_value <= Decimal::ZERO {
            errors.push(ProjectError::NonPositiveTotalValue);
        }
    } else if financials.contracted_hours <= Decimal::ZERO {
        errors.push(ProjectError::NonPositiveContractedHours);
    }
    if financials.total_value < Decimal::ZERO {
        errors.push(ProjectError::NegativeTotalValue);
    }
    if let (Some(start), Some(end)) =
        (financials.cutover_planned_start, financials.cutover_planned_end)
        && end < start
    {
        errors.push(ProjectError::CutoverEndBeforeStart);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
