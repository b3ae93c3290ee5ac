//! Contract metrics derivation.

use rust_decimal::Decimal;

use praxis_shared::types::quantize;

use super::types::{ContractType, ProjectFinancials, ProjectMetrics};

/// The contingency factor: `max(0, 1 - percent / 100)`.
///
/// Applied to hours and value to derive the buffered "available"
/// figures. Shared with the activity hours ledger.
#[must_use]
pub fn contingency_factor(contingency_percent: Decimal) -> Decimal {
    let factor = Decimal::ONE - contingency_percent / Decimal::ONE_HUNDRED;
    factor.max(Decimal::ZERO)
}

/// Derives the four financial figures of a project from its inputs.
///
/// Fixed-value contracts derive contracted hours from the total value;
/// every other contract type derives the total value from the
/// contracted hours. A non-positive hourly rate zeroes the derived
/// side. Runs unconditionally on every project save and is idempotent:
/// feeding the output back in yields the same output.
#[must_use]
pub fn calculate_metrics(financials: &ProjectFinancials) -> ProjectMetrics {
    let mut total_value = financials.total_value;
    let mut contracted = financials.contracted_hours;

    if financials.contract_type == ContractType::FixedValue {
        contracted = if financials.hourly_rate > Decimal::ZERO {
            quantize(total_value / financials.hourly_rate)
        } else {
            Decimal::ZERO
        };
    } else {
        total_value = if financials.hourly_rate > Decimal::ZERO {
            quantize(contracted * financials.hourly_rate)
        } else {
            Decimal::ZERO
        };
    }

    let factor = contingency_factor(financials.contingency_percent);
    ProjectMetrics {
        total_value,
        contracted_hours: contracted,
        available_hours: quantize(contracted * factor),
        available_value: quantize(total_value * factor),
    }
}
