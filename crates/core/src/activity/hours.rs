//! Contingency-adjusted activity hours.
//!
//! Computed on demand from the activity's raw hours and the owning
//! project's contingency percent; never persisted.

use rust_decimal::Decimal;

use praxis_shared::types::quantize;

use crate::project::contingency_factor;

/// Hours of the activity available for time entries after the owning
/// project's contingency buffer.
#[must_use]
pub fn hours_available(hours: Decimal, project_contingency_percent: Decimal) -> Decimal {
    quantize(hours * contingency_factor(project_contingency_percent))
}

/// The portion of the activity's hours held back as contingency.
#[must_use]
pub fn hours_contingency(hours: Decimal, project_contingency_percent: Decimal) -> Decimal {
    quantize(hours - hours_available(hours, project_contingency_percent))
}
