//! Project error types.

use thiserror::Error;

/// Errors raised by project financial validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// Contingency outside [0, 100].
    #[error("Contingency percent must be between 0 and 100")]
    ContingencyOutOfRange,

    /// Hourly rate must be positive.
    #[error("Hourly rate must be greater than zero")]
    NonPositiveHourlyRate,

    /// A fixed-value contract needs a positive total value.
    #[error("Total value must be greater than zero")]
    NonPositiveTotalValue,

    /// Non fixed-value contracts need positive contracted hours.
    #[error("Contracted hours must be greater than zero")]
    NonPositiveContractedHours,

    /// Total value can never be negative.
    #[error("Total value cannot be negative")]
    NegativeTotalValue,

    /// Cutover window end before its start.
    #[error("Planned cutover end must be on or after its start")]
    CutoverEndBeforeStart,
}

impl ProjectError {
    /// The form field this error maps to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::ContingencyOutOfRange => "contingency_percent",
            Self::NonPositiveHourlyRate => "hourly_rate",
            Self::NonPositiveTotalValue | Self::NegativeTotalValue => "total_value",
            Self::NonPositiveContractedHours => "contracted_hours",
            Self::CutoverEndBeforeStart => "cutover_planned_end",
        }
    }
}
