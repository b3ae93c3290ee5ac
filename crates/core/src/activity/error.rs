//! Activity error types.

use thiserror::Error;

/// Errors raised by activity validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    /// Consultant hourly rate cannot be negative.
    #[error("Consultant hourly rate cannot be negative")]
    NegativeConsultantRate,

    /// Selected module does not belong to the selected product.
    #[error("Module does not belong to the selected product")]
    ModuleNotInProduct,

    /// Selected submodule does not belong to the selected module.
    #[error("Submodule does not belong to the selected module")]
    SubmoduleNotInModule,

    /// Selected submodule does not belong to the selected product.
    #[error("Submodule does not belong to the selected product")]
    SubmoduleNotInProduct,

    /// Planned end before planned start.
    #[error("Planned end must be on or after the planned start")]
    PlannedEndBeforeStart,

    /// Actual end before actual start.
    #[error("Actual end must be on or after the actual start")]
    ActualEndBeforeStart,

    /// Company-assumed hours require a reason.
    #[error("Assumed hours require a reason")]
    AssumedReasonRequired,
}

impl ActivityError {
    /// The form field this error maps to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::NegativeConsultantRate => "consultant_hourly_rate",
            Self::ModuleNotInProduct => "module",
            Self::SubmoduleNotInModule | Self::SubmoduleNotInProduct => "submodule",
            Self::PlannedEndBeforeStart => "planned_end",
            Self::ActualEndBeforeStart => "actual_end",
            Self::AssumedReasonRequired => "assumed_reason",
        }
    }
}
