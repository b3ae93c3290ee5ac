//! Time entry error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::TimeEntryStatus;

/// Errors raised by time entry validation and review.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimesheetError {
    /// Entries may only target released activities.
    #[error("Time entries are only allowed against released activities")]
    ActivityNotReleased,

    /// Total hours must be positive.
    #[error("Total hours must be greater than zero")]
    NonPositiveHours,

    /// Entry exceeds the activity's remaining hours.
    #[error("Hours exceed the activity's available balance of {available}")]
    ExceedsAvailableHours {
        /// Remaining balance after other approved and pending entries.
        available: Decimal,
    },

    /// Only pending entries can be reviewed.
    #[error("Cannot review an entry in status {status}")]
    AlreadyReviewed {
        /// The entry's terminal status.
        status: TimeEntryStatus,
    },

    /// A rejection needs a reason.
    #[error("A rejection reason is required")]
    RejectionReasonRequired,

    /// End date earlier than start date.
    #[error("End date must be on or after the start date")]
    EndBeforeStart,
}

impl TimesheetError {
    /// The form field this error maps to, when it is field-scoped.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::ActivityNotReleased => Some("activity"),
            Self::NonPositiveHours => Some("hours"),
            Self::EndBeforeStart => Some("end_date"),
            Self::RejectionReasonRequired => Some("rejection_reason"),
            Self::ExceedsAvailableHours { .. } | Self::AlreadyReviewed { .. } => None,
        }
    }
}
