//! Time entry domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status of a time entry.
///
/// `Pending` may move to `Approved` or `Rejected`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeEntryStatus {
    /// Awaiting review.
    Pending,
    /// Approved; counts toward the activity's consumed hours.
    Approved,
    /// Rejected with a reason.
    Rejected,
}

impl TimeEntryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true once the entry can no longer be reviewed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for TimeEntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hours per weekday of a weekly entry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeekHours {
    /// Monday hours.
    pub monday: Option<Decimal>,
    /// Tuesday hours.
    pub tuesday: Option<Decimal>,
    /// Wednesday hours.
    pub wednesday: Option<Decimal>,
    /// Thursday hours.
    pub thursday: Option<Decimal>,
    /// Friday hours.
    pub friday: Option<Decimal>,
    /// Saturday hours.
    pub saturday: Option<Decimal>,
    /// Sunday hours.
    pub sunday: Option<Decimal>,
}

impl WeekHours {
    /// The seven day values in order.
    #[must_use]
    pub fn days(&self) -> [Option<Decimal>; 7] {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
    }
}

/// The hours shape of a time entry.
///
/// `total_hours` on the persisted record is always recomputed from
/// this; the stored total is never trusted as input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "entry_type")]
pub enum EntryHours {
    /// A single figure for the whole period.
    Daily {
        /// Hours worked.
        hours: Option<Decimal>,
    },
    /// One figure per weekday.
    Weekly(WeekHours),
}

impl EntryHours {
    /// The string representation of the entry type.
    #[must_use]
    pub fn type_str(&self) -> &'static str {
        match self {
            Self::Daily { .. } => "daily",
            Self::Weekly(_) => "weekly",
        }
    }
}

/// The reviewer's decision over a pending entry.
#[derive(Debug, Clone)]
pub enum ReviewDecision {
    /// Approve the entry.
    Approve,
    /// Reject the entry; the reason is mandatory.
    Reject {
        /// Why the entry was rejected.
        reason: String,
    },
}
