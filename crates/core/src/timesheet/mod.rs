//! Time entry reconciliation: totals, availability cap, review machine
//! and the activity synchronizations driven by approvals.

pub mod error;
pub mod reconcile;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::TimesheetError;
pub use reconcile::{
    activity_start_sync, completion_sync, review, total_hours, validate_entry, ApprovedSpan,
    CompletionUpdate,
};
pub use types::{EntryHours, ReviewDecision, TimeEntryStatus, WeekHours};
