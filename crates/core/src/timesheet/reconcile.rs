//! Time entry totals, validation and the activity synchronizations.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use praxis_shared::types::quantize;

use crate::activity::ActivityStatus;

use super::error::TimesheetError;
use super::types::{EntryHours, ReviewDecision, TimeEntryStatus};

/// The authoritative total of an entry, recomputed on every save from
/// the entry-type-specific fields.
#[must_use]
pub fn total_hours(hours: &EntryHours) -> Decimal {
    let total = match hours {
        EntryHours::Daily { hours } => hours.unwrap_or(Decimal::ZERO),
        EntryHours::Weekly(week) => week
            .days()
            .into_iter()
            .map(|day| day.unwrap_or(Decimal::ZERO))
            .sum(),
    };
    quantize(total)
}

/// Validates an entry against its target activity and the activity's
/// remaining hours budget.
///
/// `approved_other` and `pending_other` are the summed totals of the
/// activity's other entries in those statuses; the entry being edited
/// must be excluded from both sums by the caller.
///
/// # Errors
///
/// Returns all violated rules.
pub fn validate_entry(
    activity_status: ActivityStatus,
    entry_start: NaiveDate,
    entry_end: NaiveDate,
    total: Decimal,
    activity_hours: Decimal,
    approved_other: Decimal,
    pending_other: Decimal,
) -> Result<(), Vec<TimesheetError>> {
    let mut errors = Vec::new();

    if activity_status != ActivityStatus::Released {
        errors.push(TimesheetError::ActivityNotReleased);
    }
    if entry_end < entry_start {
        errors.push(TimesheetError::EndBeforeStart);
    }
    if total <= Decimal::ZERO {
        errors.push(TimesheetError::NonPositiveHours);
    } else {
        let available = activity_hours - approved_other - pending_other;
        if total > available {
            errors.push(TimesheetError::ExceedsAvailableHours { available });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Applies a review decision to a pending entry.
///
/// `Pending -> {Approved, Rejected}`; both outcomes are terminal and a
/// rejection carries a mandatory reason.
///
/// # Errors
///
/// Returns `TimesheetError::AlreadyReviewed` for terminal entries and
/// `TimesheetError::RejectionReasonRequired` for empty reasons.
pub fn review(
    current: TimeEntryStatus,
    decision: &ReviewDecision,
) -> Result<TimeEntryStatus, TimesheetError> {
    if current.is_terminal() {
        return Err(TimesheetError::AlreadyReviewed { status: current });
    }
    match decision {
        ReviewDecision::Approve => Ok(TimeEntryStatus::Approved),
        ReviewDecision::Reject { reason } => {
            if reason.trim().is_empty() {
                return Err(TimesheetError::RejectionReasonRequired);
            }
            Ok(TimeEntryStatus::Rejected)
        }
    }
}

/// The date an activity's `actual_start` should be set to, when it is
/// still unset and the activity has at least one entry.
///
/// `first_entry_start` is the earliest `start_date` among the
/// activity's entries. The caller must apply the result with a guarded
/// conditional update (only while `actual_start` is still null) so a
/// concurrently-set value is never clobbered.
#[must_use]
pub fn activity_start_sync(
    current_actual_start: Option<NaiveDate>,
    first_entry_start: Option<NaiveDate>,
) -> Option<NaiveDate> {
    match (current_actual_start, first_entry_start) {
        (None, Some(first)) => Some(first),
        _ => None,
    }
}

/// The date span of an approved entry, as seen by the completion sync.
#[derive(Debug, Clone, Copy)]
pub struct ApprovedSpan {
    /// Entry start date.
    pub start_date: NaiveDate,
    /// Entry end date, when recorded.
    pub end_date: Option<NaiveDate>,
    /// Entry total hours.
    pub total_hours: Decimal,
}

impl ApprovedSpan {
    fn effective_end(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }
}

/// The changes an approval requires on the owning activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionUpdate {
    /// Set the activity status to done.
    pub mark_done: bool,
    /// Advance `actual_end` to this date.
    pub actual_end: Option<NaiveDate>,
}

/// Computes the activity update for an approval, from scratch.
///
/// Re-summing all approved entries on every approval keeps this
/// idempotent: once the approved total reaches the activity's hours the
/// activity is done, and `actual_end` follows the latest approved end
/// date. It must run on EVERY approval, not only the one that first
/// reaches the threshold, because a later approval can still push
/// `actual_end` forward when end dates are not monotonic with approval
/// order. `actual_end` never regresses.
#[must_use]
pub fn completion_sync(
    activity_hours: Decimal,
    activity_status: ActivityStatus,
    current_actual_end: Option<NaiveDate>,
    approved: &[ApprovedSpan],
) -> Option<CompletionUpdate> {
    if activity_hours <= Decimal::ZERO {
        return None;
    }
    let approved_total: Decimal = approved.iter().map(|span| span.total_hours).sum();
    if approved_total < activity_hours {
        return None;
    }

    let last_end = approved.iter().map(ApprovedSpan::effective_end).max();
    let mark_done = activity_status != ActivityStatus::Done;
    let actual_end = match (last_end, current_actual_end) {
        (Some(last), Some(current)) if last > current => Some(last),
        (Some(last), None) => Some(last),
        _ => None,
    };

    if mark_done || actual_end.is_some() {
        Some(CompletionUpdate {
            mark_done,
            actual_end,
        })
    } else {
        None
    }
}
