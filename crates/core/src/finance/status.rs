//! Automatic status synchronization for financial titles.

use chrono::NaiveDate;

use super::types::{FinancialStatus, Title};

/// Derives the status of a title from its settlement and due dates.
///
/// Pure function of `(status, settlement_date, due_date, today)`:
/// - `Canceled` is left unchanged (cancellation is an explicit action,
///   never derived).
/// - A settlement date always wins: the title is `Paid` regardless of
///   the due date.
/// - A past due date makes the title `Overdue`.
/// - An `Overdue` title whose due date is no longer past (the due date
///   was edited forward) reverts to `Open`.
/// - Otherwise the status is unchanged.
///
/// Runs on every save of a payable/receivable, before invariant
/// validation.
#[must_use]
pub fn sync_status(
    status: FinancialStatus,
    settlement_date: Option<NaiveDate>,
    due_date: NaiveDate,
    today: NaiveDate,
) -> FinancialStatus {
    if status == FinancialStatus::Canceled {
        return status;
    }
    if settlement_date.is_some() {
        return FinancialStatus::Paid;
    }
    if due_date < today {
        return FinancialStatus::Overdue;
    }
    if status == FinancialStatus::Overdue {
        return FinancialStatus::Open;
    }
    status
}

impl Title {
    /// Applies [`sync_status`] to this title in place.
    pub fn sync(&mut self, today: NaiveDate) {
        self.status = sync_status(self.status, self.settlement_date, self.due_date, today);
    }
}
