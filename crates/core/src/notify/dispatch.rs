//! Delivery fan-out and the daily dispatch decision.

use chrono::NaiveDateTime;
use tracing::warn;

use super::phone::mask_phone;
use super::types::Notifier;

/// Outcome of a fan-out to a recipient set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Recipients attempted.
    pub attempted: usize,
    /// Deliveries the transport accepted.
    pub delivered: usize,
    /// Deliveries the transport refused; logged, never raised.
    pub failed: usize,
}

/// Per-report send counts of one dispatch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchCounts {
    /// Activity-of-today report messages sent.
    pub activities_today: usize,
    /// Overdue-activity report messages sent.
    pub activities_overdue: usize,
    /// Titles-due-today messages sent.
    pub admin_due_titles: usize,
}

impl DispatchCounts {
    /// Whether any report fired in this run.
    #[must_use]
    pub fn any(&self) -> bool {
        self.activities_today + self.activities_overdue + self.admin_due_titles > 0
    }
}

/// Sends a message to every number, best effort.
///
/// Failures are logged with the phone masked and counted in the report;
/// nothing propagates to the caller.
pub fn send_to_numbers<N: Notifier + ?Sized>(
    notifier: &N,
    numbers: &[String],
    message: &str,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    for phone in numbers {
        report.attempted += 1;
        match notifier.send(phone, message) {
            Ok(()) => report.delivered += 1,
            Err(error) => {
                report.failed += 1;
                warn!(phone = %mask_phone(phone), %error, "notification delivery failed");
            }
        }
    }
    report
}

/// Whether a scheduled daily report should fire now.
///
/// A report fires when its configured hour and minute match the local
/// clock and it has not been sent today. `force` bypasses both checks
/// except the unset schedule. Best effort: if the process misses the
/// scheduled minute, that day's dispatch is skipped in non-forced mode.
#[must_use]
pub fn should_send(
    schedule: Option<chrono::NaiveTime>,
    now: NaiveDateTime,
    already_sent_today: bool,
    force: bool,
) -> bool {
    let Some(schedule) = schedule else {
        return false;
    };
    if force {
        return true;
    }
    if already_sent_today {
        return false;
    }
    use chrono::Timelike;
    now.time().hour() == schedule.hour() && now.time().minute() == schedule.minute()
}
