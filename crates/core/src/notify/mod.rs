//! Notification boundary: message templates, recipient routing and the
//! daily dispatch decision.
//!
//! The actual delivery transport is an external collaborator behind the
//! [`Notifier`] trait. Failures are reported and logged, never raised
//! into the triggering business transaction.

pub mod dispatch;
pub mod messages;
pub mod phone;
pub mod types;

#[cfg(test)]
mod tests;

pub use dispatch::{send_to_numbers, should_send, DeliveryReport, DispatchCounts};
pub use messages::{
    format_currency, format_hours, format_period, ActivityDigest, BillingClosureDigest,
    TimeEntryDigest, TitleDigest,
};
pub use phone::{mask_phone, normalize_phone};
pub use types::{Notifier, NotifierSettings, NotifyError, ReportKind};
