//! Repository abstractions for data access.
//!
//! Each repository orchestrates the pure core derivations around
//! transactional persistence: derive -> validate -> write, with
//! cross-entity cascades applied inside the same transaction as the
//! triggering save.

pub mod activity;
pub mod billing;
pub mod dispatch_log;
pub mod financial;
pub mod project;
pub mod timesheet;

pub use activity::ActivityRepository;
pub use billing::InvoiceRepository;
pub use dispatch_log::DispatchLogRepository;
pub use financial::{PayableRepository, ReceivableRepository};
pub use project::ProjectRepository;
pub use timesheet::TimeEntryRepository;

use std::sync::Arc;

use praxis_core::notify::{normalize_phone, send_to_numbers, Notifier, NotifierSettings};

/// Fan-out point for notices fired on observed transitions.
///
/// Wraps the injected transport and recipient settings; deliveries are
/// best effort and never fail the triggering save.
#[derive(Clone)]
pub struct NotificationGateway {
    notifier: Arc<dyn Notifier + Send + Sync>,
    settings: NotifierSettings,
}

impl NotificationGateway {
    /// Creates a gateway over a transport and recipient settings.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier + Send + Sync>, settings: NotifierSettings) -> Self {
        Self { notifier, settings }
    }

    /// The recipient settings.
    #[must_use]
    pub fn settings(&self) -> &NotifierSettings {
        &self.settings
    }

    /// Sends to the financial/admin recipient set.
    pub fn to_admins(&self, message: &str) {
        send_to_numbers(
            self.notifier.as_ref(),
            &self.settings.financial_numbers,
            message,
        );
    }

    /// Sends to a single consultant phone, normalizing it first.
    pub fn to_consultant(&self, phone: &str, message: &str) {
        if let Some(normalized) = normalize_phone(phone, &self.settings.country_code) {
            send_to_numbers(self.notifier.as_ref(), &[normalized], message);
        }
    }
}
