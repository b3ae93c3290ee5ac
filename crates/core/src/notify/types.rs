//! Notification boundary types.

use chrono::NaiveTime;
use thiserror::Error;

use praxis_shared::config::NotifierConfig;

use super::phone::normalize_phone;

/// Errors at the delivery boundary.
///
/// These are swallowed by the dispatch helpers (logged, counted in the
/// delivery report); they never abort the triggering mutation.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The transport failed to deliver.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Best-effort delivery transport for a single recipient.
///
/// Implementations live at the application boundary (the real one is an
/// HTTP client to the messaging provider; tests and the scheduler
/// default use a logging transport).
pub trait Notifier {
    /// Attempts delivery of `message` to `phone` (normalized digits).
    ///
    /// # Errors
    ///
    /// Returns a `NotifyError` on failure; callers log and continue.
    fn send(&self, phone: &str, message: &str) -> Result<(), NotifyError>;
}

/// The daily report kinds the scheduler can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Consultants' activities planned for today.
    ActivitiesToday,
    /// Consultants' overdue activities.
    ActivitiesOverdue,
    /// Admin list of titles due today.
    AdminDueTitles,
}

impl ReportKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActivitiesToday => "activities_today",
            Self::ActivitiesOverdue => "activities_overdue",
            Self::AdminDueTitles => "admin_due_titles",
        }
    }
}

/// Runtime notifier settings, parsed once from configuration at startup.
#[derive(Debug, Clone, Default)]
pub struct NotifierSettings {
    /// Normalized financial/admin recipient numbers.
    pub financial_numbers: Vec<String>,
    /// Local schedule time for the activities-of-today report.
    pub daily_activities_time: Option<NaiveTime>,
    /// Local schedule time for the overdue-activities report.
    pub daily_overdue_time: Option<NaiveTime>,
    /// Local schedule time for the titles-due-today report.
    pub daily_admin_due_time: Option<NaiveTime>,
    /// Country code used when normalizing consultant numbers.
    pub country_code: String,
}

impl NotifierSettings {
    /// Builds runtime settings from the loaded configuration.
    ///
    /// Malformed schedule times and numbers are dropped silently; an
    /// unset schedule simply never fires.
    #[must_use]
    pub fn from_config(config: &NotifierConfig) -> Self {
        let country_code = config.default_country_code.clone();
        let financial_numbers = config
            .financial_numbers
            .iter()
            .filter_map(|number| normalize_phone(number, &country_code))
            .collect();
        Self {
            financial_numbers,
            daily_activities_time: parse_schedule_time(config.daily_activities_time.as_deref()),
            daily_overdue_time: parse_schedule_time(config.daily_overdue_time.as_deref()),
            daily_admin_due_time: parse_schedule_time(config.daily_admin_due_time.as_deref()),
            country_code,
        }
    }

    /// The schedule time of a report kind.
    #[must_use]
    pub fn schedule_for(&self, kind: ReportKind) -> Option<NaiveTime> {
        match kind {
            ReportKind::ActivitiesToday => self.daily_activities_time,
            ReportKind::ActivitiesOverdue => self.daily_overdue_time,
            ReportKind::AdminDueTitles => self.daily_admin_due_time,
        }
    }
}

fn parse_schedule_time(value: Option<&str>) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value?.trim(), "%H:%M").ok()
}
