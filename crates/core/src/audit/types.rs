//! Observation and snapshot types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use praxis_shared::types::{format_bool_br, format_date_br, format_decimal_br};

use crate::project::{ContractType, ProjectStatus};

/// Kind of a project observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationKind {
    /// A note typed by a user.
    Manual,
    /// Generated by the system (e.g. the project receipt note).
    Auto,
    /// A field-change diff of the project record.
    Change,
}

impl ObservationKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
            Self::Change => "change",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "manual" => Some(Self::Manual),
            "auto" => Some(Self::Auto),
            "change" => Some(Self::Change),
            _ => None,
        }
    }
}

/// A referenced entity as it appears in a diff: compared by id,
/// displayed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefValue {
    /// Referenced entity id.
    pub id: Uuid,
    /// Display name at snapshot time.
    pub display: String,
}

/// One changed field of a change observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Field name.
    pub field: String,
    /// pt-BR field label.
    pub label: String,
    /// Formatted value before the save.
    pub before: String,
    /// Formatted value after the save.
    pub after: String,
}

/// A field value tagged with its semantic type, driving both the
/// equality used for diffing and the display formatting.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Free text.
    Text(Option<String>),
    /// A calendar date.
    Date(Option<NaiveDate>),
    /// A localized decimal.
    Decimal(Option<Decimal>),
    /// An enum choice: (code, pt-BR label).
    Choice(Option<(&'static str, &'static str)>),
    /// A referenced entity.
    Reference(Option<RefValue>),
    /// A boolean.
    Bool(Option<bool>),
}

impl FieldValue {
    /// Whether two values are the same for diffing purposes.
    ///
    /// References compare by id (display names may drift); choices by
    /// code; everything else by value.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Choice(a), Self::Choice(b)) => {
                a.map(|(code, _)| code) == b.map(|(code, _)| code)
            }
            (Self::Reference(a), Self::Reference(b)) => {
                a.as_ref().map(|r| r.id) == b.as_ref().map(|r| r.id)
            }
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }

    /// Formats the value for display; `-` stands for absent/empty.
    #[must_use]
    pub fn format(&self) -> String {
        match self {
            Self::Text(Some(text)) if !text.is_empty() => text.clone(),
            Self::Date(Some(date)) => format_date_br(*date),
            Self::Decimal(Some(value)) => format_decimal_br(*value),
            Self::Choice(Some((_, label))) => (*label).to_string(),
            Self::Reference(Some(reference)) => reference.display.clone(),
            Self::Bool(Some(value)) => format_bool_br(*value).to_string(),
            _ => "-".to_string(),
        }
    }
}

/// The diffable fields of a project at a point in time.
///
/// Built by the persistence layer before and after a save; the diff
/// engine never touches the database.
#[derive(Debug, Clone)]
pub struct ProjectSnapshot {
    /// Billing client.
    pub billing_client: Option<RefValue>,
    /// Project client.
    pub project_client: Option<RefValue>,
    /// Project description.
    pub description: String,
    /// Date the consultancy received the project.
    pub received_date: Option<NaiveDate>,
    /// Planned go-live date.
    pub planned_go_live_date: Option<NaiveDate>,
    /// Contract classification.
    pub contract_type: ContractType,
    /// Delivery status.
    pub status: ProjectStatus,
    /// Total contracted value.
    pub total_value: Decimal,
    /// Hourly rate.
    pub hourly_rate: Decimal,
    /// Contingency percent.
    pub contingency_percent: Decimal,
    /// Internal manager.
    pub internal_manager: Option<RefValue>,
    /// External manager.
    pub external_manager: Option<RefValue>,
    /// Client-side user.
    pub client_user: Option<RefValue>,
}
