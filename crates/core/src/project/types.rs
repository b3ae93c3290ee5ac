//! Project domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commercial contract classification of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Closed package sold by hours.
    FixedHours,
    /// Closed package sold by value; contracted hours are derived.
    FixedValue,
    /// Project billed by the hour.
    HourlyProject,
    /// One-off demand.
    AdHoc,
}

impl ContractType {
    /// Returns the string representation of the contract type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixedHours => "fixed_hours",
            Self::FixedValue => "fixed_value",
            Self::HourlyProject => "hourly_project",
            Self::AdHoc => "ad_hoc",
        }
    }

    /// Parses a contract type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed_hours" => Some(Self::FixedHours),
            "fixed_value" => Some(Self::FixedValue),
            "hourly_project" => Some(Self::HourlyProject),
            "ad_hoc" => Some(Self::AdHoc),
            _ => None,
        }
    }

    /// pt-BR display label, used in audit trails.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FixedHours => "Pacote fechado por hora",
            Self::FixedValue => "Pacote fechado por valor",
            Self::HourlyProject => "Projeto por horas",
            Self::AdHoc => "Demanda avulsa",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Delivery status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Still being quoted.
    Budget,
    /// In implementation.
    Implementation,
    /// Paused.
    Paused,
    /// Canceled.
    Canceled,
    /// Completed.
    Completed,
}

impl ProjectStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Implementation => "implementation",
            Self::Paused => "paused",
            Self::Canceled => "canceled",
            Self::Completed => "completed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "budget" => Some(Self::Budget),
            "implementation" => Some(Self::Implementation),
            "paused" => Some(Self::Paused),
            "canceled" => Some(Self::Canceled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// pt-BR display label, used in audit trails.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Budget => "Orcamento",
            Self::Implementation => "Em Implantacao",
            Self::Paused => "Paralizado",
            Self::Canceled => "Cancelado",
            Self::Completed => "Finalizado",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The financial inputs of a project, as entered by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFinancials {
    /// Contract classification.
    pub contract_type: ContractType,
    /// Total contracted value.
    pub total_value: Decimal,
    /// Hourly rate; must be positive.
    pub hourly_rate: Decimal,
    /// Contracted hours.
    pub contracted_hours: Decimal,
    /// Contingency percentage in [0, 100].
    pub contingency_percent: Decimal,
    /// Planned cutover window start, if scheduled.
    pub cutover_planned_start: Option<NaiveDate>,
    /// Planned cutover window end, if scheduled.
    pub cutover_planned_end: Option<NaiveDate>,
}

/// The four derived financial figures of a project.
///
/// Recomputed from [`ProjectFinancials`] on every save, regardless of
/// which fields changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    /// Total contracted value (derived for non fixed-value contracts).
    pub total_value: Decimal,
    /// Contracted hours (derived for fixed-value contracts).
    pub contracted_hours: Decimal,
    /// Hours available after the contingency buffer.
    pub available_hours: Decimal,
    /// Value available after the contingency buffer.
    pub available_value: Decimal,
}
