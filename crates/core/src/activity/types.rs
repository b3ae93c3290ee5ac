//! Project activity domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

use praxis_shared::types::{ModuleId, ProductId, SubmoduleId};

/// Execution status of a project activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Planned, not yet released for time entries.
    Planned,
    /// Released: consultants may log time against it.
    Released,
    /// Explicitly marked in progress.
    InProgress,
    /// Done; set automatically when the hours budget is consumed.
    Done,
    /// Blocked.
    Blocked,
    /// Canceled.
    Canceled,
}

impl ActivityStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Released => "released",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Blocked => "blocked",
            Self::Canceled => "canceled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "planned" => Some(Self::Planned),
            "released" => Some(Self::Released),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "blocked" => Some(Self::Blocked),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Returns true once the activity no longer accepts any work.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Done | Self::Canceled)
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who the activity's hours are billed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    /// Billable to the client.
    Billable,
    /// Hours assumed by the consultancy; requires a reason.
    AssumedCompany,
    /// Hours assumed by the consultant.
    AssumedConsultant,
    /// Activity assigned to the client itself.
    ClientAssigned,
}

impl BillingType {
    /// Returns the string representation of the billing type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Billable => "billable",
            Self::AssumedCompany => "assumed_company",
            Self::AssumedConsultant => "assumed_consultant",
            Self::ClientAssigned => "client_assigned",
        }
    }

    /// Parses a billing type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "billable" => Some(Self::Billable),
            "assumed_company" => Some(Self::AssumedCompany),
            "assumed_consultant" => Some(Self::AssumedConsultant),
            "client_assigned" => Some(Self::ClientAssigned),
            _ => None,
        }
    }

    /// pt-BR display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Billable => "Faturavel",
            Self::AssumedCompany => "Horas Assumidas (empresa)",
            Self::AssumedConsultant => "Horas Assumidas (Consultor)",
            Self::ClientAssigned => "Atividade atribuida ao Cliente",
        }
    }
}

/// Why hours were assumed by the consultancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssumedReason {
    /// Rework of a delivered activity.
    Rework,
    /// Work that was not planned.
    Unplanned,
    /// Courtesy to the client.
    Courtesy,
}

impl AssumedReason {
    /// Returns the string representation of the reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rework => "rework",
            Self::Unplanned => "unplanned",
            Self::Courtesy => "courtesy",
        }
    }

    /// Parses a reason from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rework" => Some(Self::Rework),
            "unplanned" => Some(Self::Unplanned),
            "courtesy" => Some(Self::Courtesy),
            _ => None,
        }
    }

    /// pt-BR display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rework => "Retrabalho",
            Self::Unplanned => "Nao Planejadas",
            Self::Courtesy => "Cortezia",
        }
    }
}

/// Criticality of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
    /// Critical.
    Critical,
}

impl Criticality {
    /// Returns the string representation of the criticality.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Parses a criticality from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// pt-BR display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Baixa",
            Self::Medium => "Media",
            Self::High => "Alta",
            Self::Critical => "Critica",
        }
    }
}

/// Where the activity sits relative to its planned window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleState {
    /// Planned start is still in the future.
    NotStarted,
    /// Inside or before the planned window.
    OnTime,
    /// Past the planned end without finishing (or finished late).
    Late,
}

/// The product/module/submodule selection of an activity, with each
/// item's parent ids, used to validate the consistency chain.
#[derive(Debug, Clone, Copy)]
pub struct CatalogRefs {
    /// Selected product.
    pub product: ProductId,
    /// Selected module.
    pub module: ModuleId,
    /// The module's owning product.
    pub module_product: ProductId,
    /// Selected submodule.
    pub submodule: SubmoduleId,
    /// The submodule's owning module.
    pub submodule_module: ModuleId,
    /// The submodule's owning product.
    pub submodule_product: ProductId,
}
