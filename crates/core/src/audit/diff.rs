//! The project change-diff engine.

use chrono::NaiveDate;

use praxis_shared::types::format_date_br;

use super::types::{FieldChange, FieldValue, ProjectSnapshot};

/// Note attached to every change observation.
pub const CHANGE_NOTE: &str = "Alteracoes no cadastro do projeto.";

/// Descriptor of one diffable project field.
pub struct FieldDescriptor {
    /// Field name as persisted in the change record.
    pub field: &'static str,
    /// pt-BR label.
    pub label: &'static str,
    /// Extracts the tagged value from a snapshot.
    pub value: fn(&ProjectSnapshot) -> FieldValue,
}

/// The fixed allowlist of diffable project fields with their semantic
/// formatters. Order is the order changes are reported in.
pub const PROJECT_CHANGE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        field: "billing_client",
        label: "Cliente de faturamento",
        value: |s| FieldValue::Reference(s.billing_client.clone()),
    },
    FieldDescriptor {
        field: "project_client",
        label: "Cliente do projeto",
        value: |s| FieldValue::Reference(s.project_client.clone()),
    },
    FieldDescriptor {
        field: "description",
        label: "Descricao do projeto",
        value: |s| FieldValue::Text(Some(s.description.clone())),
    },
    FieldDescriptor {
        field: "received_date",
        label: "Data de recebimento",
        value: |s| FieldValue::Date(s.received_date),
    },
    FieldDescriptor {
        field: "planned_go_live_date",
        label: "Go live planejado",
        value: |s| FieldValue::Date(s.planned_go_live_date),
    },
    FieldDescriptor {
        field: "contract_type",
        label: "Classificacao do projeto",
        value: |s| FieldValue::Choice(Some((s.contract_type.as_str(), s.contract_type.label()))),
    },
    FieldDescriptor {
        field: "status",
        label: "Status",
        value: |s| FieldValue::Choice(Some((s.status.as_str(), s.status.label()))),
    },
    FieldDescriptor {
        field: "total_value",
        label: "Valor total contratado (R$)",
        value: |s| FieldValue::Decimal(Some(s.total_value)),
    },
    FieldDescriptor {
        field: "hourly_rate",
        label: "Valor hora (R$)",
        value: |s| FieldValue::Decimal(Some(s.hourly_rate)),
    },
    FieldDescriptor {
        field: "contingency_percent",
        label: "Contingencia (%)",
        value: |s| FieldValue::Decimal(Some(s.contingency_percent)),
    },
    FieldDescriptor {
        field: "internal_manager",
        label: "GP interno",
        value: |s| FieldValue::Reference(s.internal_manager.clone()),
    },
    FieldDescriptor {
        field: "external_manager",
        label: "GP externo",
        value: |s| FieldValue::Reference(s.external_manager.clone()),
    },
    FieldDescriptor {
        field: "client_user",
        label: "Usuario do cliente",
        value: |s| FieldValue::Reference(s.client_user.clone()),
    },
];

/// Diffs two project snapshots over the field allowlist.
///
/// Unchanged fields are skipped; each change carries the field name,
/// its label, and the formatted before/after values.
#[must_use]
pub fn build_changes(before: &ProjectSnapshot, after: &ProjectSnapshot) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    for descriptor in PROJECT_CHANGE_FIELDS {
        let before_value = (descriptor.value)(before);
        let after_value = (descriptor.value)(after);
        if before_value.same_as(&after_value) {
            continue;
        }
        changes.push(FieldChange {
            field: descriptor.field.to_string(),
            label: descriptor.label.to_string(),
            before: before_value.format(),
            after: after_value.format(),
        });
    }
    changes
}

/// The auto-generated receipt observation note.
///
/// `None` when the project has no received date or the date did not
/// change.
#[must_use]
pub fn receipt_note(
    received_date: Option<NaiveDate>,
    previous_date: Option<NaiveDate>,
) -> Option<String> {
    let received = received_date?;
    match previous_date {
        Some(previous) if previous == received => None,
        Some(previous) => Some(format!(
            "Data de recebimento atualizada: {} -> {}.",
            format_date_br(previous),
            format_date_br(received),
        )),
        None => Some(format!(
            "Recebimento do projeto pela consultoria em {}.",
            format_date_br(received),
        )),
    }
}
