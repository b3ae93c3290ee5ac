use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::project::{ContractType, ProjectStatus};

use super::diff::{build_changes, receipt_note};
use super::types::{FieldValue, ObservationKind, ProjectSnapshot, RefValue};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reference(name: &str) -> RefValue {
    RefValue {
        id: Uuid::now_v7(),
        display: name.to_string(),
    }
}

fn snapshot() -> ProjectSnapshot {
    ProjectSnapshot {
        billing_client: Some(reference("Acme Ltda")),
        project_client: Some(reference("Acme Filial")),
        description: "Implantacao ERP".to_string(),
        received_date: Some(date(2025, 2, 1)),
        planned_go_live_date: None,
        contract_type: ContractType::FixedValue,
        status: ProjectStatus::Implementation,
        total_value: dec!(120000.00),
        hourly_rate: dec!(250.00),
        contingency_percent: dec!(10.00),
        internal_manager: Some(reference("Marina Souza")),
        external_manager: None,
        client_user: None,
    }
}

#[test]
fn test_identical_snapshots_produce_no_changes() {
    let before = snapshot();
    assert!(build_changes(&before, &before.clone()).is_empty());
}

#[test]
fn test_changed_decimal_is_formatted_with_grouping() {
    let before = snapshot();
    let mut after = before.clone();
    after.total_value = dec!(150000.00);
    let changes = build_changes(&before, &after);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].field, "total_value");
    assert_eq!(changes[0].label, "Valor total contratado (R$)");
    assert_eq!(changes[0].before, "120.000,00");
    assert_eq!(changes[0].after, "150.000,00");
}

#[test]
fn test_changed_choice_uses_label() {
    let before = snapshot();
    let mut after = before.clone();
    after.status = ProjectStatus::Completed;
    let changes = build_changes(&before, &after);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].before, "Em Implantacao");
    assert_eq!(changes[0].after, "Finalizado");
}

#[test]
fn test_changed_date_uses_br_format() {
    let before = snapshot();
    let mut after = before.clone();
    after.planned_go_live_date = Some(date(2025, 9, 1));
    let changes = build_changes(&before, &after);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].before, "-");
    assert_eq!(changes[0].after, "01/09/2025");
}

#[test]
fn test_reference_compares_by_id_not_display() {
    let before = snapshot();
    let mut after = before.clone();
    // same id, display drifted: not a change
    if let Some(manager) = &mut after.internal_manager {
        manager.display = "Marina S.".to_string();
    }
    assert!(build_changes(&before, &after).is_empty());

    // different id: a change, displayed by name
    after.internal_manager = Some(reference("Paulo Lima"));
    let changes = build_changes(&before, &after);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].field, "internal_manager");
    assert_eq!(changes[0].before, "Marina Souza");
    assert_eq!(changes[0].after, "Paulo Lima");
}

#[test]
fn test_cleared_reference_formats_as_dash() {
    let before = snapshot();
    let mut after = before.clone();
    after.billing_client = None;
    let changes = build_changes(&before, &after);
    assert_eq!(changes[0].after, "-");
}

#[test]
fn test_multiple_changes_follow_table_order() {
    let before = snapshot();
    let mut after = before.clone();
    after.description = "Implantacao ERP - fase 2".to_string();
    after.hourly_rate = dec!(275.00);
    let changes = build_changes(&before, &after);
    let fields: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["description", "hourly_rate"]);
}

#[test]
fn test_receipt_note_first_time() {
    let note = receipt_note(Some(date(2025, 2, 1)), None).unwrap();
    assert_eq!(note, "Recebimento do projeto pela consultoria em 01/02/2025.");
}

#[test]
fn test_receipt_note_updated_date() {
    let note = receipt_note(Some(date(2025, 2, 10)), Some(date(2025, 2, 1))).unwrap();
    assert_eq!(
        note,
        "Data de recebimento atualizada: 01/02/2025 -> 10/02/2025."
    );
}

#[test]
fn test_receipt_note_skipped_when_unchanged_or_absent() {
    assert_eq!(receipt_note(None, None), None);
    assert_eq!(receipt_note(Some(date(2025, 2, 1)), Some(date(2025, 2, 1))), None);
}

#[test]
fn test_bool_formatting() {
    assert_eq!(FieldValue::Bool(Some(true)).format(), "Sim");
    assert_eq!(FieldValue::Bool(Some(false)).format(), "Nao");
    assert_eq!(FieldValue::Bool(None).format(), "-");
}

#[test]
fn test_observation_kind_round_trip() {
    for kind in [
        ObservationKind::Manual,
        ObservationKind::Auto,
        ObservationKind::Change,
    ] {
        assert_eq!(ObservationKind::parse(kind.as_str()), Some(kind));
    }
}
