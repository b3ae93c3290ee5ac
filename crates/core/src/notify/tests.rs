use std::cell::RefCell;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal_macros::dec;

use praxis_shared::config::NotifierConfig;

use crate::timesheet::TimeEntryStatus;

use super::dispatch::{send_to_numbers, should_send};
use super::messages::{
    format_currency, format_period, receivable_created, time_entry_reviewed, TimeEntryDigest,
    TitleDigest,
};
use super::phone::{mask_phone, normalize_phone};
use super::types::{Notifier, NotifierSettings, NotifyError, ReportKind};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    date(2025, 6, 2).and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
}

struct RecordingNotifier {
    sent: RefCell<Vec<(String, String)>>,
    fail_for: Option<String>,
}

impl RecordingNotifier {
    fn new() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail_for: None,
        }
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, phone: &str, message: &str) -> Result<(), NotifyError> {
        if self.fail_for.as_deref() == Some(phone) {
            return Err(NotifyError::Delivery("provider timeout".to_string()));
        }
        self.sent
            .borrow_mut()
            .push((phone.to_string(), message.to_string()));
        Ok(())
    }
}

#[test]
fn test_normalize_phone_prepends_country_code() {
    assert_eq!(
        normalize_phone("(11) 98765-4321", "55"),
        Some("5511987654321".to_string())
    );
    assert_eq!(
        normalize_phone("5511987654321", "55"),
        Some("5511987654321".to_string())
    );
    assert_eq!(normalize_phone("  ", "55"), None);
    assert_eq!(normalize_phone("0011 98765-4321", "55"), Some("5511987654321".to_string()));
}

#[test]
fn test_mask_phone_keeps_last_four() {
    assert_eq!(mask_phone("5511987654321"), "*********4321");
    assert_eq!(mask_phone("321"), "***");
}

#[test]
fn test_settings_from_config_normalizes_and_parses() {
    let config = NotifierConfig {
        financial_numbers: vec!["(11) 98765-4321".to_string(), "nada".to_string()],
        daily_activities_time: Some("08:30".to_string()),
        daily_overdue_time: Some("not a time".to_string()),
        daily_admin_due_time: None,
        timezone: "America/Sao_Paulo".to_string(),
        default_country_code: "55".to_string(),
    };
    let settings = NotifierSettings::from_config(&config);
    assert_eq!(settings.financial_numbers, vec!["5511987654321".to_string()]);
    assert_eq!(
        settings.schedule_for(ReportKind::ActivitiesToday),
        NaiveTime::from_hms_opt(8, 30, 0)
    );
    assert_eq!(settings.schedule_for(ReportKind::ActivitiesOverdue), None);
    assert_eq!(settings.schedule_for(ReportKind::AdminDueTitles), None);
}

#[test]
fn test_should_send_on_matching_minute_only() {
    let schedule = NaiveTime::from_hms_opt(8, 30, 0);
    assert!(should_send(schedule, at(8, 30), false, false));
    assert!(!should_send(schedule, at(8, 31), false, false));
    assert!(!should_send(schedule, at(9, 30), false, false));
}

#[test]
fn test_should_send_skips_when_already_sent_today() {
    let schedule = NaiveTime::from_hms_opt(8, 30, 0);
    assert!(!should_send(schedule, at(8, 30), true, false));
}

#[test]
fn test_should_send_force_overrides_everything_but_unset() {
    let schedule = NaiveTime::from_hms_opt(8, 30, 0);
    assert!(should_send(schedule, at(23, 59), true, true));
    assert!(!should_send(None, at(8, 30), false, true));
}

#[test]
fn test_send_to_numbers_swallows_failures() {
    let mut notifier = RecordingNotifier::new();
    notifier.fail_for = Some("5511911111111".to_string());
    let numbers = vec![
        "5511911111111".to_string(),
        "5511922222222".to_string(),
    ];
    let report = send_to_numbers(&notifier, &numbers, "Titulo a receber criado.");
    assert_eq!(report.attempted, 2);
    assert_eq!(report.delivered, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(notifier.sent.borrow().len(), 1);
}

#[test]
fn test_format_period_collapses_single_day() {
    assert_eq!(
        format_period(Some(date(2025, 4, 1)), Some(date(2025, 4, 5))),
        "01/04/2025 a 05/04/2025"
    );
    assert_eq!(
        format_period(Some(date(2025, 4, 1)), Some(date(2025, 4, 1))),
        "01/04/2025"
    );
    assert_eq!(format_period(None, Some(date(2025, 4, 1))), "-");
}

#[test]
fn test_receivable_created_message() {
    let digest = TitleDigest {
        party: "Acme Ltda".to_string(),
        document_number: "NF-1001".to_string(),
        total_amount: dec!(1500.00),
        due_date: date(2025, 4, 30),
        settlement_date: None,
        id: Some("42".to_string()),
    };
    let message = receivable_created(&digest);
    assert!(message.starts_with("Titulo a receber criado.\n"));
    assert!(message.contains("Cliente: Acme Ltda"));
    assert!(message.contains("Valor: R$ 1.500,00"));
    assert!(message.contains("Vencimento: 30/04/2025"));
    assert!(message.contains("ID: 42"));
}

#[test]
fn test_time_entry_reviewed_messages() {
    let digest = TimeEntryDigest {
        consultant: "Joao Pereira".to_string(),
        project: "Implantacao ERP".to_string(),
        activity: "Parametrizacao fiscal".to_string(),
        start_date: Some(date(2025, 4, 1)),
        end_date: Some(date(2025, 4, 5)),
        total_hours: dec!(12.00),
        rejection_reason: Some("Atividade errada".to_string()),
        id: None,
    };
    let approved = time_entry_reviewed(&digest, TimeEntryStatus::Approved).unwrap();
    assert!(approved.starts_with("Seu apontamento foi aprovado."));
    assert!(!approved.contains("Motivo"));

    let rejected = time_entry_reviewed(&digest, TimeEntryStatus::Rejected).unwrap();
    assert!(rejected.contains("Motivo: Atividade errada"));

    assert!(time_entry_reviewed(&digest, TimeEntryStatus::Pending).is_none());
}

#[test]
fn test_format_currency() {
    assert_eq!(format_currency(dec!(1234.5)), "R$ 1.234,50");
}
