//! pt-BR message templates for WhatsApp notifications.
//!
//! Builders take plain display data prepared by the caller; nothing in
//! here touches the database.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use praxis_shared::types::{format_date_br, format_decimal_br};

use crate::activity::Criticality;
use crate::timesheet::TimeEntryStatus;

/// `R$ 1.234,56`.
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    format!("R$ {}", format_decimal_br(value))
}

/// `12,50h`.
#[must_use]
pub fn format_hours(value: Decimal) -> String {
    format!("{}h", format_decimal_br(value))
}

/// `01/04/2025 a 05/04/2025`, collapsing equal endpoints to one date.
#[must_use]
pub fn format_period(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let Some(start) = start else {
        return "-".to_string();
    };
    let start_label = format_date_br(start);
    let end_label = end.map_or_else(|| "-".to_string(), format_date_br);
    if start_label == end_label {
        start_label
    } else {
        format!("{start_label} a {end_label}")
    }
}

fn format_opt_date(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| "-".to_string(), format_date_br)
}

/// Display data of a title used in financial notices.
#[derive(Debug, Clone)]
pub struct TitleDigest {
    /// Counterparty label (client, or supplier/consultant).
    pub party: String,
    /// Document number.
    pub document_number: String,
    /// Effective amount.
    pub total_amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Settlement date, for "paid" notices.
    pub settlement_date: Option<NaiveDate>,
    /// Persisted id, when already saved.
    pub id: Option<String>,
}

impl TitleDigest {
    fn id_label(&self) -> &str {
        self.id.as_deref().unwrap_or("-")
    }
}

/// Admin notice: a receivable title was created.
#[must_use]
pub fn receivable_created(title: &TitleDigest) -> String {
    format!(
        "Titulo a receber criado.\nCliente: {}\nTitulo: {}\nValor: {}\nVencimento: {}\nID: {}",
        title.party,
        title.document_number,
        format_currency(title.total_amount),
        format_date_br(title.due_date),
        title.id_label(),
    )
}

/// Admin notice: a receivable title was paid.
#[must_use]
pub fn receivable_paid(title: &TitleDigest) -> String {
    format!(
        "Titulo a receber pago.\nCliente: {}\nTitulo: {}\nValor: {}\nPago em: {}\nID: {}",
        title.party,
        title.document_number,
        format_currency(title.total_amount),
        format_opt_date(title.settlement_date),
        title.id_label(),
    )
}

/// Admin notice: a payable title was created.
#[must_use]
pub fn payable_created(title: &TitleDigest) -> String {
    format!(
        "Titulo a pagar criado.\nFornecedor/Consultor: {}\nTitulo: {}\nValor: {}\nVencimento: {}\nID: {}",
        title.party,
        title.document_number,
        format_currency(title.total_amount),
        format_date_br(title.due_date),
        title.id_label(),
    )
}

/// Admin notice: a payable title was paid.
#[must_use]
pub fn payable_paid(title: &TitleDigest) -> String {
    format!(
        "Titulo a pagar pago.\nFornecedor/Consultor: {}\nTitulo: {}\nValor: {}\nPago em: {}\nID: {}",
        title.party,
        title.document_number,
        format_currency(title.total_amount),
        format_opt_date(title.settlement_date),
        title.id_label(),
    )
}

/// Consultant notice: a payable in their name was created.
#[must_use]
pub fn consultant_payable_created(title: &TitleDigest) -> String {
    format!(
        "Seu titulo a receber foi criado.\nTitulo: {}\nValor: {}\nVencimento: {}\nID: {}",
        title.document_number,
        format_currency(title.total_amount),
        format_date_br(title.due_date),
        title.id_label(),
    )
}

/// Consultant notice: a payable in their name was paid.
#[must_use]
pub fn consultant_payable_paid(title: &TitleDigest) -> String {
    format!(
        "Seu titulo foi pago.\nTitulo: {}\nValor: {}\nPago em: {}\nID: {}",
        title.document_number,
        format_currency(title.total_amount),
        format_opt_date(title.settlement_date),
        title.id_label(),
    )
}

/// Admin notice: a receivable title is due today.
#[must_use]
pub fn receivable_due_today(title: &TitleDigest) -> String {
    format!(
        "Titulo a receber vencendo hoje.\nCliente: {}\nTitulo: {}\nValor: {}\nVencimento: {}\nID: {}",
        title.party,
        title.document_number,
        format_currency(title.total_amount),
        format_date_br(title.due_date),
        title.id_label(),
    )
}

/// Admin notice: a payable title is due today.
#[must_use]
pub fn payable_due_today(title: &TitleDigest) -> String {
    format!(
        "Titulo a pagar vencendo hoje.\nFornecedor/Consultor: {}\nTitulo: {}\nValor: {}\nVencimento: {}\nID: {}",
        title.party,
        title.document_number,
        format_currency(title.total_amount),
        format_date_br(title.due_date),
        title.id_label(),
    )
}

/// Display data of a time entry used in review notices.
#[derive(Debug, Clone)]
pub struct TimeEntryDigest {
    /// Consultant name.
    pub consultant: String,
    /// Project description.
    pub project: String,
    /// Activity name.
    pub activity: String,
    /// Entry period start.
    pub start_date: Option<NaiveDate>,
    /// Entry period end.
    pub end_date: Option<NaiveDate>,
    /// Entry total hours.
    pub total_hours: Decimal,
    /// Rejection reason, for rejected notices.
    pub rejection_reason: Option<String>,
    /// Persisted id, when already saved.
    pub id: Option<String>,
}

/// Admin notice: a time entry awaits approval.
#[must_use]
pub fn time_entry_pending(entry: &TimeEntryDigest) -> String {
    format!(
        "Apontamento aguardando aprovacao.\nConsultor: {}\nProjeto: {}\nAtividade: {}\nPeriodo: {}\nHoras: {}\nID: {}",
        entry.consultant,
        entry.project,
        entry.activity,
        format_period(entry.start_date, entry.end_date),
        format_hours(entry.total_hours),
        entry.id.as_deref().unwrap_or("-"),
    )
}

/// Consultant notice: their entry was reviewed.
///
/// Returns `None` for entries that are still pending.
#[must_use]
pub fn time_entry_reviewed(entry: &TimeEntryDigest, status: TimeEntryStatus) -> Option<String> {
    let period = format_period(entry.start_date, entry.end_date);
    let hours = format_hours(entry.total_hours);
    match status {
        TimeEntryStatus::Approved => Some(format!(
            "Seu apontamento foi aprovado.\nProjeto: {}\nAtividade: {}\nPeriodo: {period}\nHoras: {hours}",
            entry.project, entry.activity,
        )),
        TimeEntryStatus::Rejected => {
            let reason = entry
                .rejection_reason
                .as_deref()
                .map(str::trim)
                .filter(|reason| !reason.is_empty())
                .unwrap_or("-");
            Some(format!(
                "Seu apontamento foi rejeitado.\nProjeto: {}\nAtividade: {}\nPeriodo: {period}\nHoras: {hours}\nMotivo: {reason}",
                entry.project, entry.activity,
            ))
        }
        TimeEntryStatus::Pending => None,
    }
}

/// Display data of a consultant billing closure.
#[derive(Debug, Clone)]
pub struct BillingClosureDigest {
    /// Billing period start.
    pub period_start: Option<NaiveDate>,
    /// Billing period end.
    pub period_end: Option<NaiveDate>,
    /// Billed hours.
    pub hours: Decimal,
    /// Amount owed to the consultant.
    pub total: Decimal,
    /// Expected payment date.
    pub payment_date: Option<NaiveDate>,
}

/// Consultant notice: their billing period was closed.
#[must_use]
pub fn billing_closure(closure: &BillingClosureDigest) -> String {
    format!(
        "Fechamento concluido.\nPeriodo: {}\nHoras faturadas: {}\nValor a receber: {}\nPrevisao de pagamento: {}",
        format_period(closure.period_start, closure.period_end),
        format_hours(closure.hours),
        format_currency(closure.total),
        format_opt_date(closure.payment_date),
    )
}

/// Display data of an activity used in assignment and daily reports.
#[derive(Debug, Clone)]
pub struct ActivityDigest {
    /// Project description.
    pub project: String,
    /// Delivery phase.
    pub phase: String,
    /// Product name.
    pub product: String,
    /// Module name.
    pub module: String,
    /// Submodule name.
    pub submodule: String,
    /// Activity name.
    pub activity: String,
    /// Subactivity names, comma separated; `-` when empty.
    pub subactivities: String,
    /// Criticality.
    pub criticality: Criticality,
    /// Estimated days.
    pub days: Decimal,
    /// Estimated hours.
    pub hours: Decimal,
    /// Planned start date.
    pub planned_start: Option<NaiveDate>,
}

fn activity_body(activity: &ActivityDigest) -> String {
    format!(
        "Projeto: {}\nFase: {}\nProduto: {}\nModulo: {}\nSubModulo: {}\nAtividade: {}\nSubatividades: {}\nCriticidade: {}\nDias: {}\nHoras: {}\nInicio previsto: {}",
        activity.project,
        activity.phase,
        activity.product,
        activity.module,
        activity.submodule,
        activity.activity,
        activity.subactivities,
        activity.criticality.label(),
        format_decimal_br(activity.days),
        format_hours(activity.hours),
        format_opt_date(activity.planned_start),
    )
}

/// Consultant notice: an activity was assigned to them.
#[must_use]
pub fn activity_assigned(activity: &ActivityDigest) -> String {
    format!("Atividade atribuida.\n{}", activity_body(activity))
}

/// Daily report line for an activity; `label` is `de hoje` or `em atraso`.
#[must_use]
pub fn activity_report(activity: &ActivityDigest, label: &str) -> String {
    format!("Atividade {label}.\n{}", activity_body(activity))
}
