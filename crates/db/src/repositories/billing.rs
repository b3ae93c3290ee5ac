//! Billing invoice repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use praxis_core::billing::{recompute_payment_status, PaymentStatus};
use praxis_core::finance::FinancialStatus;

use crate::entities::{accounts_receivable, billing_invoices};

/// Error types for invoice operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    NotFound(Uuid),

    /// Invoice number already exists.
    #[error("Invoice number already exists")]
    DuplicateNumber,

    /// A stored status string is not recognized.
    #[error("Stored status is not recognized: {0}")]
    InvalidStatus(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a billing invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    /// Invoice number, unique across the system.
    pub number: String,
    /// Billing client.
    pub billing_client_id: Uuid,
    /// Optional project link.
    pub project_id: Option<Uuid>,
    /// Billed period start.
    pub period_start: chrono::NaiveDate,
    /// Billed period end.
    pub period_end: chrono::NaiveDate,
    /// Total billed hours.
    pub total_hours: rust_decimal::Decimal,
    /// Total billed value.
    pub total_value: rust_decimal::Decimal,
    /// User creating the invoice.
    pub created_by: Option<Uuid>,
}

/// Outcome of a bulk payment-status resync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResyncOutcome {
    /// Invoices examined.
    pub total: usize,
    /// Invoices whose stored status was rewritten.
    pub updated: usize,
    /// Invoices already consistent.
    pub unchanged: usize,
}

/// Recomputes and conditionally persists an invoice's payment status.
///
/// The status is derived from the linked receivables and written only
/// when it differs from the stored value, so re-running is free of
/// spurious updates. Shared with the receivable save cascade, which
/// calls this inside its own transaction.
pub(crate) async fn sync_invoice_payment_status<C: ConnectionTrait>(
    conn: &C,
    invoice_id: Uuid,
) -> Result<PaymentStatus, InvoiceError> {
    let invoice = billing_invoices::Entity::find_by_id(invoice_id)
        .one(conn)
        .await?
        .ok_or(InvoiceError::NotFound(invoice_id))?;

    let receivables = accounts_receivable::Entity::find()
        .filter(accounts_receivable::Column::BillingInvoiceId.eq(invoice_id))
        .all(conn)
        .await?;
    let statuses = receivables
        .iter()
        .map(|receivable| {
            FinancialStatus::parse(&receivable.status)
                .ok_or_else(|| InvoiceError::InvalidStatus(receivable.status.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let computed = recompute_payment_status(&statuses);
    if invoice.payment_status != computed.as_str() {
        let mut active: billing_invoices::ActiveModel = invoice.into();
        active.payment_status = Set(computed.as_str().to_string());
        active.updated_at = Set(Utc::now().into());
        active.update(conn).await?;
    }
    Ok(computed)
}

/// Repository for billing invoices.
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an invoice; the payment status starts unpaid.
    pub async fn create(
        &self,
        input: CreateInvoiceInput,
    ) -> Result<billing_invoices::Model, InvoiceError> {
        let duplicate = billing_invoices::Entity::find()
            .filter(billing_invoices::Column::Number.eq(input.number.clone()))
            .one(&self.db)
            .await?;
        if duplicate.is_some() {
            return Err(InvoiceError::DuplicateNumber);
        }

        let now = Utc::now().into();
        let invoice = billing_invoices::ActiveModel {
            id: Set(Uuid::now_v7()),
            number: Set(input.number),
            billing_client_id: Set(input.billing_client_id),
            project_id: Set(input.project_id),
            period_start: Set(input.period_start),
            period_end: Set(input.period_end),
            total_hours: Set(input.total_hours),
            total_value: Set(input.total_value),
            payment_status: Set(PaymentStatus::Unpaid.as_str().to_string()),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(invoice.insert(&self.db).await?)
    }

    /// Fetches an invoice by id.
    pub async fn get(&self, invoice_id: Uuid) -> Result<billing_invoices::Model, InvoiceError> {
        billing_invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::NotFound(invoice_id))
    }

    /// Recomputes the payment status of one invoice.
    pub async fn recompute_payment_status(
        &self,
        invoice_id: Uuid,
    ) -> Result<PaymentStatus, InvoiceError> {
        sync_invoice_payment_status(&self.db, invoice_id).await
    }

    /// Resyncs the payment status of every invoice.
    ///
    /// Operator tool for after bulk imports or receivable re-linking;
    /// the per-save cascade keeps statuses consistent in normal
    /// operation.
    pub async fn resync_all(&self) -> Result<ResyncOutcome, InvoiceError> {
        let invoices = billing_invoices::Entity::find()
            .order_by_asc(billing_invoices::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut outcome = ResyncOutcome::default();
        for invoice in invoices {
            outcome.total += 1;
            let before = invoice.payment_status.clone();
            let computed = sync_invoice_payment_status(&self.db, invoice.id).await?;
            if before == computed.as_str() {
                outcome.unchanged += 1;
            } else {
                outcome.updated += 1;
            }
        }
        tracing::info!(
            total = outcome.total,
            updated = outcome.updated,
            unchanged = outcome.unchanged,
            "invoice payment status resync finished"
        );
        Ok(outcome)
    }
}
