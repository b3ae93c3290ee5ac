//! Payable and receivable title repositories.
//!
//! Every save runs the same pipeline: status sync -> invariant
//! validation -> persist. Receivable saves additionally cascade the
//! linked invoice's payment status inside the same transaction.
//! Observed transitions fan out notices through the optional
//! notification gateway after commit.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use praxis_core::finance::{
    validate_title, FinanceError, FinancialStatus, PaymentMethod, PaymentService, Title,
};
use praxis_core::notify::{self, TitleDigest};

use crate::entities::{
    accounts_payable, accounts_receivable, consultants, payable_payments, receivable_payments,
    suppliers,
};

use super::billing::{sync_invoice_payment_status, InvoiceError};
use super::NotificationGateway;

/// Error types for title operations.
#[derive(Debug, thiserror::Error)]
pub enum FinancialError {
    /// Title not found.
    #[error("Title not found: {0}")]
    NotFound(Uuid),

    /// Payment not found.
    #[error("Payment not found: {0}")]
    PaymentNotFound(Uuid),

    /// Document number already used for this counterparty.
    #[error("Document number already exists for this counterparty")]
    DuplicateDocument,

    /// Field invariant violations; nothing was persisted.
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FinanceError>),

    /// A business rule rejected the operation.
    #[error(transparent)]
    Rule(#[from] FinanceError),

    /// A stored status string is not recognized.
    #[error("Stored status is not recognized: {0}")]
    InvalidStatus(String),

    /// The linked invoice cascade failed.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating a payable title.
#[derive(Debug, Clone)]
pub struct PayableInput {
    /// Owning supplier.
    pub supplier_id: Uuid,
    /// Consultant the payable targets, when applicable.
    pub consultant_id: Option<Uuid>,
    /// Optional invoice link.
    pub billing_invoice_id: Option<Uuid>,
    /// Optional chart-of-accounts link.
    pub account_plan_item_id: Option<Uuid>,
    /// The title fields.
    pub title: Title,
}

/// Input for creating or updating a receivable title.
#[derive(Debug, Clone)]
pub struct ReceivableInput {
    /// Owning client.
    pub client_id: Uuid,
    /// Optional invoice link.
    pub billing_invoice_id: Option<Uuid>,
    /// Optional chart-of-accounts link.
    pub account_plan_item_id: Option<Uuid>,
    /// The title fields.
    pub title: Title,
}

/// Input for recording or editing a payment against a title.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    /// Bank account the money moved through.
    pub bank_account_id: Uuid,
    /// Payment date.
    pub payment_date: chrono::NaiveDate,
    /// Paid amount; must fit the remaining open balance.
    pub amount: rust_decimal::Decimal,
    /// Payment method, if known.
    pub payment_method: Option<PaymentMethod>,
    /// Free-text notes.
    pub notes: String,
}

/// A title due on a given day, with its counterparty label.
#[derive(Debug, Clone)]
pub struct DueTitle {
    /// The title's id.
    pub id: Uuid,
    /// Counterparty display label.
    pub party: String,
    /// The title fields.
    pub title: Title,
}

impl DueTitle {
    /// Digest used by the due-today notices.
    #[must_use]
    pub fn digest(&self) -> TitleDigest {
        TitleDigest {
            party: self.party.clone(),
            document_number: self.title.document_number.clone(),
            total_amount: self.title.total_amount(),
            due_date: self.title.due_date,
            settlement_date: self.title.settlement_date,
            id: Some(self.id.to_string()),
        }
    }
}

/// Runs the shared save pipeline over a title: status sync, then
/// invariant validation. Returns the title ready to persist.
fn prepare_title(mut title: Title) -> Result<Title, FinancialError> {
    title.sync(Utc::now().date_naive());
    validate_title(&title).map_err(FinancialError::Validation)?;
    Ok(title)
}

fn parse_status(status: &str) -> Result<FinancialStatus, FinancialError> {
    FinancialStatus::parse(status).ok_or_else(|| FinancialError::InvalidStatus(status.to_string()))
}

fn payable_title(model: &accounts_payable::Model) -> Result<Title, FinancialError> {
    Ok(Title {
        document_number: model.document_number.clone(),
        description: model.description.clone(),
        issue_date: model.issue_date,
        due_date: model.due_date,
        amount: model.amount,
        discount: model.discount,
        interest: model.interest,
        penalty: model.penalty,
        status: parse_status(&model.status)?,
        settlement_date: model.settlement_date,
        payment_method: model.payment_method.as_deref().and_then(PaymentMethod::parse),
        notes: model.notes.clone(),
    })
}

fn receivable_title(model: &accounts_receivable::Model) -> Result<Title, FinancialError> {
    Ok(Title {
        document_number: model.document_number.clone(),
        description: model.description.clone(),
        issue_date: model.issue_date,
        due_date: model.due_date,
        amount: model.amount,
        discount: model.discount,
        interest: model.interest,
        penalty: model.penalty,
        status: parse_status(&model.status)?,
        settlement_date: model.settlement_date,
        payment_method: model.payment_method.as_deref().and_then(PaymentMethod::parse),
        notes: model.notes.clone(),
    })
}

fn apply_payable_title(active: &mut accounts_payable::ActiveModel, title: &Title) {
    active.document_number = Set(title.document_number.clone());
    active.description = Set(title.description.clone());
    active.issue_date = Set(title.issue_date);
    active.due_date = Set(title.due_date);
    active.amount = Set(title.amount);
    active.discount = Set(title.discount);
    active.interest = Set(title.interest);
    active.penalty = Set(title.penalty);
    active.status = Set(title.status.as_str().to_string());
    active.settlement_date = Set(title.settlement_date);
    active.payment_method = Set(title.payment_method.map(|m| m.as_str().to_string()));
    active.notes = Set(title.notes.clone());
    active.updated_at = Set(Utc::now().into());
}

fn apply_receivable_title(active: &mut accounts_receivable::ActiveModel, title: &Title) {
    active.document_number = Set(title.document_number.clone());
    active.description = Set(title.description.clone());
    active.issue_date = Set(title.issue_date);
    active.due_date = Set(title.due_date);
    active.amount = Set(title.amount);
    active.discount = Set(title.discount);
    active.interest = Set(title.interest);
    active.penalty = Set(title.penalty);
    active.status = Set(title.status.as_str().to_string());
    active.settlement_date = Set(title.settlement_date);
    active.payment_method = Set(title.payment_method.map(|m| m.as_str().to_string()));
    active.notes = Set(title.notes.clone());
    active.updated_at = Set(Utc::now().into());
}

/// Repository for accounts payable titles and their payments.
pub struct PayableRepository {
    db: DatabaseConnection,
    gateway: Option<NotificationGateway>,
}

impl PayableRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, gateway: None }
    }

    /// Attaches a notification gateway for observed transitions.
    #[must_use]
    pub fn with_notifier(mut self, gateway: NotificationGateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    async fn party_label(&self, model: &accounts_payable::Model) -> Result<String, FinancialError> {
        if let Some(consultant_id) = model.consultant_id {
            let consultant = consultants::Entity::find_by_id(consultant_id)
                .one(&self.db)
                .await?;
            if let Some(consultant) = consultant {
                return Ok(consultant.full_name);
            }
        }
        let supplier = suppliers::Entity::find_by_id(model.supplier_id)
            .one(&self.db)
            .await?;
        Ok(supplier.map_or_else(|| "-".to_string(), |s| s.legal_name))
    }

    async fn consultant_phone(
        &self,
        consultant_id: Option<Uuid>,
    ) -> Result<Option<String>, FinancialError> {
        let Some(consultant_id) = consultant_id else {
            return Ok(None);
        };
        let consultant = consultants::Entity::find_by_id(consultant_id)
            .one(&self.db)
            .await?;
        Ok(consultant.and_then(|c| c.whatsapp_phone))
    }

    async fn digest(&self, model: &accounts_payable::Model) -> Result<TitleDigest, FinancialError> {
        let title = payable_title(model)?;
        Ok(TitleDigest {
            party: self.party_label(model).await?,
            document_number: title.document_number.clone(),
            total_amount: title.total_amount(),
            due_date: title.due_date,
            settlement_date: title.settlement_date,
            id: Some(model.id.to_string()),
        })
    }

    async fn ensure_unique_document(
        &self,
        supplier_id: Uuid,
        document_number: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), FinancialError> {
        let mut query = accounts_payable::Entity::find()
            .filter(accounts_payable::Column::SupplierId.eq(supplier_id))
            .filter(accounts_payable::Column::DocumentNumber.eq(document_number));
        if let Some(id) = exclude {
            query = query.filter(accounts_payable::Column::Id.ne(id));
        }
        if query.one(&self.db).await?.is_some() {
            return Err(FinancialError::DuplicateDocument);
        }
        Ok(())
    }

    /// Creates a payable; the admin and target consultant are notified.
    pub async fn create(
        &self,
        input: PayableInput,
    ) -> Result<accounts_payable::Model, FinancialError> {
        let title = prepare_title(input.title)?;
        self.ensure_unique_document(input.supplier_id, &title.document_number, None)
            .await?;

        let now = Utc::now().into();
        let mut active = accounts_payable::ActiveModel {
            id: Set(Uuid::now_v7()),
            supplier_id: Set(input.supplier_id),
            consultant_id: Set(input.consultant_id),
            billing_invoice_id: Set(input.billing_invoice_id),
            account_plan_item_id: Set(input.account_plan_item_id),
            created_at: Set(now),
            ..Default::default()
        };
        apply_payable_title(&mut active, &title);
        let model = active.insert(&self.db).await?;

        if let Some(gateway) = &self.gateway {
            let digest = self.digest(&model).await?;
            gateway.to_admins(&notify::messages::payable_created(&digest));
            if let Some(phone) = self.consultant_phone(model.consultant_id).await? {
                gateway.to_consultant(&phone, &notify::messages::consultant_payable_created(&digest));
            }
        }
        Ok(model)
    }

    /// Updates a payable, re-running the full save pipeline.
    pub async fn update(
        &self,
        payable_id: Uuid,
        input: PayableInput,
    ) -> Result<accounts_payable::Model, FinancialError> {
        let existing = self.get(payable_id).await?;
        let was_paid = parse_status(&existing.status)? == FinancialStatus::Paid;

        let title = prepare_title(input.title)?;
        self.ensure_unique_document(input.supplier_id, &title.document_number, Some(payable_id))
            .await?;

        let mut active: accounts_payable::ActiveModel = existing.into();
        active.supplier_id = Set(input.supplier_id);
        active.consultant_id = Set(input.consultant_id);
        active.billing_invoice_id = Set(input.billing_invoice_id);
        active.account_plan_item_id = Set(input.account_plan_item_id);
        apply_payable_title(&mut active, &title);
        let model = active.update(&self.db).await?;

        if !was_paid && title.status == FinancialStatus::Paid {
            self.notify_paid(&model).await?;
        }
        Ok(model)
    }

    /// Settles a payable: sets the settlement date and re-syncs.
    pub async fn settle(
        &self,
        payable_id: Uuid,
        settlement_date: chrono::NaiveDate,
        payment_method: Option<PaymentMethod>,
    ) -> Result<accounts_payable::Model, FinancialError> {
        let existing = self.get(payable_id).await?;
        let mut title = payable_title(&existing)?;
        title.settlement_date = Some(settlement_date);
        if payment_method.is_some() {
            title.payment_method = payment_method;
        }
        let title = prepare_title(title)?;

        let mut active: accounts_payable::ActiveModel = existing.into();
        apply_payable_title(&mut active, &title);
        let model = active.update(&self.db).await?;

        self.notify_paid(&model).await?;
        Ok(model)
    }

    /// Cancels a payable. Settled titles cannot be canceled.
    pub async fn cancel(
        &self,
        payable_id: Uuid,
    ) -> Result<accounts_payable::Model, FinancialError> {
        let existing = self.get(payable_id).await?;
        let mut title = payable_title(&existing)?;
        if title.settlement_date.is_some() {
            return Err(FinanceError::CancelSettled.into());
        }
        title.status = FinancialStatus::Canceled;
        validate_title(&title).map_err(FinancialError::Validation)?;

        let mut active: accounts_payable::ActiveModel = existing.into();
        apply_payable_title(&mut active, &title);
        Ok(active.update(&self.db).await?)
    }

    async fn notify_paid(&self, model: &accounts_payable::Model) -> Result<(), FinancialError> {
        if let Some(gateway) = &self.gateway {
            let digest = self.digest(model).await?;
            gateway.to_admins(&notify::messages::payable_paid(&digest));
            if let Some(phone) = self.consultant_phone(model.consultant_id).await? {
                gateway.to_consultant(&phone, &notify::messages::consultant_payable_paid(&digest));
            }
        }
        Ok(())
    }

    /// Fetches a payable by id.
    pub async fn get(&self, payable_id: Uuid) -> Result<accounts_payable::Model, FinancialError> {
        accounts_payable::Entity::find_by_id(payable_id)
            .one(&self.db)
            .await?
            .ok_or(FinancialError::NotFound(payable_id))
    }

    /// Records a payment against a payable's remaining balance.
    pub async fn record_payment(
        &self,
        payable_id: Uuid,
        input: PaymentInput,
    ) -> Result<payable_payments::Model, FinancialError> {
        let payable = self.get(payable_id).await?;
        let title = payable_title(&payable)?;
        let existing: Vec<rust_decimal::Decimal> = payable_payments::Entity::find()
            .filter(payable_payments::Column::PayableId.eq(payable_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|payment| payment.amount)
            .collect();
        PaymentService::validate_payment(title.total_amount(), &existing, None, input.amount)?;

        let now = Utc::now().into();
        let payment = payable_payments::ActiveModel {
            id: Set(Uuid::now_v7()),
            payable_id: Set(payable_id),
            bank_account_id: Set(input.bank_account_id),
            payment_date: Set(input.payment_date),
            amount: Set(input.amount),
            payment_method: Set(input.payment_method.map(|m| m.as_str().to_string())),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(payment.insert(&self.db).await?)
    }

    /// Edits a payment; its previous amount is excluded from the paid
    /// total, so lowering or keeping the value is always possible.
    pub async fn update_payment(
        &self,
        payment_id: Uuid,
        input: PaymentInput,
    ) -> Result<payable_payments::Model, FinancialError> {
        let payment = payable_payments::Entity::find_by_id(payment_id)
            .one(&self.db)
            .await?
            .ok_or(FinancialError::PaymentNotFound(payment_id))?;
        let payable = self.get(payment.payable_id).await?;
        let title = payable_title(&payable)?;
        let existing: Vec<rust_decimal::Decimal> = payable_payments::Entity::find()
            .filter(payable_payments::Column::PayableId.eq(payment.payable_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| p.amount)
            .collect();
        PaymentService::validate_payment(
            title.total_amount(),
            &existing,
            Some(payment.amount),
            input.amount,
        )?;

        let mut active: payable_payments::ActiveModel = payment.into();
        active.bank_account_id = Set(input.bank_account_id);
        active.payment_date = Set(input.payment_date);
        active.amount = Set(input.amount);
        active.payment_method = Set(input.payment_method.map(|m| m.as_str().to_string()));
        active.notes = Set(input.notes);
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Outstanding payables due on a given day, with counterparty labels.
    pub async fn due_on(&self, day: chrono::NaiveDate) -> Result<Vec<DueTitle>, FinancialError> {
        let payables = accounts_payable::Entity::find()
            .filter(accounts_payable::Column::DueDate.eq(day))
            .filter(
                accounts_payable::Column::Status.is_not_in([
                    FinancialStatus::Paid.as_str(),
                    FinancialStatus::Canceled.as_str(),
                ]),
            )
            .order_by_asc(accounts_payable::Column::DueDate)
            .all(&self.db)
            .await?;

        let supplier_ids: Vec<Uuid> = payables.iter().map(|p| p.supplier_id).collect();
        let consultant_ids: Vec<Uuid> =
            payables.iter().filter_map(|p| p.consultant_id).collect();
        let suppliers: HashMap<Uuid, String> = suppliers::Entity::find()
            .filter(suppliers::Column::Id.is_in(supplier_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.legal_name))
            .collect();
        let consultants: HashMap<Uuid, String> = consultants::Entity::find()
            .filter(consultants::Column::Id.is_in(consultant_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.full_name))
            .collect();

        payables
            .into_iter()
            .map(|model| {
                let party = model
                    .consultant_id
                    .and_then(|id| consultants.get(&id).cloned())
                    .or_else(|| suppliers.get(&model.supplier_id).cloned())
                    .unwrap_or_else(|| "-".to_string());
                Ok(DueTitle {
                    id: model.id,
                    party,
                    title: payable_title(&model)?,
                })
            })
            .collect()
    }
}

/// Repository for accounts receivable titles and their payments.
pub struct ReceivableRepository {
    db: DatabaseConnection,
    gateway: Option<NotificationGateway>,
}

impl ReceivableRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, gateway: None }
    }

    /// Attaches a notification gateway for observed transitions.
    #[must_use]
    pub fn with_notifier(mut self, gateway: NotificationGateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    async fn client_name(&self, client_id: Uuid) -> Result<String, FinancialError> {
        let client = crate::entities::clients::Entity::find_by_id(client_id)
            .one(&self.db)
            .await?;
        Ok(client.map_or_else(|| "-".to_string(), |c| c.name))
    }

    async fn digest(
        &self,
        model: &accounts_receivable::Model,
    ) -> Result<TitleDigest, FinancialError> {
        let title = receivable_title(model)?;
        Ok(TitleDigest {
            party: self.client_name(model.client_id).await?,
            document_number: title.document_number.clone(),
            total_amount: title.total_amount(),
            due_date: title.due_date,
            settlement_date: title.settlement_date,
            id: Some(model.id.to_string()),
        })
    }

    async fn ensure_unique_document(
        &self,
        client_id: Uuid,
        document_number: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), FinancialError> {
        let mut query = accounts_receivable::Entity::find()
            .filter(accounts_receivable::Column::ClientId.eq(client_id))
            .filter(accounts_receivable::Column::DocumentNumber.eq(document_number));
        if let Some(id) = exclude {
            query = query.filter(accounts_receivable::Column::Id.ne(id));
        }
        if query.one(&self.db).await?.is_some() {
            return Err(FinancialError::DuplicateDocument);
        }
        Ok(())
    }

    /// Creates a receivable and recomputes the linked invoice's payment
    /// status in the same transaction.
    pub async fn create(
        &self,
        input: ReceivableInput,
    ) -> Result<accounts_receivable::Model, FinancialError> {
        let title = prepare_title(input.title)?;
        self.ensure_unique_document(input.client_id, &title.document_number, None)
            .await?;

        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let mut active = accounts_receivable::ActiveModel {
            id: Set(Uuid::now_v7()),
            client_id: Set(input.client_id),
            billing_invoice_id: Set(input.billing_invoice_id),
            account_plan_item_id: Set(input.account_plan_item_id),
            created_at: Set(now),
            ..Default::default()
        };
        apply_receivable_title(&mut active, &title);
        let model = active.insert(&txn).await?;
        if let Some(invoice_id) = model.billing_invoice_id {
            sync_invoice_payment_status(&txn, invoice_id).await?;
        }
        txn.commit().await?;

        if let Some(gateway) = &self.gateway {
            let digest = self.digest(&model).await?;
            gateway.to_admins(&notify::messages::receivable_created(&digest));
        }
        Ok(model)
    }

    /// Updates a receivable, re-running the full save pipeline and the
    /// invoice cascade.
    pub async fn update(
        &self,
        receivable_id: Uuid,
        input: ReceivableInput,
    ) -> Result<accounts_receivable::Model, FinancialError> {
        let existing = self.get(receivable_id).await?;
        let was_paid = parse_status(&existing.status)? == FinancialStatus::Paid;
        let previous_invoice = existing.billing_invoice_id;

        let title = prepare_title(input.title)?;
        self.ensure_unique_document(input.client_id, &title.document_number, Some(receivable_id))
            .await?;

        let txn = self.db.begin().await?;
        let mut active: accounts_receivable::ActiveModel = existing.into();
        active.client_id = Set(input.client_id);
        active.billing_invoice_id = Set(input.billing_invoice_id);
        active.account_plan_item_id = Set(input.account_plan_item_id);
        apply_receivable_title(&mut active, &title);
        let model = active.update(&txn).await?;
        // Both the new and the previous invoice (if the link moved) are
        // recomputed so neither is left stale.
        if let Some(invoice_id) = model.billing_invoice_id {
            sync_invoice_payment_status(&txn, invoice_id).await?;
        }
        if let Some(previous_id) = previous_invoice
            && Some(previous_id) != model.billing_invoice_id
        {
            sync_invoice_payment_status(&txn, previous_id).await?;
        }
        txn.commit().await?;

        if !was_paid && title.status == FinancialStatus::Paid {
            self.notify_paid(&model).await?;
        }
        Ok(model)
    }

    /// Settles a receivable: sets the settlement date and re-syncs,
    /// cascading to the linked invoice.
    pub async fn settle(
        &self,
        receivable_id: Uuid,
        settlement_date: chrono::NaiveDate,
        payment_method: Option<PaymentMethod>,
    ) -> Result<accounts_receivable::Model, FinancialError> {
        let existing = self.get(receivable_id).await?;
        let mut title = receivable_title(&existing)?;
        title.settlement_date = Some(settlement_date);
        if payment_method.is_some() {
            title.payment_method = payment_method;
        }
        let title = prepare_title(title)?;

        let txn = self.db.begin().await?;
        let mut active: accounts_receivable::ActiveModel = existing.into();
        apply_receivable_title(&mut active, &title);
        let model = active.update(&txn).await?;
        if let Some(invoice_id) = model.billing_invoice_id {
            sync_invoice_payment_status(&txn, invoice_id).await?;
        }
        txn.commit().await?;

        self.notify_paid(&model).await?;
        Ok(model)
    }

    /// Cancels a receivable. Settled titles cannot be canceled.
    pub async fn cancel(
        &self,
        receivable_id: Uuid,
    ) -> Result<accounts_receivable::Model, FinancialError> {
        let existing = self.get(receivable_id).await?;
        let mut title = receivable_title(&existing)?;
        if title.settlement_date.is_some() {
            return Err(FinanceError::CancelSettled.into());
        }
        title.status = FinancialStatus::Canceled;
        validate_title(&title).map_err(FinancialError::Validation)?;

        let txn = self.db.begin().await?;
        let mut active: accounts_receivable::ActiveModel = existing.into();
        apply_receivable_title(&mut active, &title);
        let model = active.update(&txn).await?;
        if let Some(invoice_id) = model.billing_invoice_id {
            sync_invoice_payment_status(&txn, invoice_id).await?;
        }
        txn.commit().await?;
        Ok(model)
    }

    async fn notify_paid(&self, model: &accounts_receivable::Model) -> Result<(), FinancialError> {
        if let Some(gateway) = &self.gateway {
            let digest = self.digest(model).await?;
            gateway.to_admins(&notify::messages::receivable_paid(&digest));
        }
        Ok(())
    }

    /// Fetches a receivable by id.
    pub async fn get(
        &self,
        receivable_id: Uuid,
    ) -> Result<accounts_receivable::Model, FinancialError> {
        accounts_receivable::Entity::find_by_id(receivable_id)
            .one(&self.db)
            .await?
            .ok_or(FinancialError::NotFound(receivable_id))
    }

    /// Records a payment against a receivable's remaining balance.
    pub async fn record_payment(
        &self,
        receivable_id: Uuid,
        input: PaymentInput,
    ) -> Result<receivable_payments::Model, FinancialError> {
        let receivable = self.get(receivable_id).await?;
        let title = receivable_title(&receivable)?;
        let existing: Vec<rust_decimal::Decimal> = receivable_payments::Entity::find()
            .filter(receivable_payments::Column::ReceivableId.eq(receivable_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|payment| payment.amount)
            .collect();
        PaymentService::validate_payment(title.total_amount(), &existing, None, input.amount)?;

        let now = Utc::now().into();
        let payment = receivable_payments::ActiveModel {
            id: Set(Uuid::now_v7()),
            receivable_id: Set(receivable_id),
            bank_account_id: Set(input.bank_account_id),
            payment_date: Set(input.payment_date),
            amount: Set(input.amount),
            payment_method: Set(input.payment_method.map(|m| m.as_str().to_string())),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(payment.insert(&self.db).await?)
    }

    /// Edits a payment, excluding its own previous amount from the
    /// paid total.
    pub async fn update_payment(
        &self,
        payment_id: Uuid,
        input: PaymentInput,
    ) -> Result<receivable_payments::Model, FinancialError> {
        let payment = receivable_payments::Entity::find_by_id(payment_id)
            .one(&self.db)
            .await?
            .ok_or(FinancialError::PaymentNotFound(payment_id))?;
        let receivable = self.get(payment.receivable_id).await?;
        let title = receivable_title(&receivable)?;
        let existing: Vec<rust_decimal::Decimal> = receivable_payments::Entity::find()
            .filter(receivable_payments::Column::ReceivableId.eq(payment.receivable_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| p.amount)
            .collect();
        PaymentService::validate_payment(
            title.total_amount(),
            &existing,
            Some(payment.amount),
            input.amount,
        )?;

        let mut active: receivable_payments::ActiveModel = payment.into();
        active.bank_account_id = Set(input.bank_account_id);
        active.payment_date = Set(input.payment_date);
        active.amount = Set(input.amount);
        active.payment_method = Set(input.payment_method.map(|m| m.as_str().to_string()));
        active.notes = Set(input.notes);
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Outstanding receivables due on a given day, with client labels.
    pub async fn due_on(&self, day: chrono::NaiveDate) -> Result<Vec<DueTitle>, FinancialError> {
        let receivables = accounts_receivable::Entity::find()
            .filter(accounts_receivable::Column::DueDate.eq(day))
            .filter(
                accounts_receivable::Column::Status.is_not_in([
                    FinancialStatus::Paid.as_str(),
                    FinancialStatus::Canceled.as_str(),
                ]),
            )
            .order_by_asc(accounts_receivable::Column::DueDate)
            .all(&self.db)
            .await?;

        let client_ids: Vec<Uuid> = receivables.iter().map(|r| r.client_id).collect();
        let clients: HashMap<Uuid, String> = crate::entities::clients::Entity::find()
            .filter(crate::entities::clients::Column::Id.is_in(client_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        receivables
            .into_iter()
            .map(|model| {
                let party = clients
                    .get(&model.client_id)
                    .cloned()
                    .unwrap_or_else(|| "-".to_string());
                Ok(DueTitle {
                    id: model.id,
                    party,
                    title: receivable_title(&model)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payable_model() -> accounts_payable::Model {
        let now = Utc::now().into();
        accounts_payable::Model {
            id: Uuid::now_v7(),
            supplier_id: Uuid::now_v7(),
            consultant_id: None,
            billing_invoice_id: None,
            account_plan_item_id: None,
            document_number: "NF-2002".to_string(),
            description: "Licenca anual".to_string(),
            issue_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            due_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            amount: dec!(500.00),
            discount: dec!(0.00),
            interest: dec!(0.00),
            penalty: dec!(0.00),
            status: "open".to_string(),
            settlement_date: None,
            payment_method: Some("pix".to_string()),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_payable_title_round_trip() {
        let model = payable_model();
        let title = payable_title(&model).unwrap();
        assert_eq!(title.status, FinancialStatus::Open);
        assert_eq!(title.payment_method, Some(PaymentMethod::Pix));
        assert_eq!(title.total_amount(), dec!(500.00));

        let mut active =
            <accounts_payable::ActiveModel as sea_orm::ActiveModelTrait>::default();
        apply_payable_title(&mut active, &title);
        assert_eq!(active.status, Set("open".to_string()));
        assert_eq!(active.payment_method, Set(Some("pix".to_string())));
        assert_eq!(active.amount, Set(dec!(500.00)));
    }

    #[test]
    fn test_payable_title_rejects_unknown_status() {
        let mut model = payable_model();
        model.status = "weird".to_string();
        assert!(matches!(
            payable_title(&model),
            Err(FinancialError::InvalidStatus(_))
        ));
    }

    #[test]
    fn test_prepare_title_collects_validation_errors() {
        let model = payable_model();
        let mut title = payable_title(&model).unwrap();
        title.discount = dec!(600.00);
        let error = prepare_title(title).unwrap_err();
        match error {
            FinancialError::Validation(errors) => {
                assert!(errors.contains(&FinanceError::DiscountExceedsAmount));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
