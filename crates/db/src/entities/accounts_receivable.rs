//! `SeaORM` Entity for the accounts receivable table.
//!
//! Saving a receivable cascades a payment-status recomputation of its
//! linked billing invoice inside the same transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts_receivable")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub billing_invoice_id: Option<Uuid>,
    pub account_plan_item_id: Option<Uuid>,
    pub document_number: String,
    pub description: String,
    pub issue_date: Date,
    pub due_date: Date,
    pub amount: Decimal,
    pub discount: Decimal,
    pub interest: Decimal,
    pub penalty: Decimal,
    pub status: String,
    pub settlement_date: Option<Date>,
    pub payment_method: Option<String>,
    pub notes: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
    #[sea_orm(
        belongs_to = "super::billing_invoices::Entity",
        from = "Column::BillingInvoiceId",
        to = "super::billing_invoices::Column::Id"
    )]
    BillingInvoices,
    #[sea_orm(has_many = "super::receivable_payments::Entity")]
    Payments,
}

impl Related<super::billing_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillingInvoices.def()
    }
}

impl Related<super::receivable_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
