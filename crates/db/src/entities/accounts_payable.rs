//! `SeaORM` Entity for the accounts payable table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts_payable")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub consultant_id: Option<Uuid>,
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
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::Id"
    )]
    Suppliers,
    #[sea_orm(
        belongs_to = "super::consultants::Entity",
        from = "Column::ConsultantId",
        to = "super::consultants::Column::Id"
    )]
    Consultants,
    #[sea_orm(has_many = "super::payable_payments::Entity")]
    Payments,
}

impl Related<super::payable_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
