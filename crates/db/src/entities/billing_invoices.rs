//! `SeaORM` Entity for the billing invoices table.
//!
//! `payment_status` is derived from the linked receivables and written
//! only when the computed value differs from the stored one.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "billing_invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub number: String,
    pub billing_client_id: Uuid,
    pub project_id: Option<Uuid>,
    pub period_start: Date,
    pub period_end: Date,
    pub total_hours: Decimal,
    pub total_value: Decimal,
    pub payment_status: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::BillingClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
    #[sea_orm(has_many = "super::accounts_receivable::Entity")]
    Receivables,
}

impl Related<super::accounts_receivable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receivables.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
