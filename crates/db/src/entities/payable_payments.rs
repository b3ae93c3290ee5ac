//! `SeaORM` Entity for payments against payable titles.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payable_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub payable_id: Uuid,
    pub bank_account_id: Uuid,
    pub payment_date: Date,
    pub amount: Decimal,
    pub payment_method: Option<String>,
    pub notes: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts_payable::Entity",
        from = "Column::PayableId",
        to = "super::accounts_payable::Column::Id"
    )]
    Payables,
    #[sea_orm(
        belongs_to = "super::bank_accounts::Entity",
        from = "Column::BankAccountId",
        to = "super::bank_accounts::Column::Id"
    )]
    BankAccounts,
}

impl Related<super::accounts_payable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payables.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
