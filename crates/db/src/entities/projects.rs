//! `SeaORM` Entity for the projects table.
//!
//! `total_value`, `contracted_hours`, `available_hours` and
//! `available_value` are derived columns, overwritten from the metrics
//! calculator on every save.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub billing_client_id: Uuid,
    pub project_client_id: Uuid,
    pub description: String,
    pub received_date: Option<Date>,
    pub planned_go_live_date: Option<Date>,
    pub cutover_planned_start: Option<Date>,
    pub cutover_planned_end: Option<Date>,
    pub contract_type: String,
    pub status: String,
    pub total_value: Decimal,
    pub hourly_rate: Decimal,
    pub contracted_hours: Decimal,
    pub contingency_percent: Decimal,
    pub available_hours: Decimal,
    pub available_value: Decimal,
    pub internal_manager_id: Option<Uuid>,
    pub external_manager_id: Option<Uuid>,
    pub client_user_id: Option<Uuid>,
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
    BillingClient,
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ProjectClientId",
        to = "super::clients::Column::Id"
    )]
    ProjectClient,
}

impl ActiveModelBehavior for ActiveModel {}
