//! `SeaORM` Entity for the time entries table.
//!
//! `total_hours` is always recomputed from the entry-type-specific
//! fields before persisting; the stored value is never trusted as
//! input.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "time_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub activity_id: Uuid,
    pub consultant_id: Uuid,
    pub entry_type: String,
    pub status: String,
    pub start_date: Date,
    pub end_date: Date,
    pub hours: Option<Decimal>,
    pub hours_monday: Option<Decimal>,
    pub hours_tuesday: Option<Decimal>,
    pub hours_wednesday: Option<Decimal>,
    pub hours_thursday: Option<Decimal>,
    pub hours_friday: Option<Decimal>,
    pub hours_saturday: Option<Decimal>,
    pub hours_sunday: Option<Decimal>,
    pub total_hours: Decimal,
    pub description: String,
    pub rejection_reason: String,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTimeWithTimeZone>,
    pub billing_invoice_id: Option<Uuid>,
    pub billing_invoice_number: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project_activities::Entity",
        from = "Column::ActivityId",
        to = "super::project_activities::Column::Id"
    )]
    Activities,
    #[sea_orm(
        belongs_to = "super::consultants::Entity",
        from = "Column::ConsultantId",
        to = "super::consultants::Column::Id"
    )]
    Consultants,
    #[sea_orm(
        belongs_to = "super::billing_invoices::Entity",
        from = "Column::BillingInvoiceId",
        to = "super::billing_invoices::Column::Id"
    )]
    BillingInvoices,
}

impl Related<super::project_activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activities.def()
    }
}

impl Related<super::consultants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consultants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
