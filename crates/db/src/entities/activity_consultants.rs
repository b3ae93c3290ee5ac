//! `SeaORM` Entity for the activity <-> consultant assignment edges.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_consultants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub activity_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub consultant_id: Uuid,
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
}

impl ActiveModelBehavior for ActiveModel {}
