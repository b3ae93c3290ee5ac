//! Dispatch log repository.
//!
//! Persists the last-sent date of each daily report so the scheduler's
//! at-most-once-per-day guarantee survives restarts.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use praxis_core::notify::ReportKind;

use crate::entities::dispatch_log;

/// Error types for dispatch log operations.
#[derive(Debug, thiserror::Error)]
pub enum DispatchLogError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for the daily dispatch log.
pub struct DispatchLogRepository {
    db: DatabaseConnection,
}

impl DispatchLogRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Whether a report was already dispatched on the given day.
    pub async fn already_sent(
        &self,
        kind: ReportKind,
        day: chrono::NaiveDate,
    ) -> Result<bool, DispatchLogError> {
        let row = dispatch_log::Entity::find()
            .filter(dispatch_log::Column::ReportKind.eq(kind.as_str()))
            .filter(dispatch_log::Column::SentOn.eq(day))
            .one(&self.db)
            .await?;
        Ok(row.is_some())
    }

    /// Records a dispatch; idempotent on (kind, day).
    pub async fn mark_sent(
        &self,
        kind: ReportKind,
        day: chrono::NaiveDate,
    ) -> Result<(), DispatchLogError> {
        let row = dispatch_log::ActiveModel {
            id: Set(Uuid::now_v7()),
            report_kind: Set(kind.as_str().to_string()),
            sent_on: Set(day),
            created_at: Set(Utc::now().into()),
        };
        dispatch_log::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    dispatch_log::Column::ReportKind,
                    dispatch_log::Column::SentOn,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
