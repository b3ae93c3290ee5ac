//! Time entry repository.
//!
//! Create/update runs the business-rule validation (released activity,
//! positive hours, availability cap) against the other entries' sums,
//! recomputes `total_hours`, denormalizes the invoice number, and then
//! synchronizes the activity inside the same transaction: a guarded
//! `actual_start` backfill on every save, and the completion sync on
//! every approval.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use praxis_core::activity::ActivityStatus;
use praxis_core::notify::{self, TimeEntryDigest};
use praxis_core::timesheet::{
    activity_start_sync, completion_sync, review, total_hours, validate_entry, ApprovedSpan,
    EntryHours, ReviewDecision, TimeEntryStatus, TimesheetError, WeekHours,
};

use crate::entities::{billing_invoices, consultants, project_activities, projects, time_entries};

use super::NotificationGateway;

/// Error types for time entry operations.
#[derive(Debug, thiserror::Error)]
pub enum TimeEntryRepoError {
    /// Time entry not found.
    #[error("Time entry not found: {0}")]
    NotFound(Uuid),

    /// Target activity not found.
    #[error("Activity not found: {0}")]
    ActivityNotFound(Uuid),

    /// Linked invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Uuid),

    /// Business-rule violations; nothing was persisted.
    #[error("Validation failed: {0:?}")]
    Validation(Vec<TimesheetError>),

    /// The review transition was rejected.
    #[error(transparent)]
    Review(#[from] TimesheetError),

    /// A stored enum string is not recognized.
    #[error("Stored value is not recognized: {0}")]
    InvalidValue(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating a time entry.
#[derive(Debug, Clone)]
pub struct TimeEntryInput {
    /// Target activity; must be released.
    pub activity_id: Uuid,
    /// Consultant logging the time.
    pub consultant_id: Uuid,
    /// The hours shape (daily or weekly).
    pub hours: EntryHours,
    /// Period start.
    pub start_date: chrono::NaiveDate,
    /// Period end.
    pub end_date: chrono::NaiveDate,
    /// Service description.
    pub description: String,
    /// Optional invoice link; its number is denormalized on save.
    pub billing_invoice_id: Option<Uuid>,
}

fn parse_entry_status(status: &str) -> Result<TimeEntryStatus, TimeEntryRepoError> {
    TimeEntryStatus::parse(status)
        .ok_or_else(|| TimeEntryRepoError::InvalidValue(status.to_string()))
}

fn parse_activity_status(status: &str) -> Result<ActivityStatus, TimeEntryRepoError> {
    ActivityStatus::parse(status)
        .ok_or_else(|| TimeEntryRepoError::InvalidValue(status.to_string()))
}

/// Reconstructs the hours shape of a stored entry, e.g. to prefill an
/// edit form.
#[must_use]
pub fn entry_hours(model: &time_entries::Model) -> EntryHours {
    if model.entry_type == "weekly" {
        EntryHours::Weekly(WeekHours {
            monday: model.hours_monday,
            tuesday: model.hours_tuesday,
            wednesday: model.hours_wednesday,
            thursday: model.hours_thursday,
            friday: model.hours_friday,
            saturday: model.hours_saturday,
            sunday: model.hours_sunday,
        })
    } else {
        EntryHours::Daily { hours: model.hours }
    }
}

fn apply_hours(active: &mut time_entries::ActiveModel, hours: &EntryHours, total: Decimal) {
    active.entry_type = Set(hours.type_str().to_string());
    active.total_hours = Set(total);
    match hours {
        EntryHours::Daily { hours } => {
            active.hours = Set(*hours);
            active.hours_monday = Set(None);
            active.hours_tuesday = Set(None);
            active.hours_wednesday = Set(None);
            active.hours_thursday = Set(None);
            active.hours_friday = Set(None);
            active.hours_saturday = Set(None);
            active.hours_sunday = Set(None);
        }
        EntryHours::Weekly(week) => {
            active.hours = Set(None);
            active.hours_monday = Set(week.monday);
            active.hours_tuesday = Set(week.tuesday);
            active.hours_wednesday = Set(week.wednesday);
            active.hours_thursday = Set(week.thursday);
            active.hours_friday = Set(week.friday);
            active.hours_saturday = Set(week.saturday);
            active.hours_sunday = Set(week.sunday);
        }
    }
}

/// Repository for time entries.
pub struct TimeEntryRepository {
    db: DatabaseConnection,
    gateway: Option<NotificationGateway>,
}

impl TimeEntryRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, gateway: None }
    }

    /// Attaches a notification gateway for pending/reviewed notices.
    #[must_use]
    pub fn with_notifier(mut self, gateway: NotificationGateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    async fn activity(
        &self,
        activity_id: Uuid,
    ) -> Result<project_activities::Model, TimeEntryRepoError> {
        project_activities::Entity::find_by_id(activity_id)
            .one(&self.db)
            .await?
            .ok_or(TimeEntryRepoError::ActivityNotFound(activity_id))
    }

    /// Sums of the activity's other entries by status, excluding the
    /// entry being edited so an edit does not count against itself.
    async fn sibling_sums(
        &self,
        activity_id: Uuid,
        exclude: Option<Uuid>,
    ) -> Result<(Decimal, Decimal), TimeEntryRepoError> {
        let mut query =
            time_entries::Entity::find().filter(time_entries::Column::ActivityId.eq(activity_id));
        if let Some(id) = exclude {
            query = query.filter(time_entries::Column::Id.ne(id));
        }
        let mut approved = Decimal::ZERO;
        let mut pending = Decimal::ZERO;
        for entry in query.all(&self.db).await? {
            match parse_entry_status(&entry.status)? {
                TimeEntryStatus::Approved => approved += entry.total_hours,
                TimeEntryStatus::Pending => pending += entry.total_hours,
                TimeEntryStatus::Rejected => {}
            }
        }
        Ok((approved, pending))
    }

    async fn invoice_number(
        &self,
        billing_invoice_id: Option<Uuid>,
    ) -> Result<String, TimeEntryRepoError> {
        let Some(invoice_id) = billing_invoice_id else {
            return Ok(String::new());
        };
        let invoice = billing_invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(TimeEntryRepoError::InvoiceNotFound(invoice_id))?;
        Ok(invoice.number)
    }

    async fn validate_input(
        &self,
        input: &TimeEntryInput,
        exclude: Option<Uuid>,
    ) -> Result<(project_activities::Model, Decimal), TimeEntryRepoError> {
        let activity = self.activity(input.activity_id).await?;
        let activity_status = parse_activity_status(&activity.status)?;
        let total = total_hours(&input.hours);
        let (approved_other, pending_other) =
            self.sibling_sums(input.activity_id, exclude).await?;
        validate_entry(
            activity_status,
            input.start_date,
            input.end_date,
            total,
            activity.hours,
            approved_other,
            pending_other,
        )
        .map_err(TimeEntryRepoError::Validation)?;
        Ok((activity, total))
    }

    /// Creates a pending entry and backfills the activity's
    /// `actual_start` when this is its first entry.
    pub async fn create(
        &self,
        input: TimeEntryInput,
    ) -> Result<time_entries::Model, TimeEntryRepoError> {
        let (activity, total) = self.validate_input(&input, None).await?;
        let invoice_number = self.invoice_number(input.billing_invoice_id).await?;

        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let mut active = time_entries::ActiveModel {
            id: Set(Uuid::now_v7()),
            activity_id: Set(input.activity_id),
            consultant_id: Set(input.consultant_id),
            status: Set(TimeEntryStatus::Pending.as_str().to_string()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            description: Set(input.description.clone()),
            rejection_reason: Set(String::new()),
            billing_invoice_id: Set(input.billing_invoice_id),
            billing_invoice_number: Set(invoice_number),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_hours(&mut active, &input.hours, total);
        let model = active.insert(&txn).await?;
        sync_activity_start(&txn, &activity).await?;
        txn.commit().await?;

        if let Some(gateway) = &self.gateway {
            let digest = self.digest(&model).await?;
            gateway.to_admins(&notify::messages::time_entry_pending(&digest));
        }
        Ok(model)
    }

    /// Updates an entry's content, re-running validation against the
    /// other entries and the activity synchronizations.
    pub async fn update(
        &self,
        entry_id: Uuid,
        input: TimeEntryInput,
    ) -> Result<time_entries::Model, TimeEntryRepoError> {
        let existing = self.get(entry_id).await?;
        let status = parse_entry_status(&existing.status)?;
        let (activity, total) = self.validate_input(&input, Some(entry_id)).await?;
        let invoice_number = self.invoice_number(input.billing_invoice_id).await?;

        let txn = self.db.begin().await?;
        let mut active: time_entries::ActiveModel = existing.into();
        active.activity_id = Set(input.activity_id);
        active.consultant_id = Set(input.consultant_id);
        active.start_date = Set(input.start_date);
        active.end_date = Set(input.end_date);
        active.description = Set(input.description.clone());
        active.billing_invoice_id = Set(input.billing_invoice_id);
        active.billing_invoice_number = Set(invoice_number);
        active.updated_at = Set(Utc::now().into());
        apply_hours(&mut active, &input.hours, total);
        let model = active.update(&txn).await?;
        sync_activity_start(&txn, &activity).await?;
        // An approved entry keeps the activity in sync even when its
        // hours are edited after the fact.
        if status == TimeEntryStatus::Approved {
            sync_activity_completion(&txn, activity.id).await?;
        }
        txn.commit().await?;
        Ok(model)
    }

    /// Reviews a pending entry: `Pending -> {Approved, Rejected}`.
    ///
    /// Approval re-runs the completion sync from scratch; it fires on
    /// every approval, not only the one that first consumes the budget,
    /// so late approvals can still push `actual_end` forward.
    pub async fn review(
        &self,
        entry_id: Uuid,
        decision: ReviewDecision,
        reviewed_by: Option<Uuid>,
    ) -> Result<time_entries::Model, TimeEntryRepoError> {
        let existing = self.get(entry_id).await?;
        let current = parse_entry_status(&existing.status)?;
        let new_status = review(current, &decision)?;
        let activity_id = existing.activity_id;

        let txn = self.db.begin().await?;
        let mut active: time_entries::ActiveModel = existing.into();
        active.status = Set(new_status.as_str().to_string());
        if let ReviewDecision::Reject { reason } = &decision {
            active.rejection_reason = Set(reason.clone());
        }
        active.reviewed_by = Set(reviewed_by);
        active.reviewed_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&txn).await?;

        if new_status == TimeEntryStatus::Approved {
            sync_activity_completion(&txn, activity_id).await?;
        }
        txn.commit().await?;

        if let Some(gateway) = &self.gateway {
            let digest = self.digest(&model).await?;
            if let Some(message) = notify::messages::time_entry_reviewed(&digest, new_status) {
                if let Some(phone) = self.consultant_phone(model.consultant_id).await? {
                    gateway.to_consultant(&phone, &message);
                }
            }
        }
        Ok(model)
    }

    /// Fetches an entry by id.
    pub async fn get(&self, entry_id: Uuid) -> Result<time_entries::Model, TimeEntryRepoError> {
        time_entries::Entity::find_by_id(entry_id)
            .one(&self.db)
            .await?
            .ok_or(TimeEntryRepoError::NotFound(entry_id))
    }

    /// The entries of an activity, oldest first.
    pub async fn for_activity(
        &self,
        activity_id: Uuid,
    ) -> Result<Vec<time_entries::Model>, TimeEntryRepoError> {
        Ok(time_entries::Entity::find()
            .filter(time_entries::Column::ActivityId.eq(activity_id))
            .order_by_asc(time_entries::Column::StartDate)
            .all(&self.db)
            .await?)
    }

    async fn consultant_phone(
        &self,
        consultant_id: Uuid,
    ) -> Result<Option<String>, TimeEntryRepoError> {
        let consultant = consultants::Entity::find_by_id(consultant_id)
            .one(&self.db)
            .await?;
        Ok(consultant.and_then(|c| c.whatsapp_phone))
    }

    async fn digest(
        &self,
        model: &time_entries::Model,
    ) -> Result<TimeEntryDigest, TimeEntryRepoError> {
        let consultant = consultants::Entity::find_by_id(model.consultant_id)
            .one(&self.db)
            .await?
            .map_or_else(|| "-".to_string(), |c| c.full_name);
        let activity = self.activity(model.activity_id).await?;
        let project = projects::Entity::find_by_id(activity.project_id)
            .one(&self.db)
            .await?
            .map_or_else(|| "-".to_string(), |p| p.description);
        Ok(TimeEntryDigest {
            consultant,
            project,
            activity: activity.activity,
            start_date: Some(model.start_date),
            end_date: Some(model.end_date),
            total_hours: model.total_hours,
            rejection_reason: if model.rejection_reason.is_empty() {
                None
            } else {
                Some(model.rejection_reason.clone())
            },
            id: Some(model.id.to_string()),
        })
    }
}

/// Backfills the activity's `actual_start` from its earliest entry.
///
/// The update is conditioned on `actual_start IS NULL` so a
/// concurrently-set value is never clobbered.
async fn sync_activity_start<C: ConnectionTrait>(
    conn: &C,
    activity: &project_activities::Model,
) -> Result<(), DbErr> {
    let first_entry = time_entries::Entity::find()
        .filter(time_entries::Column::ActivityId.eq(activity.id))
        .order_by_asc(time_entries::Column::StartDate)
        .one(conn)
        .await?;
    let Some(start) = activity_start_sync(activity.actual_start, first_entry.map(|e| e.start_date))
    else {
        return Ok(());
    };
    project_activities::Entity::update_many()
        .col_expr(project_activities::Column::ActualStart, Expr::value(start))
        .filter(project_activities::Column::Id.eq(activity.id))
        .filter(project_activities::Column::ActualStart.is_null())
        .exec(conn)
        .await?;
    Ok(())
}

/// Re-runs the completion sync from scratch over the activity's
/// approved entries and applies the resulting update, if any.
async fn sync_activity_completion<C: ConnectionTrait>(
    conn: &C,
    activity_id: Uuid,
) -> Result<(), DbErr> {
    let Some(activity) = project_activities::Entity::find_by_id(activity_id)
        .one(conn)
        .await?
    else {
        return Ok(());
    };
    let activity_status = ActivityStatus::parse(&activity.status)
        .ok_or_else(|| DbErr::Custom(format!("unrecognized activity status: {}", activity.status)))?;

    let approved: Vec<ApprovedSpan> = time_entries::Entity::find()
        .filter(time_entries::Column::ActivityId.eq(activity_id))
        .filter(time_entries::Column::Status.eq(TimeEntryStatus::Approved.as_str()))
        .all(conn)
        .await?
        .into_iter()
        .map(|entry| ApprovedSpan {
            start_date: entry.start_date,
            end_date: Some(entry.end_date),
            total_hours: entry.total_hours,
        })
        .collect();

    let Some(update) =
        completion_sync(activity.hours, activity_status, activity.actual_end, &approved)
    else {
        return Ok(());
    };
    let mut active: project_activities::ActiveModel = activity.into();
    if update.mark_done {
        active.status = Set(ActivityStatus::Done.as_str().to_string());
    }
    if let Some(actual_end) = update.actual_end {
        active.actual_end = Set(Some(actual_end));
    }
    active.updated_at = Set(Utc::now().into());
    active.update(conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn model(entry_type: &str) -> time_entries::Model {
        let now = Utc::now().into();
        time_entries::Model {
            id: Uuid::now_v7(),
            activity_id: Uuid::now_v7(),
            consultant_id: Uuid::now_v7(),
            entry_type: entry_type.to_string(),
            status: "pending".to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            hours: Some(dec!(8.00)),
            hours_monday: Some(dec!(4.00)),
            hours_tuesday: None,
            hours_wednesday: Some(dec!(2.50)),
            hours_thursday: None,
            hours_friday: None,
            hours_saturday: None,
            hours_sunday: None,
            total_hours: dec!(0.00),
            description: String::new(),
            rejection_reason: String::new(),
            reviewed_by: None,
            reviewed_at: None,
            billing_invoice_id: None,
            billing_invoice_number: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_entry_hours_daily() {
        let hours = entry_hours(&model("daily"));
        assert_eq!(total_hours(&hours), dec!(8.00));
    }

    #[test]
    fn test_entry_hours_weekly_ignores_daily_field() {
        let hours = entry_hours(&model("weekly"));
        assert_eq!(total_hours(&hours), dec!(6.50));
    }

    #[test]
    fn test_apply_hours_clears_the_other_shape() {
        let mut active =
            <time_entries::ActiveModel as sea_orm::ActiveModelTrait>::default();
        let daily = EntryHours::Daily {
            hours: Some(dec!(8.00)),
        };
        apply_hours(&mut active, &daily, total_hours(&daily));
        assert_eq!(active.entry_type, Set("daily".to_string()));
        assert_eq!(active.hours, Set(Some(dec!(8.00))));
        assert_eq!(active.hours_monday, Set(None));
        assert_eq!(active.total_hours, Set(dec!(8.00)));

        let weekly = EntryHours::Weekly(WeekHours {
            monday: Some(dec!(4.00)),
            wednesday: Some(dec!(2.50)),
            ..WeekHours::default()
        });
        apply_hours(&mut active, &weekly, total_hours(&weekly));
        assert_eq!(active.entry_type, Set("weekly".to_string()));
        assert_eq!(active.hours, Set(None));
        assert_eq!(active.hours_monday, Set(Some(dec!(4.00))));
        assert_eq!(active.total_hours, Set(dec!(6.50)));
    }

    #[test]
    fn test_parse_entry_status_rejects_unknown() {
        assert!(parse_entry_status("pending").is_ok());
        assert!(parse_entry_status("bogus").is_err());
    }
}
