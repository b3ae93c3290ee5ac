//! Project activity repository.
//!
//! Saves validate the product/module/submodule consistency chain and
//! normalize the assumed reason before persisting; consultant and
//! predecessor edges are replaced in the same transaction. Predecessors
//! are a bare directed edge relation - acyclicity is not enforced.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use praxis_core::activity::{
    hours_available, hours_contingency, normalize_assumed_reason, validate_activity,
    ActivityDates, ActivityError, ActivityStatus, AssumedReason, BillingType, CatalogRefs,
    Criticality,
};
use praxis_core::notify::{self, ActivityDigest};

use praxis_shared::types::{ModuleId, ProductId, SubmoduleId};

use crate::entities::{
    activity_consultants, activity_predecessors, consultants, modules, products,
    project_activities, projects, submodules,
};

use super::NotificationGateway;

/// Error types for activity operations.
#[derive(Debug, thiserror::Error)]
pub enum ActivityRepoError {
    /// Activity not found.
    #[error("Activity not found: {0}")]
    NotFound(Uuid),

    /// Owning project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// A referenced catalog item not found.
    #[error("Catalog item not found: {0}")]
    CatalogNotFound(Uuid),

    /// Field invariant violations; nothing was persisted.
    #[error("Validation failed: {0:?}")]
    Validation(Vec<ActivityError>),

    /// A stored enum string is not recognized.
    #[error("Stored value is not recognized: {0}")]
    InvalidValue(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating a project activity.
#[derive(Debug, Clone)]
pub struct ActivityInput {
    /// Owning project.
    pub project_id: Uuid,
    /// Sequence within the project.
    pub seq: i16,
    /// Delivery phase label.
    pub phase: String,
    /// Selected product.
    pub product_id: Uuid,
    /// Selected module.
    pub module_id: Uuid,
    /// Selected submodule.
    pub submodule_id: Uuid,
    /// Activity name.
    pub activity: String,
    /// Subactivity description.
    pub subactivity: String,
    /// Estimated days.
    pub days: Decimal,
    /// Estimated hours.
    pub hours: Decimal,
    /// Criticality.
    pub criticality: Criticality,
    /// Billing classification of the hours.
    pub billing_type: BillingType,
    /// Reason for company-assumed hours.
    pub assumed_reason: Option<AssumedReason>,
    /// Consultant hourly rate, when overridden.
    pub consultant_hourly_rate: Option<Decimal>,
    /// Planned start date.
    pub planned_start: Option<chrono::NaiveDate>,
    /// Planned end date.
    pub planned_end: Option<chrono::NaiveDate>,
    /// Execution status.
    pub status: ActivityStatus,
    /// Assigned consultants.
    pub consultants: Vec<Uuid>,
    /// Predecessor activities.
    pub predecessors: Vec<Uuid>,
}

/// Contingency-adjusted hours split of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursSummary {
    /// Raw estimated hours.
    pub hours: Decimal,
    /// Hours available for time entries.
    pub available: Decimal,
    /// Hours held back as contingency.
    pub contingency: Decimal,
}

/// An activity row of a daily report, with its recipients.
#[derive(Debug, Clone)]
pub struct ActivityReportRow {
    /// Activity id.
    pub id: Uuid,
    /// Display digest for the message template.
    pub digest: ActivityDigest,
    /// Raw consultant phones (normalized by the gateway on send).
    pub consultant_phones: Vec<String>,
}

/// Repository for project activities.
pub struct ActivityRepository {
    db: DatabaseConnection,
    gateway: Option<NotificationGateway>,
}

impl ActivityRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, gateway: None }
    }

    /// Attaches a notification gateway for assignment notices.
    #[must_use]
    pub fn with_notifier(mut self, gateway: NotificationGateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    async fn catalog_refs(&self, input: &ActivityInput) -> Result<CatalogRefs, ActivityRepoError> {
        let module = modules::Entity::find_by_id(input.module_id)
            .one(&self.db)
            .await?
            .ok_or(ActivityRepoError::CatalogNotFound(input.module_id))?;
        let submodule = submodules::Entity::find_by_id(input.submodule_id)
            .one(&self.db)
            .await?
            .ok_or(ActivityRepoError::CatalogNotFound(input.submodule_id))?;
        Ok(CatalogRefs {
            product: ProductId::from_uuid(input.product_id),
            module: ModuleId::from_uuid(input.module_id),
            module_product: ProductId::from_uuid(module.product_id),
            submodule: SubmoduleId::from_uuid(input.submodule_id),
            submodule_module: ModuleId::from_uuid(submodule.module_id),
            submodule_product: ProductId::from_uuid(submodule.product_id),
        })
    }

    fn validate(
        catalog: &CatalogRefs,
        dates: &ActivityDates,
        input: &ActivityInput,
        assumed_reason: Option<AssumedReason>,
    ) -> Result<(), ActivityRepoError> {
        validate_activity(
            catalog,
            dates,
            input.consultant_hourly_rate,
            input.billing_type,
            assumed_reason,
        )
        .map_err(ActivityRepoError::Validation)
    }

    /// Creates an activity and its assignment/predecessor edges.
    pub async fn create(
        &self,
        input: ActivityInput,
    ) -> Result<project_activities::Model, ActivityRepoError> {
        projects::Entity::find_by_id(input.project_id)
            .one(&self.db)
            .await?
            .ok_or(ActivityRepoError::ProjectNotFound(input.project_id))?;
        let catalog = self.catalog_refs(&input).await?;
        let assumed_reason = normalize_assumed_reason(input.billing_type, input.assumed_reason);
        let dates = ActivityDates {
            planned_start: input.planned_start,
            planned_end: input.planned_end,
            actual_start: None,
            actual_end: None,
        };
        Self::validate(&catalog, &dates, &input, assumed_reason)?;

        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let activity = project_activities::ActiveModel {
            id: Set(Uuid::now_v7()),
            project_id: Set(input.project_id),
            seq: Set(input.seq),
            phase: Set(input.phase.clone()),
            product_id: Set(input.product_id),
            module_id: Set(input.module_id),
            submodule_id: Set(input.submodule_id),
            activity: Set(input.activity.clone()),
            subactivity: Set(input.subactivity.clone()),
            days: Set(input.days),
            hours: Set(input.hours),
            criticality: Set(input.criticality.as_str().to_string()),
            billing_type: Set(input.billing_type.as_str().to_string()),
            assumed_reason: Set(assumed_reason.map(|r| r.as_str().to_string())),
            consultant_hourly_rate: Set(input.consultant_hourly_rate),
            planned_start: Set(input.planned_start),
            planned_end: Set(input.planned_end),
            actual_start: Set(None),
            actual_end: Set(None),
            status: Set(input.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = activity.insert(&txn).await?;
        replace_edges(&txn, model.id, &input.consultants, &input.predecessors).await?;
        txn.commit().await?;

        self.notify_assigned(&model, &input.consultants).await?;
        Ok(model)
    }

    /// Updates an activity; actual dates are system-managed and kept.
    pub async fn update(
        &self,
        activity_id: Uuid,
        input: ActivityInput,
    ) -> Result<project_activities::Model, ActivityRepoError> {
        let existing = self.get(activity_id).await?;
        let catalog = self.catalog_refs(&input).await?;
        let assumed_reason = normalize_assumed_reason(input.billing_type, input.assumed_reason);
        let dates = ActivityDates {
            planned_start: input.planned_start,
            planned_end: input.planned_end,
            actual_start: existing.actual_start,
            actual_end: existing.actual_end,
        };
        Self::validate(&catalog, &dates, &input, assumed_reason)?;

        let previously_assigned: Vec<Uuid> = activity_consultants::Entity::find()
            .filter(activity_consultants::Column::ActivityId.eq(activity_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|edge| edge.consultant_id)
            .collect();

        let txn = self.db.begin().await?;
        let mut active: project_activities::ActiveModel = existing.into();
        active.seq = Set(input.seq);
        active.phase = Set(input.phase.clone());
        active.product_id = Set(input.product_id);
        active.module_id = Set(input.module_id);
        active.submodule_id = Set(input.submodule_id);
        active.activity = Set(input.activity.clone());
        active.subactivity = Set(input.subactivity.clone());
        active.days = Set(input.days);
        active.hours = Set(input.hours);
        active.criticality = Set(input.criticality.as_str().to_string());
        active.billing_type = Set(input.billing_type.as_str().to_string());
        active.assumed_reason = Set(assumed_reason.map(|r| r.as_str().to_string()));
        active.consultant_hourly_rate = Set(input.consultant_hourly_rate);
        active.planned_start = Set(input.planned_start);
        active.planned_end = Set(input.planned_end);
        active.status = Set(input.status.as_str().to_string());
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&txn).await?;
        replace_edges(&txn, activity_id, &input.consultants, &input.predecessors).await?;
        txn.commit().await?;

        let newly_assigned: Vec<Uuid> = input
            .consultants
            .iter()
            .copied()
            .filter(|id| !previously_assigned.contains(id))
            .collect();
        self.notify_assigned(&model, &newly_assigned).await?;
        Ok(model)
    }

    async fn notify_assigned(
        &self,
        model: &project_activities::Model,
        consultant_ids: &[Uuid],
    ) -> Result<(), ActivityRepoError> {
        let Some(gateway) = &self.gateway else {
            return Ok(());
        };
        if consultant_ids.is_empty() {
            return Ok(());
        }
        let digest = self.digest(model).await?;
        let message = notify::messages::activity_assigned(&digest);
        for consultant in consultants::Entity::find()
            .filter(consultants::Column::Id.is_in(consultant_ids.to_vec()))
            .all(&self.db)
            .await?
        {
            if let Some(phone) = consultant.whatsapp_phone {
                gateway.to_consultant(&phone, &message);
            }
        }
        Ok(())
    }

    /// Fetches an activity by id.
    pub async fn get(
        &self,
        activity_id: Uuid,
    ) -> Result<project_activities::Model, ActivityRepoError> {
        project_activities::Entity::find_by_id(activity_id)
            .one(&self.db)
            .await?
            .ok_or(ActivityRepoError::NotFound(activity_id))
    }

    /// Contingency-adjusted hours split, derived on demand from the
    /// owning project's contingency percent. Never persisted.
    pub async fn hours_summary(&self, activity_id: Uuid) -> Result<HoursSummary, ActivityRepoError> {
        let activity = self.get(activity_id).await?;
        let project = projects::Entity::find_by_id(activity.project_id)
            .one(&self.db)
            .await?
            .ok_or(ActivityRepoError::ProjectNotFound(activity.project_id))?;
        Ok(HoursSummary {
            hours: activity.hours,
            available: hours_available(activity.hours, project.contingency_percent),
            contingency: hours_contingency(activity.hours, project.contingency_percent),
        })
    }

    /// Open activities whose planned window covers `day`, for the daily
    /// report.
    pub async fn planned_for(
        &self,
        day: chrono::NaiveDate,
    ) -> Result<Vec<ActivityReportRow>, ActivityRepoError> {
        let window = Condition::any()
            .add(
                Condition::all()
                    .add(project_activities::Column::PlannedStart.lte(day))
                    .add(project_activities::Column::PlannedEnd.gte(day)),
            )
            .add(
                Condition::all()
                    .add(project_activities::Column::PlannedStart.eq(day))
                    .add(project_activities::Column::PlannedEnd.is_null()),
            )
            .add(
                Condition::all()
                    .add(project_activities::Column::PlannedEnd.eq(day))
                    .add(project_activities::Column::PlannedStart.is_null()),
            );
        let activities = self.open_activities(window).await?;
        self.report_rows(activities).await
    }

    /// Open activities past their planned end, for the overdue report.
    pub async fn overdue_on(
        &self,
        day: chrono::NaiveDate,
    ) -> Result<Vec<ActivityReportRow>, ActivityRepoError> {
        let window = Condition::all().add(project_activities::Column::PlannedEnd.lt(day));
        let activities = self.open_activities(window).await?;
        self.report_rows(activities).await
    }

    async fn open_activities(
        &self,
        window: Condition,
    ) -> Result<Vec<project_activities::Model>, ActivityRepoError> {
        Ok(project_activities::Entity::find()
            .filter(window)
            .filter(
                project_activities::Column::Status.is_not_in([
                    ActivityStatus::Done.as_str(),
                    ActivityStatus::Canceled.as_str(),
                ]),
            )
            .order_by_asc(project_activities::Column::Seq)
            .all(&self.db)
            .await?)
    }

    async fn digest(
        &self,
        model: &project_activities::Model,
    ) -> Result<ActivityDigest, ActivityRepoError> {
        let project = projects::Entity::find_by_id(model.project_id)
            .one(&self.db)
            .await?
            .ok_or(ActivityRepoError::ProjectNotFound(model.project_id))?;
        let product = products::Entity::find_by_id(model.product_id).one(&self.db).await?;
        let module = modules::Entity::find_by_id(model.module_id).one(&self.db).await?;
        let submodule = submodules::Entity::find_by_id(model.submodule_id)
            .one(&self.db)
            .await?;
        Ok(build_digest(
            model,
            &project.description,
            product.map_or_else(|| "-".to_string(), |p| p.name),
            module.map_or_else(|| "-".to_string(), |m| m.name),
            submodule.map_or_else(|| "-".to_string(), |s| s.name),
        )?)
    }

    async fn report_rows(
        &self,
        activities: Vec<project_activities::Model>,
    ) -> Result<Vec<ActivityReportRow>, ActivityRepoError> {
        let activity_ids: Vec<Uuid> = activities.iter().map(|a| a.id).collect();
        let project_ids: Vec<Uuid> = activities.iter().map(|a| a.project_id).collect();
        let product_ids: Vec<Uuid> = activities.iter().map(|a| a.product_id).collect();
        let module_ids: Vec<Uuid> = activities.iter().map(|a| a.module_id).collect();
        let submodule_ids: Vec<Uuid> = activities.iter().map(|a| a.submodule_id).collect();

        let project_names: HashMap<Uuid, String> = projects::Entity::find()
            .filter(projects::Column::Id.is_in(project_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.description))
            .collect();
        let product_names: HashMap<Uuid, String> = products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        let module_names: HashMap<Uuid, String> = modules::Entity::find()
            .filter(modules::Column::Id.is_in(module_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();
        let submodule_names: HashMap<Uuid, String> = submodules::Entity::find()
            .filter(submodules::Column::Id.is_in(submodule_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let edges = activity_consultants::Entity::find()
            .filter(activity_consultants::Column::ActivityId.is_in(activity_ids))
            .all(&self.db)
            .await?;
        let consultant_ids: Vec<Uuid> = edges.iter().map(|e| e.consultant_id).collect();
        let phones: HashMap<Uuid, Option<String>> = consultants::Entity::find()
            .filter(consultants::Column::Id.is_in(consultant_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.whatsapp_phone))
            .collect();

        let lookup = |names: &HashMap<Uuid, String>, id: Uuid| {
            names.get(&id).cloned().unwrap_or_else(|| "-".to_string())
        };

        let mut rows = Vec::new();
        for model in activities {
            let consultant_phones: Vec<String> = edges
                .iter()
                .filter(|edge| edge.activity_id == model.id)
                .filter_map(|edge| phones.get(&edge.consultant_id).cloned().flatten())
                .collect();
            // Reports only go to activities with someone assigned.
            if consultant_phones.is_empty() {
                continue;
            }
            let digest = build_digest(
                &model,
                &lookup(&project_names, model.project_id),
                lookup(&product_names, model.product_id),
                lookup(&module_names, model.module_id),
                lookup(&submodule_names, model.submodule_id),
            )?;
            rows.push(ActivityReportRow {
                id: model.id,
                digest,
                consultant_phones,
            });
        }
        Ok(rows)
    }
}

fn build_digest(
    model: &project_activities::Model,
    project: &str,
    product: String,
    module: String,
    submodule: String,
) -> Result<ActivityDigest, ActivityRepoError> {
    let criticality = Criticality::parse(&model.criticality)
        .ok_or_else(|| ActivityRepoError::InvalidValue(model.criticality.clone()))?;
    let subactivities = if model.subactivity.is_empty() {
        "-".to_string()
    } else {
        model.subactivity.clone()
    };
    Ok(ActivityDigest {
        project: project.to_string(),
        phase: model.phase.clone(),
        product,
        module,
        submodule,
        activity: model.activity.clone(),
        subactivities,
        criticality,
        days: model.days,
        hours: model.hours,
        planned_start: model.planned_start,
    })
}

async fn replace_edges(
    txn: &sea_orm::DatabaseTransaction,
    activity_id: Uuid,
    consultant_ids: &[Uuid],
    predecessor_ids: &[Uuid],
) -> Result<(), DbErr> {
    activity_consultants::Entity::delete_many()
        .filter(activity_consultants::Column::ActivityId.eq(activity_id))
        .exec(txn)
        .await?;
    for consultant_id in consultant_ids {
        activity_consultants::ActiveModel {
            activity_id: Set(activity_id),
            consultant_id: Set(*consultant_id),
        }
        .insert(txn)
        .await?;
    }

    activity_predecessors::Entity::delete_many()
        .filter(activity_predecessors::Column::ActivityId.eq(activity_id))
        .exec(txn)
        .await?;
    for predecessor_id in predecessor_ids {
        // Self-edges make no sense even without full cycle detection.
        if *predecessor_id == activity_id {
            continue;
        }
        activity_predecessors::ActiveModel {
            activity_id: Set(activity_id),
            predecessor_id: Set(*predecessor_id),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}
