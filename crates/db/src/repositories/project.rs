//! Project repository.
//!
//! Every save derives the financial metrics from current state before
//! persisting, regardless of which fields the caller touched, and
//! appends the audit observations (change diff, receipt note) inside
//! the same transaction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use praxis_core::audit::{
    build_changes, receipt_note, FieldChange, ObservationKind, ProjectSnapshot, RefValue,
    CHANGE_NOTE,
};
use praxis_core::project::{
    calculate_metrics, validate_financials, ContractType, ProjectError, ProjectFinancials,
    ProjectMetrics, ProjectStatus,
};

use crate::entities::{clients, project_observations, projects, users};

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectRepoError {
    /// Project not found.
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    /// Field invariant violations; nothing was persisted.
    #[error("Validation failed: {0:?}")]
    Validation(Vec<ProjectError>),

    /// A stored enum string is not recognized.
    #[error("Stored value is not recognized: {0}")]
    InvalidValue(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating a project.
#[derive(Debug, Clone)]
pub struct ProjectInput {
    /// Billing client.
    pub billing_client_id: Uuid,
    /// Project client.
    pub project_client_id: Uuid,
    /// Project description.
    pub description: String,
    /// Date the consultancy received the project.
    pub received_date: Option<chrono::NaiveDate>,
    /// Planned go-live date.
    pub planned_go_live_date: Option<chrono::NaiveDate>,
    /// Planned cutover window start.
    pub cutover_planned_start: Option<chrono::NaiveDate>,
    /// Planned cutover window end.
    pub cutover_planned_end: Option<chrono::NaiveDate>,
    /// Contract classification.
    pub contract_type: ContractType,
    /// Delivery status.
    pub status: ProjectStatus,
    /// Total contracted value.
    pub total_value: rust_decimal::Decimal,
    /// Hourly rate.
    pub hourly_rate: rust_decimal::Decimal,
    /// Contracted hours.
    pub contracted_hours: rust_decimal::Decimal,
    /// Contingency percent.
    pub contingency_percent: rust_decimal::Decimal,
    /// Internal manager.
    pub internal_manager_id: Option<Uuid>,
    /// External manager.
    pub external_manager_id: Option<Uuid>,
    /// Client-side user.
    pub client_user_id: Option<Uuid>,
}

impl ProjectInput {
    fn financials(&self) -> ProjectFinancials {
        ProjectFinancials {
            contract_type: self.contract_type,
            total_value: self.total_value,
            hourly_rate: self.hourly_rate,
            contracted_hours: self.contracted_hours,
            contingency_percent: self.contingency_percent,
            cutover_planned_start: self.cutover_planned_start,
            cutover_planned_end: self.cutover_planned_end,
        }
    }
}

/// Repository for projects and their observations.
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn derive(input: &ProjectInput) -> Result<ProjectMetrics, ProjectRepoError> {
        let financials = input.financials();
        validate_financials(&financials).map_err(ProjectRepoError::Validation)?;
        Ok(calculate_metrics(&financials))
    }

    /// Creates a project; derived fields come from the metrics
    /// calculator and the receipt observation is appended when a
    /// received date is present.
    pub async fn create(
        &self,
        input: ProjectInput,
        created_by: Option<Uuid>,
    ) -> Result<projects::Model, ProjectRepoError> {
        let metrics = Self::derive(&input)?;

        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let project = projects::ActiveModel {
            id: Set(Uuid::now_v7()),
            billing_client_id: Set(input.billing_client_id),
            project_client_id: Set(input.project_client_id),
            description: Set(input.description.clone()),
            received_date: Set(input.received_date),
            planned_go_live_date: Set(input.planned_go_live_date),
            cutover_planned_start: Set(input.cutover_planned_start),
            cutover_planned_end: Set(input.cutover_planned_end),
            contract_type: Set(input.contract_type.as_str().to_string()),
            status: Set(input.status.as_str().to_string()),
            total_value: Set(metrics.total_value),
            hourly_rate: Set(input.hourly_rate),
            contracted_hours: Set(metrics.contracted_hours),
            contingency_percent: Set(input.contingency_percent),
            available_hours: Set(metrics.available_hours),
            available_value: Set(metrics.available_value),
            internal_manager_id: Set(input.internal_manager_id),
            external_manager_id: Set(input.external_manager_id),
            client_user_id: Set(input.client_user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = project.insert(&txn).await?;

        if let Some(note) = receipt_note(model.received_date, None) {
            insert_observation(&txn, model.id, ObservationKind::Auto, note, None, created_by)
                .await?;
        }
        txn.commit().await?;
        Ok(model)
    }

    /// Updates a project, re-deriving the metrics and appending the
    /// change-diff / receipt observations in the same transaction.
    pub async fn update(
        &self,
        project_id: Uuid,
        input: ProjectInput,
        updated_by: Option<Uuid>,
    ) -> Result<projects::Model, ProjectRepoError> {
        let existing = self.get(project_id).await?;
        let previous_received = existing.received_date;
        let metrics = Self::derive(&input)?;

        let txn = self.db.begin().await?;
        let names = self.display_names(&existing, &input).await?;
        let before = snapshot(&existing, &names)?;

        let mut active: projects::ActiveModel = existing.into();
        active.billing_client_id = Set(input.billing_client_id);
        active.project_client_id = Set(input.project_client_id);
        active.description = Set(input.description.clone());
        active.received_date = Set(input.received_date);
        active.planned_go_live_date = Set(input.planned_go_live_date);
        active.cutover_planned_start = Set(input.cutover_planned_start);
        active.cutover_planned_end = Set(input.cutover_planned_end);
        active.contract_type = Set(input.contract_type.as_str().to_string());
        active.status = Set(input.status.as_str().to_string());
        active.total_value = Set(metrics.total_value);
        active.hourly_rate = Set(input.hourly_rate);
        active.contracted_hours = Set(metrics.contracted_hours);
        active.contingency_percent = Set(input.contingency_percent);
        active.available_hours = Set(metrics.available_hours);
        active.available_value = Set(metrics.available_value);
        active.internal_manager_id = Set(input.internal_manager_id);
        active.external_manager_id = Set(input.external_manager_id);
        active.client_user_id = Set(input.client_user_id);
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&txn).await?;

        let after = snapshot(&model, &names)?;
        let changes = build_changes(&before, &after);
        if !changes.is_empty() {
            insert_observation(
                &txn,
                model.id,
                ObservationKind::Change,
                CHANGE_NOTE.to_string(),
                Some(changes),
                updated_by,
            )
            .await?;
        }
        if let Some(note) = receipt_note(model.received_date, previous_received) {
            insert_observation(&txn, model.id, ObservationKind::Auto, note, None, updated_by)
                .await?;
        }
        txn.commit().await?;
        Ok(model)
    }

    /// Appends a manual observation.
    pub async fn add_manual_observation(
        &self,
        project_id: Uuid,
        note: String,
        created_by: Option<Uuid>,
    ) -> Result<(), ProjectRepoError> {
        self.get(project_id).await?;
        insert_observation(
            &self.db,
            project_id,
            ObservationKind::Manual,
            note,
            None,
            created_by,
        )
        .await?;
        Ok(())
    }

    /// The project's observations, newest first. Append-only: there is
    /// no update or delete surface.
    pub async fn observations(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<project_observations::Model>, ProjectRepoError> {
        Ok(project_observations::Entity::find()
            .filter(project_observations::Column::ProjectId.eq(project_id))
            .order_by_desc(project_observations::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Fetches a project by id.
    pub async fn get(&self, project_id: Uuid) -> Result<projects::Model, ProjectRepoError> {
        projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ProjectRepoError::NotFound(project_id))
    }

    /// Display names for every entity referenced by the old and new
    /// state, fetched once and shared by both snapshots.
    async fn display_names(
        &self,
        existing: &projects::Model,
        input: &ProjectInput,
    ) -> Result<HashMap<Uuid, String>, ProjectRepoError> {
        let client_ids: Vec<Uuid> = [
            existing.billing_client_id,
            existing.project_client_id,
            input.billing_client_id,
            input.project_client_id,
        ]
        .into();
        let user_ids: Vec<Uuid> = [
            existing.internal_manager_id,
            existing.external_manager_id,
            existing.client_user_id,
            input.internal_manager_id,
            input.external_manager_id,
            input.client_user_id,
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut names = HashMap::new();
        for client in clients::Entity::find()
            .filter(clients::Column::Id.is_in(client_ids))
            .all(&self.db)
            .await?
        {
            names.insert(client.id, client.name);
        }
        for user in users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await?
        {
            names.insert(user.id, user.full_name);
        }
        Ok(names)
    }
}

fn reference(id: Uuid, names: &HashMap<Uuid, String>) -> RefValue {
    RefValue {
        id,
        display: names.get(&id).cloned().unwrap_or_else(|| "-".to_string()),
    }
}

fn snapshot(
    model: &projects::Model,
    names: &HashMap<Uuid, String>,
) -> Result<ProjectSnapshot, ProjectRepoError> {
    Ok(ProjectSnapshot {
        billing_client: Some(reference(model.billing_client_id, names)),
        project_client: Some(reference(model.project_client_id, names)),
        description: model.description.clone(),
        received_date: model.received_date,
        planned_go_live_date: model.planned_go_live_date,
        contract_type: ContractType::parse(&model.contract_type)
            .ok_or_else(|| ProjectRepoError::InvalidValue(model.contract_type.clone()))?,
        status: ProjectStatus::parse(&model.status)
            .ok_or_else(|| ProjectRepoError::InvalidValue(model.status.clone()))?,
        total_value: model.total_value,
        hourly_rate: model.hourly_rate,
        contingency_percent: model.contingency_percent,
        internal_manager: model.internal_manager_id.map(|id| reference(id, names)),
        external_manager: model.external_manager_id.map(|id| reference(id, names)),
        client_user: model.client_user_id.map(|id| reference(id, names)),
    })
}

async fn insert_observation<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
    kind: ObservationKind,
    note: String,
    changes: Option<Vec<FieldChange>>,
    created_by: Option<Uuid>,
) -> Result<(), DbErr> {
    let changes = changes
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| DbErr::Custom(e.to_string()))?;
    let observation = project_observations::ActiveModel {
        id: Set(Uuid::now_v7()),
        project_id: Set(project_id),
        observation_type: Set(kind.as_str().to_string()),
        note: Set(note),
        changes: Set(changes),
        created_by: Set(created_by),
        created_at: Set(Utc::now().into()),
    };
    observation.insert(conn).await?;
    Ok(())
}
