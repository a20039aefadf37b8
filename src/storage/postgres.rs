//! Postgres store.
//!
//! Runtime-bound sqlx queries over a schema with no foreign keys between the
//! three tables; cross-record consistency is owned by the `care` layer, and
//! the analysis-then-tasks dual write runs as two independent statements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, QueryBuilder};
use std::time::Duration;
use uuid::Uuid;

use super::{CareStore, StoreError, TaskScope};
use crate::models::{
    AnalysisRecord, CareTask, NewAnalysisRecord, NewCareTask, NewTrackedPlant, TrackedPlant,
};

const TASK_COLUMNS: &str = "record_id, task_id, user_id, plant_id, plant_type_id, analysis_id, \
     description, priority, category, due_date, created_date, status, completed_date, comment, \
     updated_date";

/// Postgres-backed [`CareStore`].
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect a dedicated pool and return the store.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))
    }
}

#[derive(sqlx::FromRow)]
struct PlantRow {
    plant_id: String,
    user_id: String,
    plant_type_id: String,
    nickname: String,
    health_status: String,
    created_date: DateTime<Utc>,
}

impl From<PlantRow> for TrackedPlant {
    fn from(row: PlantRow) -> Self {
        Self {
            plant_id: row.plant_id,
            user_id: row.user_id,
            plant_type_id: row.plant_type_id,
            nickname: row.nickname,
            health_status: row.health_status,
            created_date: row.created_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnalysisRow {
    analysis_id: String,
    user_id: String,
    plant_id: String,
    plant_type_id: String,
    analysis_date: DateTime<Utc>,
    current_stage: serde_json::Value,
    care_instructions: serde_json::Value,
    next_checkup_date: DateTime<Utc>,
    action_item_ids: Vec<String>,
}

impl From<AnalysisRow> for AnalysisRecord {
    fn from(row: AnalysisRow) -> Self {
        Self {
            analysis_id: row.analysis_id,
            user_id: row.user_id,
            plant_id: row.plant_id,
            plant_type_id: row.plant_type_id,
            analysis_date: row.analysis_date,
            current_stage: row.current_stage,
            care_instructions: row.care_instructions,
            next_checkup_date: row.next_checkup_date,
            action_item_ids: row.action_item_ids,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    record_id: String,
    task_id: String,
    user_id: String,
    plant_id: String,
    plant_type_id: String,
    analysis_id: Option<String>,
    description: String,
    priority: String,
    category: String,
    due_date: DateTime<Utc>,
    created_date: DateTime<Utc>,
    status: String,
    completed_date: Option<DateTime<Utc>>,
    comment: Option<String>,
    updated_date: Option<DateTime<Utc>>,
}

impl From<TaskRow> for CareTask {
    fn from(row: TaskRow) -> Self {
        Self {
            record_id: row.record_id,
            task_id: row.task_id,
            user_id: row.user_id,
            plant_id: row.plant_id,
            plant_type_id: row.plant_type_id,
            analysis_id: row.analysis_id,
            description: row.description,
            priority: row.priority.into(),
            category: row.category.into(),
            due_date: row.due_date,
            created_date: row.created_date,
            status: row.status.into(),
            completed_date: row.completed_date,
            comment: row.comment,
            updated_date: row.updated_date,
        }
    }
}

#[async_trait]
impl CareStore for PostgresStore {
    async fn insert_plant(
        &self,
        user_id: &str,
        new_plant: NewTrackedPlant,
    ) -> Result<TrackedPlant, StoreError> {
        let plant = TrackedPlant {
            plant_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            plant_type_id: new_plant.plant_type_id.clone(),
            nickname: new_plant.nickname.clone(),
            health_status: new_plant.health_status_or_default(),
            created_date: Utc::now(),
        };
        sqlx::query(
            "INSERT INTO tracked_plants \
             (plant_id, user_id, plant_type_id, nickname, health_status, created_date) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&plant.plant_id)
        .bind(&plant.user_id)
        .bind(&plant.plant_type_id)
        .bind(&plant.nickname)
        .bind(&plant.health_status)
        .bind(plant.created_date)
        .execute(&self.pool)
        .await?;
        Ok(plant)
    }

    async fn get_plant(&self, plant_id: &str) -> Result<Option<TrackedPlant>, StoreError> {
        let row: Option<PlantRow> = sqlx::query_as(
            "SELECT plant_id, user_id, plant_type_id, nickname, health_status, created_date \
             FROM tracked_plants WHERE plant_id = $1",
        )
        .bind(plant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_plants(&self, user_id: &str) -> Result<Vec<TrackedPlant>, StoreError> {
        let rows: Vec<PlantRow> = sqlx::query_as(
            "SELECT plant_id, user_id, plant_type_id, nickname, health_status, created_date \
             FROM tracked_plants WHERE user_id = $1 ORDER BY inserted_seq",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_analysis(
        &self,
        record: NewAnalysisRecord,
    ) -> Result<AnalysisRecord, StoreError> {
        let record = record.into_record(Uuid::new_v4().to_string());
        sqlx::query(
            "INSERT INTO analysis_records \
             (analysis_id, user_id, plant_id, plant_type_id, analysis_date, current_stage, \
              care_instructions, next_checkup_date, action_item_ids) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&record.analysis_id)
        .bind(&record.user_id)
        .bind(&record.plant_id)
        .bind(&record.plant_type_id)
        .bind(record.analysis_date)
        .bind(&record.current_stage)
        .bind(&record.care_instructions)
        .bind(record.next_checkup_date)
        .bind(&record.action_item_ids)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn get_analysis(
        &self,
        analysis_id: &str,
        user_id: &str,
    ) -> Result<Option<AnalysisRecord>, StoreError> {
        let row: Option<AnalysisRow> = sqlx::query_as(
            "SELECT analysis_id, user_id, plant_id, plant_type_id, analysis_date, current_stage, \
             care_instructions, next_checkup_date, action_item_ids \
             FROM analysis_records WHERE analysis_id = $1 AND user_id = $2",
        )
        .bind(analysis_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_analyses_for_plant(
        &self,
        plant_id: &str,
        user_id: &str,
    ) -> Result<Vec<AnalysisRecord>, StoreError> {
        let rows: Vec<AnalysisRow> = sqlx::query_as(
            "SELECT analysis_id, user_id, plant_id, plant_type_id, analysis_date, current_stage, \
             care_instructions, next_checkup_date, action_item_ids \
             FROM analysis_records WHERE plant_id = $1 AND user_id = $2 \
             ORDER BY analysis_date DESC, inserted_seq DESC",
        )
        .bind(plant_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_tasks(&self, tasks: Vec<NewCareTask>) -> Result<usize, StoreError> {
        // One statement per record: per-record atomicity only, a failure
        // mid-batch leaves earlier rows in place (accepted, see module docs).
        let count = tasks.len();
        for new_task in tasks {
            let task = new_task.into_task(Uuid::new_v4().to_string());
            sqlx::query(
                "INSERT INTO care_tasks \
                 (record_id, task_id, user_id, plant_id, plant_type_id, analysis_id, description, \
                  priority, category, due_date, created_date, status, completed_date, comment, \
                  updated_date) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
            )
            .bind(&task.record_id)
            .bind(&task.task_id)
            .bind(&task.user_id)
            .bind(&task.plant_id)
            .bind(&task.plant_type_id)
            .bind(&task.analysis_id)
            .bind(&task.description)
            .bind(task.priority.as_str())
            .bind(task.category.as_str())
            .bind(task.due_date)
            .bind(task.created_date)
            .bind(task.status.as_str())
            .bind(task.completed_date)
            .bind(&task.comment)
            .bind(task.updated_date)
            .execute(&self.pool)
            .await?;
        }
        Ok(count)
    }

    async fn find_task(
        &self,
        task_id: &str,
        user_id: &str,
    ) -> Result<Option<CareTask>, StoreError> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM care_tasks WHERE task_id = $1 AND user_id = $2"
        );
        let row: Option<TaskRow> = sqlx::query_as(&query)
            .bind(task_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn update_task(&self, task: &CareTask) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE care_tasks SET status = $2, completed_date = $3, comment = $4, \
             updated_date = $5, description = $6, priority = $7, category = $8, due_date = $9 \
             WHERE task_id = $1",
        )
        .bind(&task.task_id)
        .bind(task.status.as_str())
        .bind(task.completed_date)
        .bind(&task.comment)
        .bind(task.updated_date)
        .bind(&task.description)
        .bind(task.priority.as_str())
        .bind(task.category.as_str())
        .bind(task.due_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_task(&self, task_id: &str, user_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM care_tasks WHERE task_id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_tasks(
        &self,
        user_id: &str,
        scope: &TaskScope,
    ) -> Result<Vec<CareTask>, StoreError> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {TASK_COLUMNS} FROM care_tasks WHERE user_id = "
        ));
        builder.push_bind(user_id);
        if let Some(plant_id) = &scope.plant_id {
            builder.push(" AND plant_id = ").push_bind(plant_id);
        }
        if let Some(analysis_id) = &scope.analysis_id {
            builder.push(" AND analysis_id = ").push_bind(analysis_id);
        }
        if let Some(status) = &scope.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        builder.push(" ORDER BY inserted_seq");

        let rows: Vec<TaskRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
