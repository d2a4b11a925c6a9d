use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;
use tracing::debug;
use worklog_core::db::DatabasePool;
use worklog_core::errors::Result;

use crate::model::WorkItem;

/// Storage operations the HTTP handlers depend on.
#[async_trait]
pub trait WorkItemStore: Send + Sync {
    /// Every work item, ascending by `work_datetime`.
    async fn list_all(&self) -> Result<Vec<WorkItem>>;

    /// The item with the given id, or [`WorkItem::default`] when none matches.
    async fn get_by_id(&self, id: i32) -> Result<WorkItem>;

    /// Stores a new item. `work_datetime` is handed to the database as text.
    async fn insert(&self, user_id: i32, work_datetime: &str, time_type: &str) -> Result<()>;

    /// Rewrites the datetime and type of an item. Unknown ids are a no-op.
    async fn update(&self, id: i32, work_datetime: &str, time_type: &str) -> Result<()>;
}

/// Postgres-backed repository over the `workitems` table.
#[derive(Clone)]
pub struct PgWorkItemRepository {
    pool: DatabasePool,
}

impl PgWorkItemRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkItemStore for PgWorkItemRepository {
    async fn list_all(&self) -> Result<Vec<WorkItem>> {
        let rows = sqlx::query_as::<_, WorkItemRow>(
            r#"
            SELECT id, userid, workdatetime, timetype
            FROM workitems
            ORDER BY workdatetime ASC
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<WorkItem> {
        let row = sqlx::query_as::<_, WorkItemRow>(
            r#"
            SELECT id, userid, workdatetime, timetype
            FROM workitems
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Into::into).unwrap_or_default())
    }

    async fn insert(&self, user_id: i32, work_datetime: &str, time_type: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO workitems (userid, workdatetime, timetype)
            VALUES ($1, $2::timestamp, $3)
            "#,
        )
        .bind(user_id)
        .bind(work_datetime)
        .bind(time_type)
        .execute(self.pool.inner())
        .await?;

        debug!(user_id, work_datetime, time_type, "inserted work item");
        Ok(())
    }

    async fn update(&self, id: i32, work_datetime: &str, time_type: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE workitems
            SET workdatetime = $1::timestamp, timetype = $2
            WHERE id = $3
            "#,
        )
        .bind(work_datetime)
        .bind(time_type)
        .bind(id)
        .execute(self.pool.inner())
        .await?;

        debug!(id, rows = result.rows_affected(), "updated work item");
        Ok(())
    }
}

#[derive(FromRow)]
struct WorkItemRow {
    id: i32,
    userid: i32,
    workdatetime: NaiveDateTime,
    timetype: String,
}

impl From<WorkItemRow> for WorkItem {
    fn from(row: WorkItemRow) -> Self {
        WorkItem {
            id: row.id,
            user_id: row.userid,
            work_datetime: row.workdatetime,
            time_type: row.timetype,
        }
    }
}
