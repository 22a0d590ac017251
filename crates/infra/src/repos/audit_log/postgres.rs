use super::{AuditLogQuery, IAuditLogRepo};
use reorder_reminder_domain::{AuditLogEntry, ReminderStatus, SortOrder, ID};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresAuditLogRepo {
    pool: PgPool,
}

impl PostgresAuditLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRaw {
    log_id: i64,
    order_id: i64,
    product_id: i64,
    email: String,
    status: String,
    recorded_at: i64,
}

impl TryFrom<AuditLogRaw> for AuditLogEntry {
    type Error = anyhow::Error;

    fn try_from(e: AuditLogRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.log_id,
            order_id: e.order_id.into(),
            product_id: e.product_id.into(),
            email: e.email,
            status: e.status.parse::<ReminderStatus>()?,
            recorded_at: e.recorded_at,
        })
    }
}

fn into_entries(raws: Vec<AuditLogRaw>) -> anyhow::Result<Vec<AuditLogEntry>> {
    raws.into_iter().map(AuditLogEntry::try_from).collect()
}

#[async_trait::async_trait]
impl IAuditLogRepo for PostgresAuditLogRepo {
    async fn insert(&self, entry: &AuditLogEntry) -> anyhow::Result<i64> {
        let log_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reminder_logs(order_id, product_id, email, status, recorded_at)
            VALUES($1, $2, $3, $4, $5)
            RETURNING log_id
            "#,
        )
        .bind(entry.order_id.inner())
        .bind(entry.product_id.inner())
        .bind(&entry.email)
        .bind(entry.status.as_str())
        .bind(entry.recorded_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder log: {:?}. DB returned error: {:?}",
                entry, e
            );
            e
        })?;
        Ok(log_id)
    }

    async fn find(&self, log_id: i64) -> Option<AuditLogEntry> {
        let res: Result<Option<AuditLogRaw>, _> =
            sqlx::query_as("SELECT * FROM reminder_logs WHERE log_id = $1")
                .bind(log_id)
                .fetch_optional(&self.pool)
                .await;
        match res {
            Ok(raw) => raw.and_then(|raw| AuditLogEntry::try_from(raw).ok()),
            Err(e) => {
                error!(
                    "Find reminder log with id: {} failed. DB returned error: {:?}",
                    log_id, e
                );
                None
            }
        }
    }

    async fn find_many(&self, query: &AuditLogQuery) -> anyhow::Result<Vec<AuditLogEntry>> {
        let direction = match query.sort {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        let raws: Vec<AuditLogRaw> = sqlx::query_as(&format!(
            r#"
            SELECT * FROM reminder_logs
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY recorded_at {0}, log_id {0}
            LIMIT $2 OFFSET $3
            "#,
            direction
        ))
        .bind(query.status.map(|s| s.as_str()))
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminder logs with query: {:?} failed. DB returned error: {:?}",
                query, e
            );
            e
        })?;
        into_entries(raws)
    }

    async fn count(&self, status: Option<ReminderStatus>) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reminder_logs WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn find_by_order(&self, order_id: &ID) -> anyhow::Result<Vec<AuditLogEntry>> {
        let raws: Vec<AuditLogRaw> =
            sqlx::query_as("SELECT * FROM reminder_logs WHERE order_id = $1 ORDER BY log_id")
                .bind(order_id.inner())
                .fetch_all(&self.pool)
                .await?;
        into_entries(raws)
    }

    async fn update_status(&self, log_id: i64, status: ReminderStatus) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE reminder_logs SET status = $2 WHERE log_id = $1")
            .bind(log_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Unable to update status of reminder log: {}. DB returned error: {:?}",
                    log_id, e
                );
                e
            })?;
        Ok(res.rows_affected() == 1)
    }
}
