use super::IReminderRepo;
use reorder_reminder_domain::{validate_delay_days, ReminderRecord, ID};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    order_id: i64,
    product_id: i64,
    email: String,
    completed_at: i64,
    customer_delay_days: Option<i64>,
    sent: bool,
    sent_at: Option<i64>,
}

impl From<ReminderRaw> for ReminderRecord {
    fn from(e: ReminderRaw) -> Self {
        Self {
            order_id: e.order_id.into(),
            product_id: e.product_id.into(),
            email: e.email,
            completed_at: e.completed_at,
            customer_delay_days: e.customer_delay_days,
            sent: e.sent,
            sent_at: e.sent_at,
        }
    }
}

const SELECT_REMINDERS: &str = r#"
    SELECT r.order_id, r.product_id, r.email, r.completed_at,
        p.delay_days AS customer_delay_days, r.sent, r.sent_at
    FROM reminder_records AS r
    LEFT JOIN order_reminder_preferences AS p
    ON p.order_id = r.order_id
"#;

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn record_pending(&self, record: &ReminderRecord) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO reminder_records(order_id, product_id, email, completed_at)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (order_id, product_id) DO NOTHING
            "#,
        )
        .bind(record.order_id.inner())
        .bind(record.product_id.inner())
        .bind(&record.email)
        .bind(record.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder record: {:?}. DB returned error: {:?}",
                record, e
            );
            e
        })?;
        Ok(res.rows_affected() == 1)
    }

    async fn find(&self, order_id: &ID, product_id: &ID) -> anyhow::Result<Option<ReminderRecord>> {
        let raw: Option<ReminderRaw> = sqlx::query_as(&format!(
            "{} WHERE r.order_id = $1 AND r.product_id = $2",
            SELECT_REMINDERS
        ))
        .bind(order_id.inner())
        .bind(product_id.inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminder record for order: {} and product: {} failed. DB returned error: {:?}",
                order_id, product_id, e
            );
            e
        })?;
        Ok(raw.map(|r| r.into()))
    }

    async fn find_by_order(&self, order_id: &ID) -> anyhow::Result<Vec<ReminderRecord>> {
        let raws: Vec<ReminderRaw> = sqlx::query_as(&format!(
            "{} WHERE r.order_id = $1 ORDER BY r.product_id",
            SELECT_REMINDERS
        ))
        .bind(order_id.inner())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminder records for order: {} failed. DB returned error: {:?}",
                order_id, e
            );
            e
        })?;
        Ok(raws.into_iter().map(|r| r.into()).collect())
    }

    async fn is_sent(&self, order_id: &ID, product_id: &ID) -> anyhow::Result<bool> {
        let sent: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT sent FROM reminder_records
            WHERE order_id = $1 AND product_id = $2
            "#,
        )
        .bind(order_id.inner())
        .bind(product_id.inner())
        .fetch_optional(&self.pool)
        .await?;
        Ok(sent.unwrap_or(false))
    }

    async fn find_pending_order_ids(&self, cutoff: i64) -> anyhow::Result<Vec<ID>> {
        let order_ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT order_id FROM reminder_records
            WHERE sent = false AND completed_at <= $1
            GROUP BY order_id
            ORDER BY MIN(completed_at), order_id
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find orders with pending reminders before: {} failed. DB returned error: {:?}",
                cutoff, e
            );
            e
        })?;
        Ok(order_ids.into_iter().map(ID::from).collect())
    }

    async fn set_customer_delay(&self, order_id: &ID, delay_days: i64) -> anyhow::Result<()> {
        let delay_days = validate_delay_days(delay_days)?;
        sqlx::query(
            r#"
            INSERT INTO order_reminder_preferences(order_id, delay_days)
            VALUES($1, $2)
            ON CONFLICT (order_id) DO UPDATE
            SET delay_days = EXCLUDED.delay_days
            "#,
        )
        .bind(order_id.inner())
        .bind(delay_days)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save reminder delay for order: {}. DB returned error: {:?}",
                order_id, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_customer_delay(&self, order_id: &ID) -> anyhow::Result<Option<i64>> {
        let delay_days = sqlx::query_scalar(
            r#"
            SELECT delay_days FROM order_reminder_preferences
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.inner())
        .fetch_optional(&self.pool)
        .await?;
        Ok(delay_days)
    }

    async fn min_customer_delay(&self) -> anyhow::Result<Option<i64>> {
        let min: Option<i64> =
            sqlx::query_scalar("SELECT MIN(delay_days) FROM order_reminder_preferences")
                .fetch_one(&self.pool)
                .await?;
        Ok(min)
    }

    async fn try_claim(
        &self,
        order_id: &ID,
        product_id: &ID,
        now: i64,
        lease_millis: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_records
            SET claimed_until = $3 + $4
            WHERE order_id = $1 AND product_id = $2
            AND sent = false
            AND (claimed_until IS NULL OR claimed_until <= $3)
            "#,
        )
        .bind(order_id.inner())
        .bind(product_id.inner())
        .bind(now)
        .bind(lease_millis)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to claim reminder for order: {} and product: {}. DB returned error: {:?}",
                order_id, product_id, e
            );
            e
        })?;
        Ok(res.rows_affected() == 1)
    }

    async fn release_claim(&self, order_id: &ID, product_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_records
            SET claimed_until = NULL
            WHERE order_id = $1 AND product_id = $2 AND sent = false
            "#,
        )
        .bind(order_id.inner())
        .bind(product_id.inner())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_sent(&self, order_id: &ID, product_id: &ID, at: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_records
            SET sent = true, sent_at = $3, claimed_until = NULL
            WHERE order_id = $1 AND product_id = $2 AND sent = false
            "#,
        )
        .bind(order_id.inner())
        .bind(product_id.inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to mark reminder for order: {} and product: {} as sent. DB returned error: {:?}",
                order_id, product_id, e
            );
            e
        })?;
        Ok(res.rows_affected() == 1)
    }
}
