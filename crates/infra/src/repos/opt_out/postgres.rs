use super::IOptOutRepo;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresOptOutRepo {
    pool: PgPool,
}

impl PostgresOptOutRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IOptOutRepo for PostgresOptOutRepo {
    async fn is_opted_out(&self, email: &str) -> anyhow::Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM opt_outs WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    error!(
                        "Opt out lookup for: {} failed. DB returned error: {:?}",
                        email, e
                    );
                    e
                })?;
        Ok(exists)
    }

    async fn opt_out(&self, email: &str, at: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO opt_outs(email, opted_out_at)
            VALUES($1, $2)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to opt out: {}. DB returned error: {:?}",
                email, e
            );
            e
        })?;
        Ok(res.rows_affected() == 1)
    }
}
