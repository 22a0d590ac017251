use super::{ISettingsRepo, GLOBAL_SETTINGS_KEY};
use reorder_reminder_domain::GlobalSettings;
use sqlx::{types::Json, PgPool};
use tracing::error;

pub struct PostgresSettingsRepo {
    pool: PgPool,
}

impl PostgresSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ISettingsRepo for PostgresSettingsRepo {
    async fn get(&self) -> anyhow::Result<GlobalSettings> {
        let value: Option<Json<GlobalSettings>> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
                .bind(GLOBAL_SETTINGS_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    error!("Unable to read global settings. DB returned error: {:?}", e);
                    e
                })?;
        Ok(value.map(|v| v.0).unwrap_or_default())
    }

    async fn save(&self, settings: &GlobalSettings) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings(key, value)
            VALUES($1, $2)
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value
            "#,
        )
        .bind(GLOBAL_SETTINGS_KEY)
        .bind(Json(settings))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save global settings: {:?}. DB returned error: {:?}",
                settings, e
            );
            e
        })?;
        Ok(())
    }
}
