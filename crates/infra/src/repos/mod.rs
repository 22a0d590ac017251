mod audit_log;
mod opt_out;
mod order;
mod product;
mod reminder;
mod settings;
mod shared;

use audit_log::{IAuditLogRepo, InMemoryAuditLogRepo, PostgresAuditLogRepo};
use opt_out::{IOptOutRepo, InMemoryOptOutRepo, PostgresOptOutRepo};
use order::{IOrderRepo, InMemoryOrderRepo, PostgresOrderRepo};
use product::{IProductRepo, InMemoryProductRepo, PostgresProductRepo};
use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
use settings::{ISettingsRepo, InMemorySettingsRepo, PostgresSettingsRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use audit_log::AuditLogQuery;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub orders: Arc<dyn IOrderRepo>,
    pub products: Arc<dyn IProductRepo>,
    pub settings: Arc<dyn ISettingsRepo>,
    pub opt_outs: Arc<dyn IOptOutRepo>,
    pub audit_logs: Arc<dyn IAuditLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            orders: Arc::new(PostgresOrderRepo::new(pool.clone())),
            products: Arc::new(PostgresProductRepo::new(pool.clone())),
            settings: Arc::new(PostgresSettingsRepo::new(pool.clone())),
            opt_outs: Arc::new(PostgresOptOutRepo::new(pool.clone())),
            audit_logs: Arc::new(PostgresAuditLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            orders: Arc::new(InMemoryOrderRepo::new()),
            products: Arc::new(InMemoryProductRepo::new()),
            settings: Arc::new(InMemorySettingsRepo::new()),
            opt_outs: Arc::new(InMemoryOptOutRepo::new()),
            audit_logs: Arc::new(InMemoryAuditLogRepo::new()),
        }
    }
}
