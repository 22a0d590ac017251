mod config;
mod repos;
mod services;
mod system;

pub use config::{parse_day_options, Config};
use reorder_reminder_domain::NonceIssuer;
pub use repos::{AuditLogQuery, Repos};
pub use services::*;
use std::{sync::Arc, time::Duration};
pub use system::{ISys, RealSys, StaticSys};
use tracing::info;

#[derive(Clone)]
pub struct ReorderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IReminderMailer>,
    pub nonces: NonceIssuer,
    /// Held by the running sweep so sweeps in this process never overlap
    pub sweep_lock: Arc<tokio::sync::Mutex<()>>,
}

impl ReorderContext {
    fn create(repos: Repos, config: Config, mailer: Arc<dyn IReminderMailer>) -> Self {
        let nonces = NonceIssuer::new(&config.nonce_secret);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer,
            nonces,
            sweep_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn create_inmemory() -> Self {
        Self::create(Repos::create_inmemory(), Config::new(), Arc::new(LogMailer {}))
    }
}

fn create_mailer(config: &Config) -> anyhow::Result<Arc<dyn IReminderMailer>> {
    let mailer: Arc<dyn IReminderMailer> = match &config.reminder_webhook_url {
        Some(url) => {
            info!("Reminders will be delivered to webhook: {}", url);
            let timeout = Duration::from_millis(config.delivery_timeout_millis as u64);
            Arc::new(WebhookMailer::new(
                url.clone(),
                config.reminder_webhook_key.clone(),
                timeout,
            )?)
        }
        None => {
            info!("No REMINDER_WEBHOOK_URL given, reminders will only be logged");
            Arc::new(LogMailer {})
        }
    };
    Ok(mailer)
}

/// Will setup the infrastructure context given the environment.
/// Postgres is used when `DATABASE_URL` is set, otherwise everything is kept in memory.
pub async fn setup_context() -> anyhow::Result<ReorderContext> {
    let config = Config::new();
    let repos = match std::env::var("DATABASE_URL") {
        Ok(connection_string) => Repos::create_postgres(&connection_string).await?,
        Err(_) => {
            info!("No DATABASE_URL given, going to use inmemory repositories");
            Repos::create_inmemory()
        }
    };
    let mailer = create_mailer(&config)?;
    Ok(ReorderContext::create(repos, config, mailer))
}
