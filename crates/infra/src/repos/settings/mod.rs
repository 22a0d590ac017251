mod inmemory;
mod postgres;

pub use inmemory::InMemorySettingsRepo;
pub use postgres::PostgresSettingsRepo;
use reorder_reminder_domain::GlobalSettings;

/// Key under which the `GlobalSettings` are kept in the settings store
const GLOBAL_SETTINGS_KEY: &str = "global";

#[async_trait::async_trait]
pub trait ISettingsRepo: Send + Sync {
    /// The stored settings, or the defaults when nothing was saved yet
    async fn get(&self) -> anyhow::Result<GlobalSettings>;
    async fn save(&self, settings: &GlobalSettings) -> anyhow::Result<()>;
}
