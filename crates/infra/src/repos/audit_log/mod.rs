mod inmemory;
mod postgres;

pub use inmemory::InMemoryAuditLogRepo;
pub use postgres::PostgresAuditLogRepo;
use reorder_reminder_domain::{AuditLogEntry, ReminderStatus, SortOrder, ID};

#[derive(Debug, Clone)]
pub struct AuditLogQuery {
    pub status: Option<ReminderStatus>,
    pub limit: i64,
    pub offset: i64,
    pub sort: SortOrder,
}

#[async_trait::async_trait]
pub trait IAuditLogRepo: Send + Sync {
    /// Appends the entry and returns the id it was stored with
    async fn insert(&self, entry: &AuditLogEntry) -> anyhow::Result<i64>;
    async fn find(&self, log_id: i64) -> Option<AuditLogEntry>;
    async fn find_many(&self, query: &AuditLogQuery) -> anyhow::Result<Vec<AuditLogEntry>>;
    async fn count(&self, status: Option<ReminderStatus>) -> anyhow::Result<i64>;
    async fn find_by_order(&self, order_id: &ID) -> anyhow::Result<Vec<AuditLogEntry>>;
    /// Returns false when there is no entry with the given id
    async fn update_status(&self, log_id: i64, status: ReminderStatus) -> anyhow::Result<bool>;
}
