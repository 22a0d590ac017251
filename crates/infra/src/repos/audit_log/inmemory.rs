use super::{AuditLogQuery, IAuditLogRepo};
use crate::repos::shared::inmemory_repo::*;
use reorder_reminder_domain::{AuditLogEntry, ReminderStatus, SortOrder, ID};
use std::sync::Mutex;

pub struct InMemoryAuditLogRepo {
    entries: Mutex<Vec<AuditLogEntry>>,
}

impl InMemoryAuditLogRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAuditLogRepo for InMemoryAuditLogRepo {
    async fn insert(&self, entry: &AuditLogEntry) -> anyhow::Result<i64> {
        let mut entries = self.entries.lock().unwrap();
        let id = entries.len() as i64 + 1;
        let mut entry = entry.clone();
        entry.id = id;
        entries.push(entry);
        Ok(id)
    }

    async fn find(&self, log_id: i64) -> Option<AuditLogEntry> {
        find_by(&self.entries, |e| e.id == log_id).pop()
    }

    async fn find_many(&self, query: &AuditLogQuery) -> anyhow::Result<Vec<AuditLogEntry>> {
        let mut entries = find_by(&self.entries, |e| {
            query.status.map(|status| e.status == status).unwrap_or(true)
        });
        entries.sort_by_key(|e| (e.recorded_at, e.id));
        if query.sort == SortOrder::Desc {
            entries.reverse();
        }
        Ok(entries
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, status: Option<ReminderStatus>) -> anyhow::Result<i64> {
        let entries = find_by(&self.entries, |e| {
            status.map(|status| e.status == status).unwrap_or(true)
        });
        Ok(entries.len() as i64)
    }

    async fn find_by_order(&self, order_id: &ID) -> anyhow::Result<Vec<AuditLogEntry>> {
        Ok(find_by(&self.entries, |e| e.order_id == *order_id))
    }

    async fn update_status(&self, log_id: i64, status: ReminderStatus) -> anyhow::Result<bool> {
        let updated = update_many(&self.entries, |e| e.id == log_id, |e| e.status = status);
        Ok(updated == 1)
    }
}
