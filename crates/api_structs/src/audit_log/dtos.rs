use reorder_reminder_domain::{AuditLogEntry, ReminderStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntryDTO {
    pub id: i64,
    pub order_id: ID,
    pub product_id: ID,
    pub email: String,
    pub status: ReminderStatus,
    pub recorded_at: i64,
}

impl AuditLogEntryDTO {
    pub fn new(entry: AuditLogEntry) -> Self {
        Self {
            id: entry.id,
            order_id: entry.order_id,
            product_id: entry.product_id,
            email: entry.email,
            status: entry.status,
            recorded_at: entry.recorded_at,
        }
    }
}
