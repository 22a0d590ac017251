use reorder_reminder_domain::{ReminderRecord, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecordDTO {
    pub order_id: ID,
    pub product_id: ID,
    pub email: String,
    pub completed_at: i64,
    pub customer_delay_days: Option<i64>,
    pub sent: bool,
    pub sent_at: Option<i64>,
}

impl ReminderRecordDTO {
    pub fn new(record: &ReminderRecord) -> Self {
        Self {
            order_id: record.order_id,
            product_id: record.product_id,
            email: record.email.clone(),
            completed_at: record.completed_at,
            customer_delay_days: record.customer_delay_days,
            sent: record.sent,
            sent_at: record.sent_at,
        }
    }
}

/// Outcome of one reminder sweep
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SweepReportDTO {
    /// Completed orders with unsent reminders that passed the cutoff pre-filter
    pub orders_scanned: usize,
    /// Orders skipped because the billing email opted out
    pub orders_opted_out: usize,
    pub sent: usize,
    pub failed: usize,
}
