use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Sent,
    Failed,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

#[derive(Error, Debug)]
#[error("Unknown reminder status: {0}")]
pub struct InvalidReminderStatusError(String);

impl FromStr for ReminderStatus {
    type Err = InvalidReminderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            _ => Err(InvalidReminderStatusError(s.to_string())),
        }
    }
}

/// Ordering of audit log entries by the time they were recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Desc
    }
}

/// One row of the append-only log of reminder delivery attempts
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    /// Assigned by the log store on insert
    pub id: i64,
    pub order_id: ID,
    pub product_id: ID,
    pub email: String,
    pub status: ReminderStatus,
    pub recorded_at: i64,
}

impl AuditLogEntry {
    pub fn new(
        order_id: ID,
        product_id: ID,
        email: &str,
        status: ReminderStatus,
        recorded_at: i64,
    ) -> Self {
        Self {
            id: 0,
            order_id,
            product_id,
            email: email.to_string(),
            status,
            recorded_at,
        }
    }
}
