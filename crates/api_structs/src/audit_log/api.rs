use crate::dtos::AuditLogEntryDTO;
use reorder_reminder_domain::{AuditLogEntry, ReminderStatus, SortOrder};
use serde::{Deserialize, Serialize};

pub mod get_logs {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub status: Option<ReminderStatus>,
        #[serde(default)]
        pub limit: Option<i64>,
        #[serde(default)]
        pub offset: Option<i64>,
        #[serde(default)]
        pub order: Option<SortOrder>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub logs: Vec<AuditLogEntryDTO>,
        pub total: i64,
    }

    impl APIResponse {
        pub fn new(logs: Vec<AuditLogEntry>, total: i64) -> Self {
            Self {
                logs: logs.into_iter().map(AuditLogEntryDTO::new).collect(),
                total,
            }
        }
    }
}

pub mod update_log_status {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub log_id: i64,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub status: ReminderStatus,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub log: AuditLogEntryDTO,
    }

    impl APIResponse {
        pub fn new(log: AuditLogEntry) -> Self {
            Self {
                log: AuditLogEntryDTO::new(log),
            }
        }
    }
}
