use crate::{shared::to_query_string, APIResponse, BaseClient};
use reorder_reminder_api_structs::*;
use reorder_reminder_domain::{ReminderStatus, SortOrder};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuditLogClient {
    base: Arc<BaseClient>,
}

#[derive(Default)]
pub struct GetLogsInput {
    pub status: Option<ReminderStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub order: Option<SortOrder>,
}

impl AuditLogClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self, input: GetLogsInput) -> APIResponse<get_logs::APIResponse> {
        let query = to_query_string(&[
            ("status", input.status.map(|s| s.as_str().to_string())),
            ("limit", input.limit.map(|l| l.to_string())),
            ("offset", input.offset.map(|o| o.to_string())),
            (
                "order",
                input.order.map(|o| match o {
                    SortOrder::Asc => "asc".to_string(),
                    SortOrder::Desc => "desc".to_string(),
                }),
            ),
        ]);
        self.base
            .get(format!("admin/logs?{}", query), StatusCode::OK)
            .await
    }

    pub async fn update_status(
        &self,
        log_id: i64,
        status: ReminderStatus,
    ) -> APIResponse<update_log_status::APIResponse> {
        let body = update_log_status::RequestBody { status };
        self.base
            .put(body, format!("admin/logs/{}", log_id), StatusCode::OK)
            .await
    }
}
