use crate::{APIResponse, BaseClient};
use reorder_reminder_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct SettingsClient {
    base: Arc<BaseClient>,
}

#[derive(Default)]
pub struct UpdateSettingsInput {
    pub reminder_enabled: Option<bool>,
    pub default_delay_days: Option<i64>,
}

impl SettingsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self) -> APIResponse<get_settings::APIResponse> {
        self.base.get("admin/settings".into(), StatusCode::OK).await
    }

    pub async fn update(
        &self,
        input: UpdateSettingsInput,
    ) -> APIResponse<update_settings::APIResponse> {
        let body = update_settings::RequestBody {
            reminder_enabled: input.reminder_enabled,
            default_delay_days: input.default_delay_days,
        };
        self.base
            .put(body, "admin/settings".into(), StatusCode::OK)
            .await
    }
}
