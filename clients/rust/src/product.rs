use crate::{APIResponse, BaseClient};
use reorder_reminder_api_structs::*;
use reorder_reminder_domain::{ReminderToggle, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProductClient {
    base: Arc<BaseClient>,
}

pub struct UpsertProductInput {
    pub product_id: ID,
    pub name: String,
}

pub struct SetProductReminderInput {
    pub product_id: ID,
    pub enabled: ReminderToggle,
    pub delay_days: Option<i64>,
}

impl ProductClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn upsert(
        &self,
        input: UpsertProductInput,
    ) -> APIResponse<upsert_product::APIResponse> {
        let body = upsert_product::RequestBody { name: input.name };
        self.base
            .put(
                body,
                format!("admin/products/{}", input.product_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_reminder(
        &self,
        product_id: ID,
    ) -> APIResponse<get_product_reminder::APIResponse> {
        self.base
            .get(
                format!("admin/products/{}/reminder", product_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn set_reminder(
        &self,
        input: SetProductReminderInput,
    ) -> APIResponse<set_product_reminder::APIResponse> {
        let body = set_product_reminder::RequestBody {
            enabled: input.enabled,
            delay_days: input.delay_days,
        };
        self.base
            .put(
                body,
                format!("admin/products/{}/reminder", input.product_id),
                StatusCode::OK,
            )
            .await
    }
}
