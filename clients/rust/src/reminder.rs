use crate::{shared::to_query_string, APIResponse, BaseClient};
use reorder_reminder_api_structs::*;
use reorder_reminder_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct SendTestReminderInput {
    pub email: String,
    pub product_id: Option<ID>,
}

/// Buyers authenticate either with a customer token or with the order key
pub struct GetReminderSelectorInput {
    pub order_id: ID,
    pub order_key: Option<String>,
    pub customer_token: Option<String>,
}

pub struct SaveReminderDaysInput {
    pub order_id: ID,
    pub days: i64,
    pub nonce: String,
    pub order_key: Option<String>,
    pub customer_token: Option<String>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn run_sweep(&self) -> APIResponse<run_sweep::APIResponse> {
        self.base
            .post((), "admin/sweep".into(), StatusCode::OK)
            .await
    }

    pub async fn send_test(
        &self,
        input: SendTestReminderInput,
    ) -> APIResponse<send_test_reminder::APIResponse> {
        let body = send_test_reminder::RequestBody {
            email: input.email,
            product_id: input.product_id,
        };
        self.base
            .post(body, "admin/reminders/test".into(), StatusCode::OK)
            .await
    }

    pub async fn get_selector(
        &self,
        input: GetReminderSelectorInput,
    ) -> APIResponse<get_reminder_selector::APIResponse> {
        let query = to_query_string(&[("key", input.order_key)]);
        self.base
            .get_as_customer(
                format!("orders/{}/reminder?{}", input.order_id, query),
                input.customer_token.as_deref(),
                StatusCode::OK,
            )
            .await
    }

    pub async fn save_days(
        &self,
        input: SaveReminderDaysInput,
    ) -> APIResponse<save_reminder_days::APIResponse> {
        let body = save_reminder_days::RequestBody {
            days: input.days,
            nonce: input.nonce,
            order_key: input.order_key,
        };
        self.base
            .post_as_customer(
                body,
                format!("orders/{}/reminder", input.order_id),
                input.customer_token.as_deref(),
                StatusCode::OK,
            )
            .await
    }
}
