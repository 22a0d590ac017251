use crate::{APIResponse, BaseClient};
use reorder_reminder_api_structs::{dtos::LineItemDTO, *};
use reorder_reminder_domain::{OrderStatus, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderClient {
    base: Arc<BaseClient>,
}

pub struct UpsertOrderInput {
    pub order_id: ID,
    pub customer_id: Option<ID>,
    pub order_key: String,
    pub status: OrderStatus,
    pub billing_email: Option<String>,
    pub billing_first_name: Option<String>,
    pub completed_at: Option<i64>,
    pub line_items: Vec<LineItemDTO>,
}

impl OrderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn upsert(&self, input: UpsertOrderInput) -> APIResponse<upsert_order::APIResponse> {
        let body = upsert_order::RequestBody {
            customer_id: input.customer_id,
            order_key: input.order_key,
            status: input.status,
            billing_email: input.billing_email,
            billing_first_name: input.billing_first_name,
            completed_at: input.completed_at,
            line_items: input.line_items,
        };
        self.base
            .put(
                body,
                format!("admin/orders/{}", input.order_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn record_completion(
        &self,
        order_id: ID,
    ) -> APIResponse<record_order_completion::APIResponse> {
        self.base
            .post(
                (),
                format!("admin/orders/{}/completed", order_id),
                StatusCode::OK,
            )
            .await
    }
}
