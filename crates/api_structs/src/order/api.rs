use crate::dtos::{LineItemDTO, OrderDTO, ReminderRecordDTO};
use reorder_reminder_domain::{Order, OrderStatus, ReminderRecord, ID};
use serde::{Deserialize, Serialize};

pub mod upsert_order {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub order_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub customer_id: Option<ID>,
        #[serde(default)]
        pub order_key: String,
        pub status: OrderStatus,
        #[serde(default)]
        pub billing_email: Option<String>,
        #[serde(default)]
        pub billing_first_name: Option<String>,
        /// Defaults to the time the order is stored as completed
        #[serde(default)]
        pub completed_at: Option<i64>,
        #[serde(default)]
        pub line_items: Vec<LineItemDTO>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub order: OrderDTO,
    }

    impl APIResponse {
        pub fn new(order: Order) -> Self {
            Self {
                order: OrderDTO::new(order),
            }
        }
    }
}

pub mod record_order_completion {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub order_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Reminder records created by this call
        pub created: Vec<ReminderRecordDTO>,
    }

    impl APIResponse {
        pub fn new(created: Vec<ReminderRecord>) -> Self {
            Self {
                created: created.iter().map(ReminderRecordDTO::new).collect(),
            }
        }
    }
}
