use reorder_reminder_domain::{LineItem, Order, OrderStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDTO {
    pub product_id: Option<ID>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl LineItemDTO {
    pub fn new(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }

    pub fn into_line_item(self) -> LineItem {
        LineItem {
            product_id: self.product_id,
            quantity: self.quantity,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderDTO {
    pub id: ID,
    pub customer_id: Option<ID>,
    pub order_key: String,
    pub status: OrderStatus,
    pub billing_email: Option<String>,
    pub billing_first_name: Option<String>,
    pub completed_at: Option<i64>,
    pub line_items: Vec<LineItemDTO>,
}

impl OrderDTO {
    pub fn new(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            status: order.status,
            line_items: order.line_items.iter().map(LineItemDTO::new).collect(),
            order_key: order.order_key,
            billing_email: order.billing_email,
            billing_first_name: order.billing_first_name,
            completed_at: order.completed_at,
        }
    }
}
