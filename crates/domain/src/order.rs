use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Fulfillment status of an `Order` as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::Failed => "failed",
        }
    }
}

#[derive(Error, Debug)]
#[error("Unknown order status: {0}")]
pub struct InvalidOrderStatusError(String);

impl FromStr for OrderStatus {
    type Err = InvalidOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "on-hold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            "failed" => Ok(Self::Failed),
            _ => Err(InvalidOrderStatusError(s.to_string())),
        }
    }
}

/// One product entry within an `Order`. The product reference is optional
/// because the store keeps line items around for products that were deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: Option<ID>,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: ID,
    /// The registered customer that placed the order, `None` for guest checkouts
    pub customer_id: Option<ID>,
    /// Private access key handed to the buyer on checkout
    pub order_key: String,
    pub status: OrderStatus,
    pub billing_email: Option<String>,
    pub billing_first_name: Option<String>,
    /// Millis timestamp at which the order reached `OrderStatus::Completed`
    pub completed_at: Option<i64>,
    pub line_items: Vec<LineItem>,
}

impl Order {
    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// The billing email, if the order has a non empty one
    pub fn billing_email(&self) -> Option<&str> {
        self.billing_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// Distinct product ids of the line items, in line item order.
    /// Line items without a resolvable product are left out.
    pub fn product_ids(&self) -> Vec<ID> {
        let mut product_ids: Vec<ID> = Vec::with_capacity(self.line_items.len());
        for product_id in self.line_items.iter().filter_map(|item| item.product_id) {
            if !product_ids.contains(&product_id) {
                product_ids.push(product_id);
            }
        }
        product_ids
    }

    pub fn is_owned_by(&self, customer_id: &ID) -> bool {
        self.customer_id.as_ref() == Some(customer_id)
    }

    pub fn has_order_key(&self, order_key: &str) -> bool {
        !order_key.is_empty() && self.order_key == order_key
    }
}

impl Entity<ID> for Order {
    fn id(&self) -> ID {
        self.id
    }
}
