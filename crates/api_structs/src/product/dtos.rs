use reorder_reminder_domain::{Product, ProductReminderConfig, ReminderToggle, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductDTO {
    pub id: ID,
    pub name: String,
}

impl ProductDTO {
    pub fn new(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductReminderConfigDTO {
    pub product_id: ID,
    pub enabled: ReminderToggle,
    pub delay_days: Option<i64>,
}

impl ProductReminderConfigDTO {
    pub fn new(config: &ProductReminderConfig) -> Self {
        Self {
            product_id: config.product_id,
            enabled: config.enabled,
            delay_days: config.delay_days,
        }
    }
}
