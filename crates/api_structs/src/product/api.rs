use crate::dtos::{ProductDTO, ProductReminderConfigDTO};
use reorder_reminder_domain::{ProductReminderConfig, ReminderToggle, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReminderConfigResponse {
    pub config: ProductReminderConfigDTO,
}

impl ProductReminderConfigResponse {
    pub fn new(config: ProductReminderConfig) -> Self {
        Self {
            config: ProductReminderConfigDTO::new(&config),
        }
    }
}

pub mod upsert_product {
    use super::*;
    use reorder_reminder_domain::Product;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub product_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub product: ProductDTO,
    }

    impl APIResponse {
        pub fn new(product: Product) -> Self {
            Self {
                product: ProductDTO::new(product),
            }
        }
    }
}

pub mod get_product_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub product_id: ID,
    }

    pub type APIResponse = ProductReminderConfigResponse;
}

pub mod set_product_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub product_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub enabled: ReminderToggle,
        /// Empty or zero clears the override
        #[serde(default)]
        pub delay_days: Option<i64>,
    }

    pub type APIResponse = ProductReminderConfigResponse;
}
