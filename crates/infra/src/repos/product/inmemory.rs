use super::IProductRepo;
use crate::repos::shared::inmemory_repo::*;
use reorder_reminder_domain::{Product, ProductReminderConfig, ID};
use std::sync::Mutex;

pub struct InMemoryProductRepo {
    products: Mutex<Vec<Product>>,
    configs: Mutex<Vec<ProductReminderConfig>>,
}

impl InMemoryProductRepo {
    pub fn new() -> Self {
        Self {
            products: Mutex::new(Vec::new()),
            configs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IProductRepo for InMemoryProductRepo {
    async fn save(&self, product: &Product) -> anyhow::Result<()> {
        upsert(product, &self.products);
        Ok(())
    }

    async fn find(&self, product_id: &ID) -> Option<Product> {
        find(product_id, &self.products)
    }

    async fn find_first(&self) -> Option<Product> {
        find_by(&self.products, |_| true)
            .into_iter()
            .min_by_key(|p| p.id)
    }

    async fn find_config(&self, product_id: &ID) -> anyhow::Result<Option<ProductReminderConfig>> {
        Ok(find(product_id, &self.configs))
    }

    async fn save_config(&self, config: &ProductReminderConfig) -> anyhow::Result<()> {
        upsert(config, &self.configs);
        Ok(())
    }

    async fn min_delay_override(&self) -> anyhow::Result<Option<i64>> {
        Ok(find_by(&self.configs, |c| c.delay_days.is_some())
            .into_iter()
            .filter_map(|c| c.delay_days)
            .min())
    }
}
