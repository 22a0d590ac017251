mod inmemory;
mod postgres;

pub use inmemory::InMemoryProductRepo;
pub use postgres::PostgresProductRepo;
use reorder_reminder_domain::{Product, ProductReminderConfig, ID};

#[async_trait::async_trait]
pub trait IProductRepo: Send + Sync {
    async fn save(&self, product: &Product) -> anyhow::Result<()>;
    async fn find(&self, product_id: &ID) -> Option<Product>;
    /// The catalog product with the lowest id
    async fn find_first(&self) -> Option<Product>;
    async fn find_config(&self, product_id: &ID) -> anyhow::Result<Option<ProductReminderConfig>>;
    async fn save_config(&self, config: &ProductReminderConfig) -> anyhow::Result<()>;
    /// Smallest delay override of any product
    async fn min_delay_override(&self) -> anyhow::Result<Option<i64>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use reorder_reminder_domain::{Product, ProductReminderConfig, ReminderToggle, ID};

    fn random_product_id() -> ID {
        ID::new(rand::random::<u32>() as i64)
    }

    #[tokio::test]
    async fn save_and_find_products() {
        let ctx = setup_context().await.unwrap();
        let mut product = Product {
            id: random_product_id(),
            name: "Coffee Beans".into(),
        };
        assert!(ctx.repos.products.save(&product).await.is_ok());
        assert_eq!(ctx.repos.products.find(&product.id).await.unwrap(), product);

        product.name = "Dark Roast".into();
        assert!(ctx.repos.products.save(&product).await.is_ok());
        assert_eq!(ctx.repos.products.find(&product.id).await.unwrap(), product);

        let first = ctx.repos.products.find_first().await.unwrap();
        assert!(first.id <= product.id);
    }

    #[tokio::test]
    async fn save_and_find_config() {
        let ctx = setup_context().await.unwrap();
        let product_id = random_product_id();
        assert!(ctx
            .repos
            .products
            .find_config(&product_id)
            .await
            .unwrap()
            .is_none());

        let mut config = ProductReminderConfig::new(product_id);
        config.enabled = ReminderToggle::No;
        config.set_delay_days(Some(3));
        ctx.repos.products.save_config(&config).await.unwrap();
        assert_eq!(
            ctx.repos.products.find_config(&product_id).await.unwrap(),
            Some(config.clone())
        );
        let min = ctx.repos.products.min_delay_override().await.unwrap();
        assert!(matches!(min, Some(days) if days <= 3));

        config.enabled = ReminderToggle::Unset;
        config.set_delay_days(None);
        ctx.repos.products.save_config(&config).await.unwrap();
        assert_eq!(
            ctx.repos.products.find_config(&product_id).await.unwrap(),
            Some(config)
        );
    }
}
