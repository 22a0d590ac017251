use super::IProductRepo;
use reorder_reminder_domain::{Product, ProductReminderConfig, ReminderToggle, ID};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresProductRepo {
    pool: PgPool,
}

impl PostgresProductRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRaw {
    product_id: i64,
    name: String,
}

impl From<ProductRaw> for Product {
    fn from(e: ProductRaw) -> Self {
        Self {
            id: e.product_id.into(),
            name: e.name,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProductReminderConfigRaw {
    product_id: i64,
    enabled: Option<String>,
    delay_days: Option<i64>,
}

impl From<ProductReminderConfigRaw> for ProductReminderConfig {
    fn from(e: ProductReminderConfigRaw) -> Self {
        Self {
            product_id: e.product_id.into(),
            enabled: ReminderToggle::from_db(e.enabled.as_deref()),
            delay_days: e.delay_days,
        }
    }
}

#[async_trait::async_trait]
impl IProductRepo for PostgresProductRepo {
    async fn save(&self, product: &Product) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products(product_id, name)
            VALUES($1, $2)
            ON CONFLICT (product_id) DO UPDATE
            SET name = EXCLUDED.name
            "#,
        )
        .bind(product.id.inner())
        .bind(&product.name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save product: {:?}. DB returned error: {:?}",
                product, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, product_id: &ID) -> Option<Product> {
        let res: Result<Option<ProductRaw>, _> =
            sqlx::query_as("SELECT * FROM products WHERE product_id = $1")
                .bind(product_id.inner())
                .fetch_optional(&self.pool)
                .await;
        match res {
            Ok(raw) => raw.map(|p| p.into()),
            Err(e) => {
                error!(
                    "Find product with id: {} failed. DB returned error: {:?}",
                    product_id, e
                );
                None
            }
        }
    }

    async fn find_first(&self) -> Option<Product> {
        let res: Result<Option<ProductRaw>, _> =
            sqlx::query_as("SELECT * FROM products ORDER BY product_id LIMIT 1")
                .fetch_optional(&self.pool)
                .await;
        match res {
            Ok(raw) => raw.map(|p| p.into()),
            Err(e) => {
                error!("Find first product failed. DB returned error: {:?}", e);
                None
            }
        }
    }

    async fn find_config(&self, product_id: &ID) -> anyhow::Result<Option<ProductReminderConfig>> {
        let raw: Option<ProductReminderConfigRaw> =
            sqlx::query_as("SELECT * FROM product_reminder_configs WHERE product_id = $1")
                .bind(product_id.inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    error!(
                        "Find reminder config of product: {} failed. DB returned error: {:?}",
                        product_id, e
                    );
                    e
                })?;
        Ok(raw.map(|c| c.into()))
    }

    async fn save_config(&self, config: &ProductReminderConfig) -> anyhow::Result<()> {
        let enabled = match config.enabled {
            ReminderToggle::Unset => None,
            toggle => Some(toggle.as_str()),
        };
        sqlx::query(
            r#"
            INSERT INTO product_reminder_configs(product_id, enabled, delay_days)
            VALUES($1, $2, $3)
            ON CONFLICT (product_id) DO UPDATE
            SET enabled = EXCLUDED.enabled,
            delay_days = EXCLUDED.delay_days
            "#,
        )
        .bind(config.product_id.inner())
        .bind(enabled)
        .bind(config.delay_days)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save product reminder config: {:?}. DB returned error: {:?}",
                config, e
            );
            e
        })?;
        Ok(())
    }

    async fn min_delay_override(&self) -> anyhow::Result<Option<i64>> {
        let min: Option<i64> =
            sqlx::query_scalar("SELECT MIN(delay_days) FROM product_reminder_configs")
                .fetch_one(&self.pool)
                .await?;
        Ok(min)
    }
}
