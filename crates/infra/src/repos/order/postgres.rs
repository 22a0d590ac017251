use super::IOrderRepo;
use reorder_reminder_domain::{LineItem, Order, OrderStatus, ID};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use tracing::error;

pub struct PostgresOrderRepo {
    pool: PgPool,
}

impl PostgresOrderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_line_items(&self, order_ids: &[i64]) -> anyhow::Result<HashMap<i64, Vec<LineItem>>> {
        let raws: Vec<LineItemRaw> = sqlx::query_as(
            r#"
            SELECT order_id, product_id, quantity FROM order_line_items
            WHERE order_id = ANY($1)
            ORDER BY order_id, position
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut line_items: HashMap<i64, Vec<LineItem>> = HashMap::new();
        for raw in raws {
            line_items.entry(raw.order_id).or_default().push(LineItem {
                product_id: raw.product_id.map(ID::new),
                quantity: raw.quantity,
            });
        }
        Ok(line_items)
    }

    async fn with_line_items(&self, raws: Vec<OrderRaw>) -> anyhow::Result<Vec<Order>> {
        let order_ids = raws.iter().map(|o| o.order_id).collect::<Vec<_>>();
        let mut line_items = self.find_line_items(&order_ids).await?;
        raws.into_iter()
            .map(|raw| {
                let items = line_items.remove(&raw.order_id).unwrap_or_default();
                raw.into_order(items)
            })
            .collect()
    }
}

#[derive(Debug, FromRow)]
struct OrderRaw {
    order_id: i64,
    customer_id: Option<i64>,
    order_key: String,
    status: String,
    billing_email: Option<String>,
    billing_first_name: Option<String>,
    completed_at: Option<i64>,
}

#[derive(Debug, FromRow)]
struct LineItemRaw {
    order_id: i64,
    product_id: Option<i64>,
    quantity: i64,
}

impl OrderRaw {
    fn into_order(self, line_items: Vec<LineItem>) -> anyhow::Result<Order> {
        Ok(Order {
            id: self.order_id.into(),
            customer_id: self.customer_id.map(ID::new),
            order_key: self.order_key,
            status: self.status.parse::<OrderStatus>()?,
            billing_email: self.billing_email,
            billing_first_name: self.billing_first_name,
            completed_at: self.completed_at,
            line_items,
        })
    }
}

#[async_trait::async_trait]
impl IOrderRepo for PostgresOrderRepo {
    async fn save(&self, order: &Order) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO orders(order_id, customer_id, order_key, status, billing_email, billing_first_name, completed_at)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (order_id) DO UPDATE
            SET customer_id = EXCLUDED.customer_id,
            order_key = EXCLUDED.order_key,
            status = EXCLUDED.status,
            billing_email = EXCLUDED.billing_email,
            billing_first_name = EXCLUDED.billing_first_name,
            completed_at = EXCLUDED.completed_at
            "#,
        )
        .bind(order.id.inner())
        .bind(order.customer_id.map(|id| id.inner()))
        .bind(&order.order_key)
        .bind(order.status.as_str())
        .bind(&order.billing_email)
        .bind(&order.billing_first_name)
        .bind(order.completed_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "Unable to save order: {:?}. DB returned error: {:?}",
                order, e
            );
            e
        })?;

        sqlx::query("DELETE FROM order_line_items WHERE order_id = $1")
            .bind(order.id.inner())
            .execute(&mut *tx)
            .await?;

        for (position, item) in order.line_items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_line_items(order_id, position, product_id, quantity)
                VALUES($1, $2, $3, $4)
                "#,
            )
            .bind(order.id.inner())
            .bind(position as i32)
            .bind(item.product_id.map(|id| id.inner()))
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    "Unable to save line item: {:?} of order: {}. DB returned error: {:?}",
                    item, order.id, e
                );
                e
            })?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find(&self, order_id: &ID) -> Option<Order> {
        let raw: OrderRaw = match sqlx::query_as("SELECT * FROM orders WHERE order_id = $1")
            .bind(order_id.inner())
            .fetch_one(&self.pool)
            .await
        {
            Ok(raw) => raw,
            Err(sqlx::Error::RowNotFound) => return None,
            Err(e) => {
                error!(
                    "Find order with id: {} failed. DB returned error: {:?}",
                    order_id, e
                );
                return None;
            }
        };
        match self.with_line_items(vec![raw]).await {
            Ok(mut orders) => orders.pop(),
            Err(e) => {
                error!(
                    "Unable to load line items of order: {}. Error: {:?}",
                    order_id, e
                );
                None
            }
        }
    }
}
