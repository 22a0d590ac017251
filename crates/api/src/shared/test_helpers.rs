use reorder_reminder_domain::{LineItem, Order, OrderStatus, Product, ID};
use reorder_reminder_infra::{InMemoryMailer, ReorderContext, StaticSys};
use std::sync::Arc;

/// 2024-01-01T00:00:00Z
pub const JAN_1_2024: i64 = 1_704_067_200_000;

pub struct TestContext {
    pub ctx: ReorderContext,
    pub sys: Arc<StaticSys>,
    pub mailer: Arc<InMemoryMailer>,
}

pub fn setup_test_context(now: i64) -> TestContext {
    let mut ctx = ReorderContext::create_inmemory();
    let sys = Arc::new(StaticSys::new(now));
    let mailer = Arc::new(InMemoryMailer::new());
    ctx.sys = sys.clone();
    ctx.mailer = mailer.clone();
    TestContext { ctx, sys, mailer }
}

pub fn completed_order(order_id: i64, product_ids: &[i64], completed_at: i64) -> Order {
    Order {
        id: ID::new(order_id),
        customer_id: Some(ID::new(5)),
        order_key: format!("wc_order_{}", order_id),
        status: OrderStatus::Completed,
        billing_email: Some("a@x.com".into()),
        billing_first_name: Some("Ada".into()),
        completed_at: Some(completed_at),
        line_items: product_ids
            .iter()
            .map(|product_id| LineItem {
                product_id: Some(ID::new(*product_id)),
                quantity: 1,
            })
            .collect(),
    }
}

pub async fn insert_products(ctx: &ReorderContext, product_ids: &[i64]) {
    for product_id in product_ids {
        let product = Product {
            id: ID::new(*product_id),
            name: format!("Product {}", product_id),
        };
        ctx.repos.products.save(&product).await.unwrap();
    }
}
