use super::IOrderRepo;
use crate::repos::shared::inmemory_repo::*;
use reorder_reminder_domain::{Order, ID};

pub struct InMemoryOrderRepo {
    orders: std::sync::Mutex<Vec<Order>>,
}

impl InMemoryOrderRepo {
    pub fn new() -> Self {
        Self {
            orders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IOrderRepo for InMemoryOrderRepo {
    async fn save(&self, order: &Order) -> anyhow::Result<()> {
        upsert(order, &self.orders);
        Ok(())
    }

    async fn find(&self, order_id: &ID) -> Option<Order> {
        find(order_id, &self.orders)
    }
}
