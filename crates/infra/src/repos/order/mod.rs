mod inmemory;
mod postgres;

pub use inmemory::InMemoryOrderRepo;
pub use postgres::PostgresOrderRepo;
use reorder_reminder_domain::{Order, ID};

#[async_trait::async_trait]
pub trait IOrderRepo: Send + Sync {
    /// Inserts the order or replaces the stored one with the same id
    async fn save(&self, order: &Order) -> anyhow::Result<()>;
    async fn find(&self, order_id: &ID) -> Option<Order>;
}
