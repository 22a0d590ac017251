mod inmemory;
mod postgres;

pub use inmemory::InMemoryOptOutRepo;
pub use postgres::PostgresOptOutRepo;

/// Email addresses that asked to not receive any reminders. Matching is
/// exact and case sensitive.
#[async_trait::async_trait]
pub trait IOptOutRepo: Send + Sync {
    async fn is_opted_out(&self, email: &str) -> anyhow::Result<bool>;
    /// Returns whether the address was newly added
    async fn opt_out(&self, email: &str, at: i64) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;

    #[tokio::test]
    async fn opt_out_is_idempotent_and_exact() {
        let ctx = setup_context().await.unwrap();
        let email = format!("user{}@x.com", rand::random::<u32>());

        assert!(!ctx.repos.opt_outs.is_opted_out(&email).await.unwrap());
        assert!(ctx.repos.opt_outs.opt_out(&email, 1000).await.unwrap());
        assert!(!ctx.repos.opt_outs.opt_out(&email, 2000).await.unwrap());
        assert!(ctx.repos.opt_outs.is_opted_out(&email).await.unwrap());
        assert!(!ctx
            .repos
            .opt_outs
            .is_opted_out(&email.to_uppercase())
            .await
            .unwrap());
    }
}
