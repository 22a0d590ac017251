mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use reorder_reminder_domain::{ReminderRecord, ID};

/// Durable eligibility state per (order, product) pair plus the
/// customer's delay choice per order
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Stores the record unless one already exists for the pair.
    /// Returns whether a new record was created.
    async fn record_pending(&self, record: &ReminderRecord) -> anyhow::Result<bool>;
    async fn find(&self, order_id: &ID, product_id: &ID) -> anyhow::Result<Option<ReminderRecord>>;
    async fn find_by_order(&self, order_id: &ID) -> anyhow::Result<Vec<ReminderRecord>>;
    async fn is_sent(&self, order_id: &ID, product_id: &ID) -> anyhow::Result<bool>;
    /// Orders that still have an unsent record completed at or before
    /// `cutoff`, oldest first
    async fn find_pending_order_ids(&self, cutoff: i64) -> anyhow::Result<Vec<ID>>;
    /// Overwrites the delay chosen for the order. Fails for delays below one day.
    async fn set_customer_delay(&self, order_id: &ID, delay_days: i64) -> anyhow::Result<()>;
    async fn find_customer_delay(&self, order_id: &ID) -> anyhow::Result<Option<i64>>;
    /// Smallest delay chosen by any customer
    async fn min_customer_delay(&self) -> anyhow::Result<Option<i64>>;
    /// Leases an unsent pair until `now + lease_millis`. Returns false when the
    /// pair is sent, missing or leased by somebody else.
    async fn try_claim(
        &self,
        order_id: &ID,
        product_id: &ID,
        now: i64,
        lease_millis: i64,
    ) -> anyhow::Result<bool>;
    async fn release_claim(&self, order_id: &ID, product_id: &ID) -> anyhow::Result<()>;
    /// Compare and set of the sent flag. Returns whether this call flipped it.
    async fn mark_sent(&self, order_id: &ID, product_id: &ID, at: i64) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use reorder_reminder_domain::{ReminderRecord, ID};

    fn random_order_id() -> ID {
        ID::new(rand::random::<u32>() as i64)
    }

    fn record_factory(order_id: ID) -> ReminderRecord {
        ReminderRecord::new(order_id, ID::new(7), "a@x.com", 1000)
    }

    #[tokio::test]
    async fn record_pending_is_idempotent() {
        let ctx = setup_context().await.unwrap();
        let record = record_factory(random_order_id());

        assert!(ctx.repos.reminders.record_pending(&record).await.unwrap());
        let mut duplicate = record.clone();
        duplicate.completed_at = 5000;
        duplicate.email = "b@x.com".into();
        assert!(!ctx.repos.reminders.record_pending(&duplicate).await.unwrap());

        let stored = ctx
            .repos
            .reminders
            .find(&record.order_id, &record.product_id)
            .await
            .unwrap()
            .expect("To find record");
        assert_eq!(stored, record);
        assert_eq!(
            ctx.repos
                .reminders
                .find_by_order(&record.order_id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn finds_orders_with_unsent_records_before_cutoff() {
        let ctx = setup_context().await.unwrap();
        let repo = &ctx.repos.reminders;
        let old = ReminderRecord::new(random_order_id(), ID::new(7), "a@x.com", -5000);
        let at_cutoff = ReminderRecord::new(random_order_id(), ID::new(7), "a@x.com", -4000);
        let recent = ReminderRecord::new(random_order_id(), ID::new(7), "a@x.com", -3000);
        let sent = ReminderRecord::new(random_order_id(), ID::new(7), "a@x.com", -5000);
        let half_sent_order_id = random_order_id();
        let half_sent = [
            ReminderRecord::new(half_sent_order_id, ID::new(7), "a@x.com", -5000),
            ReminderRecord::new(half_sent_order_id, ID::new(8), "a@x.com", -5000),
        ];
        for record in [&old, &at_cutoff, &recent, &sent, &half_sent[0], &half_sent[1]] {
            repo.record_pending(record).await.unwrap();
        }
        repo.mark_sent(&sent.order_id, &sent.product_id, 0)
            .await
            .unwrap();
        repo.mark_sent(&half_sent[0].order_id, &half_sent[0].product_id, 0)
            .await
            .unwrap();

        let res = repo.find_pending_order_ids(-4000).await.unwrap();
        assert!(res.contains(&old.order_id));
        assert!(res.contains(&at_cutoff.order_id));
        assert!(!res.contains(&recent.order_id));
        assert!(!res.contains(&sent.order_id));
        assert_eq!(
            res.iter().filter(|id| **id == half_sent_order_id).count(),
            1
        );
    }

    #[tokio::test]
    async fn customer_delay_applies_to_the_whole_order() {
        let ctx = setup_context().await.unwrap();
        let order_id = random_order_id();
        // A preference stored before completion is picked up by later records
        ctx.repos
            .reminders
            .set_customer_delay(&order_id, 20)
            .await
            .unwrap();
        ctx.repos
            .reminders
            .set_customer_delay(&order_id, 10)
            .await
            .unwrap();
        let record = record_factory(order_id);
        ctx.repos.reminders.record_pending(&record).await.unwrap();

        let stored = ctx
            .repos
            .reminders
            .find(&order_id, &record.product_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.customer_delay_days, Some(10));
        assert_eq!(
            ctx.repos.reminders.find_customer_delay(&order_id).await.unwrap(),
            Some(10)
        );
        let min = ctx.repos.reminders.min_customer_delay().await.unwrap();
        assert!(matches!(min, Some(days) if days <= 10));
    }

    #[tokio::test]
    async fn customer_delay_below_one_day_is_rejected() {
        let ctx = setup_context().await.unwrap();
        let order_id = random_order_id();
        let repo = &ctx.repos.reminders;

        assert!(repo.set_customer_delay(&order_id, 0).await.is_err());
        assert!(repo.set_customer_delay(&order_id, -5).await.is_err());
        assert_eq!(repo.find_customer_delay(&order_id).await.unwrap(), None);

        repo.set_customer_delay(&order_id, 1).await.unwrap();
        assert!(repo.set_customer_delay(&order_id, 0).await.is_err());
        assert_eq!(repo.find_customer_delay(&order_id).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn mark_sent_is_compare_and_set() {
        let ctx = setup_context().await.unwrap();
        let record = record_factory(random_order_id());
        ctx.repos.reminders.record_pending(&record).await.unwrap();
        let (order_id, product_id) = record.key();

        assert!(!ctx.repos.reminders.is_sent(&order_id, &product_id).await.unwrap());
        assert!(ctx
            .repos
            .reminders
            .mark_sent(&order_id, &product_id, 2000)
            .await
            .unwrap());
        assert!(!ctx
            .repos
            .reminders
            .mark_sent(&order_id, &product_id, 3000)
            .await
            .unwrap());
        assert!(ctx.repos.reminders.is_sent(&order_id, &product_id).await.unwrap());
        let stored = ctx
            .repos
            .reminders
            .find(&order_id, &product_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.sent_at, Some(2000));

        // Unknown pairs are never sent
        assert!(!ctx
            .repos
            .reminders
            .mark_sent(&order_id, &ID::new(8), 2000)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn claims_are_exclusive_until_released_or_expired() {
        let ctx = setup_context().await.unwrap();
        let record = record_factory(random_order_id());
        ctx.repos.reminders.record_pending(&record).await.unwrap();
        let (order_id, product_id) = record.key();
        let repo = &ctx.repos.reminders;

        assert!(repo.try_claim(&order_id, &product_id, 0, 100).await.unwrap());
        assert!(!repo.try_claim(&order_id, &product_id, 50, 100).await.unwrap());
        // The lease ran out
        assert!(repo.try_claim(&order_id, &product_id, 100, 100).await.unwrap());
        repo.release_claim(&order_id, &product_id).await.unwrap();
        assert!(repo.try_claim(&order_id, &product_id, 150, 100).await.unwrap());

        assert!(repo.mark_sent(&order_id, &product_id, 160).await.unwrap());
        assert!(!repo.try_claim(&order_id, &product_id, 10_000, 100).await.unwrap());
        assert!(!repo.try_claim(&order_id, &ID::new(8), 0, 100).await.unwrap());
    }
}
