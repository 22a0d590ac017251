use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use reorder_reminder_domain::{validate_delay_days, Entity, ReminderRecord, ID};
use std::{collections::HashMap, sync::Mutex};

#[derive(Debug, Clone)]
struct StoredReminder {
    record: ReminderRecord,
    claimed_until: Option<i64>,
}

impl Entity<(ID, ID)> for StoredReminder {
    fn id(&self) -> (ID, ID) {
        self.record.key()
    }
}

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<StoredReminder>>,
    customer_delays: Mutex<HashMap<ID, i64>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
            customer_delays: Mutex::new(HashMap::new()),
        }
    }

    fn with_customer_delay(&self, mut record: ReminderRecord) -> ReminderRecord {
        record.customer_delay_days = self
            .customer_delays
            .lock()
            .unwrap()
            .get(&record.order_id)
            .copied();
        record
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn record_pending(&self, record: &ReminderRecord) -> anyhow::Result<bool> {
        let mut reminders = self.reminders.lock().unwrap();
        if reminders.iter().any(|r| r.id() == record.key()) {
            return Ok(false);
        }
        let mut record = record.clone();
        record.customer_delay_days = None;
        reminders.push(StoredReminder {
            record,
            claimed_until: None,
        });
        Ok(true)
    }

    async fn find(&self, order_id: &ID, product_id: &ID) -> anyhow::Result<Option<ReminderRecord>> {
        let stored = find(&(*order_id, *product_id), &self.reminders);
        Ok(stored.map(|s| self.with_customer_delay(s.record)))
    }

    async fn find_by_order(&self, order_id: &ID) -> anyhow::Result<Vec<ReminderRecord>> {
        Ok(find_by(&self.reminders, |r| r.record.order_id == *order_id)
            .into_iter()
            .map(|s| self.with_customer_delay(s.record))
            .collect())
    }

    async fn is_sent(&self, order_id: &ID, product_id: &ID) -> anyhow::Result<bool> {
        Ok(find(&(*order_id, *product_id), &self.reminders)
            .map(|s| s.record.sent)
            .unwrap_or(false))
    }

    async fn find_pending_order_ids(&self, cutoff: i64) -> anyhow::Result<Vec<ID>> {
        let mut pending = find_by(&self.reminders, |r| {
            !r.record.sent && r.record.completed_at <= cutoff
        })
        .into_iter()
        .map(|r| (r.record.completed_at, r.record.order_id))
        .collect::<Vec<_>>();
        pending.sort();
        let mut order_ids: Vec<ID> = Vec::new();
        for (_, order_id) in pending {
            if !order_ids.contains(&order_id) {
                order_ids.push(order_id);
            }
        }
        Ok(order_ids)
    }

    async fn set_customer_delay(&self, order_id: &ID, delay_days: i64) -> anyhow::Result<()> {
        let delay_days = validate_delay_days(delay_days)?;
        self.customer_delays
            .lock()
            .unwrap()
            .insert(*order_id, delay_days);
        Ok(())
    }

    async fn find_customer_delay(&self, order_id: &ID) -> anyhow::Result<Option<i64>> {
        Ok(self.customer_delays.lock().unwrap().get(order_id).copied())
    }

    async fn min_customer_delay(&self) -> anyhow::Result<Option<i64>> {
        Ok(self.customer_delays.lock().unwrap().values().min().copied())
    }

    async fn try_claim(
        &self,
        order_id: &ID,
        product_id: &ID,
        now: i64,
        lease_millis: i64,
    ) -> anyhow::Result<bool> {
        let claimed = update_many(
            &self.reminders,
            |r| {
                r.id() == (*order_id, *product_id)
                    && !r.record.sent
                    && r.claimed_until.map(|until| until <= now).unwrap_or(true)
            },
            |r| r.claimed_until = Some(now + lease_millis),
        );
        Ok(claimed == 1)
    }

    async fn release_claim(&self, order_id: &ID, product_id: &ID) -> anyhow::Result<()> {
        update_many(
            &self.reminders,
            |r| r.id() == (*order_id, *product_id) && !r.record.sent,
            |r| r.claimed_until = None,
        );
        Ok(())
    }

    async fn mark_sent(&self, order_id: &ID, product_id: &ID, at: i64) -> anyhow::Result<bool> {
        let updated = update_many(
            &self.reminders,
            |r| r.id() == (*order_id, *product_id) && !r.record.sent,
            |r| {
                r.record.mark_sent(at);
                r.claimed_until = None;
            },
        );
        Ok(updated == 1)
    }
}
