use super::{
    record_order_completion::RecordOrderCompletionUseCase, upsert_order::UpsertOrderUseCase,
};
use crate::shared::usecase::{execute, Subscriber};
use reorder_reminder_domain::Order;
use reorder_reminder_infra::ReorderContext;

pub struct RecordCompletionOnOrderCompleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpsertOrderUseCase> for RecordCompletionOnOrderCompleted {
    async fn notify(&self, e: &Order, ctx: &ReorderContext) {
        if !e.is_completed() {
            return;
        }
        let record_completion = RecordOrderCompletionUseCase { order_id: e.id };

        // Sideeffect, ignore result
        let _ = execute(record_completion, ctx).await;
    }
}
