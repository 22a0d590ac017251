use super::details::build_reminder_details;
use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{rt::time::timeout, web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::{dtos::SweepReportDTO, run_sweep::APIResponse};
use reorder_reminder_domain::{
    is_due, is_product_reminder_enabled, resolve_delay, AuditLogEntry, GlobalSettings, Order,
    ReminderStatus, DAY_MILLIS, ID,
};
use reorder_reminder_infra::ReorderContext;
use std::time::Duration;
use tracing::{error, info, warn};

pub async fn run_sweep_controller(
    http_req: HttpRequest,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = ProcessRemindersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse { report }))
        .map_err(ReorderError::from)
}

/// One sweep over the completed orders with unsent reminders that sends
/// every reminder that is due
#[derive(Debug)]
pub struct ProcessRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    SweepInProgress,
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SweepInProgress => {
                Self::Conflict("A reminder sweep is already running".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug, PartialEq)]
enum PairOutcome {
    Sent,
    Failed,
    Skipped,
}

impl ProcessRemindersUseCase {
    /// Orders completed after the cutoff can not have anything due yet. The
    /// smallest delay in effect anywhere is used, the due check per pair
    /// stays authoritative.
    async fn candidate_cutoff(
        &self,
        now: i64,
        settings: &GlobalSettings,
        ctx: &ReorderContext,
    ) -> anyhow::Result<i64> {
        let min_product_delay = ctx.repos.products.min_delay_override().await?;
        let min_customer_delay = ctx.repos.reminders.min_customer_delay().await?;
        let min_delay = [
            Some(settings.default_delay_days),
            min_product_delay,
            min_customer_delay,
        ]
        .into_iter()
        .flatten()
        .filter(|days| *days > 0)
        .min()
        .unwrap_or(settings.default_delay_days);
        Ok(now - min_delay * DAY_MILLIS)
    }

    async fn audit(
        &self,
        order_id: ID,
        product_id: ID,
        email: &str,
        status: ReminderStatus,
        ctx: &ReorderContext,
    ) {
        let entry = AuditLogEntry::new(
            order_id,
            product_id,
            email,
            status,
            ctx.sys.get_timestamp_millis(),
        );
        if let Err(e) = ctx.repos.audit_logs.insert(&entry).await {
            error!(
                "Unable to write {} audit entry for order: {} and product: {}. Error: {:?}",
                status.as_str(),
                order_id,
                product_id,
                e
            );
        }
    }

    async fn process_pair(
        &self,
        order: &Order,
        product_id: ID,
        email: &str,
        now: i64,
        settings: &GlobalSettings,
        ctx: &ReorderContext,
    ) -> anyhow::Result<PairOutcome> {
        let record = match ctx.repos.reminders.find(&order.id, &product_id).await? {
            Some(record) if !record.sent => record,
            _ => return Ok(PairOutcome::Skipped),
        };

        let config = ctx.repos.products.find_config(&product_id).await?;
        if !is_product_reminder_enabled(config.as_ref()) {
            return Ok(PairOutcome::Skipped);
        }

        let delay_days = resolve_delay(
            record.customer_delay_days,
            config.as_ref(),
            settings.default_delay_days,
        );
        if !is_due(now, record.completed_at, delay_days) {
            return Ok(PairOutcome::Skipped);
        }

        let product = match ctx.repos.products.find(&product_id).await {
            Some(product) => product,
            None => {
                warn!(
                    "Product: {} of order: {} is not in the catalog, skipping its reminder",
                    product_id, order.id
                );
                return Ok(PairOutcome::Skipped);
            }
        };

        if !ctx
            .repos
            .reminders
            .try_claim(&order.id, &product_id, now, ctx.config.claim_lease_millis)
            .await?
        {
            info!(
                "Reminder for order: {} and product: {} is handled by another sweep",
                order.id, product_id
            );
            return Ok(PairOutcome::Skipped);
        }

        let details = build_reminder_details(
            ctx,
            email,
            order.billing_first_name.as_deref(),
            Some(order.id),
            &product,
        );
        let delivery_timeout = Duration::from_millis(ctx.config.delivery_timeout_millis as u64);
        let delivery = match timeout(delivery_timeout, ctx.mailer.send(&details)).await {
            Ok(res) => res,
            Err(_) => Err(anyhow::anyhow!(
                "Delivery did not complete within {} ms",
                ctx.config.delivery_timeout_millis
            )),
        };
        if let Err(e) = delivery {
            warn!(
                "Delivery of reminder for order: {} and product: {} failed. Error: {:?}",
                order.id, product_id, e
            );
            if let Err(e) = ctx.repos.reminders.release_claim(&order.id, &product_id).await {
                error!(
                    "Unable to release claim of order: {} and product: {}. Error: {:?}",
                    order.id, product_id, e
                );
            }
            self.audit(order.id, product_id, email, ReminderStatus::Failed, ctx)
                .await;
            return Ok(PairOutcome::Failed);
        }

        let sent_at = ctx.sys.get_timestamp_millis();
        if !ctx
            .repos
            .reminders
            .mark_sent(&order.id, &product_id, sent_at)
            .await?
        {
            warn!(
                "Reminder for order: {} and product: {} was already marked as sent",
                order.id, product_id
            );
            return Ok(PairOutcome::Skipped);
        }
        self.audit(order.id, product_id, email, ReminderStatus::Sent, ctx)
            .await;
        Ok(PairOutcome::Sent)
    }

    async fn process_order(
        &self,
        order: &Order,
        now: i64,
        settings: &GlobalSettings,
        report: &mut SweepReportDTO,
        ctx: &ReorderContext,
    ) {
        let email = match order.billing_email() {
            Some(email) => email,
            None => return,
        };
        match ctx.repos.opt_outs.is_opted_out(email).await {
            Ok(false) => (),
            Ok(true) => {
                report.orders_opted_out += 1;
                return;
            }
            Err(e) => {
                error!(
                    "Unable to check opt out of order: {}, retrying next sweep. Error: {:?}",
                    order.id, e
                );
                return;
            }
        }

        for product_id in order.product_ids() {
            match self
                .process_pair(order, product_id, email, now, settings, ctx)
                .await
            {
                Ok(PairOutcome::Sent) => report.sent += 1,
                Ok(PairOutcome::Failed) => report.failed += 1,
                Ok(PairOutcome::Skipped) => (),
                Err(e) => error!(
                    "Processing reminder for order: {} and product: {} failed, retrying next sweep. Error: {:?}",
                    order.id, product_id, e
                ),
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessRemindersUseCase {
    type Response = SweepReportDTO;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessReminders";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        let _sweep_guard = match ctx.sweep_lock.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("A reminder sweep is already running, skipping this one");
                return Err(UseCaseError::SweepInProgress);
            }
        };

        let settings = ctx
            .repos
            .settings
            .get()
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let mut report = SweepReportDTO::default();
        if !settings.reminder_enabled {
            info!("Reminders are disabled, skipping sweep");
            return Ok(report);
        }

        let now = ctx.sys.get_timestamp_millis();
        let cutoff = self
            .candidate_cutoff(now, &settings, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let order_ids = ctx
            .repos
            .reminders
            .find_pending_order_ids(cutoff)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        for order_id in order_ids {
            let order = match ctx.repos.orders.find(&order_id).await {
                Some(order) if order.is_completed() => order,
                Some(_) => continue,
                None => {
                    warn!("Order: {} has pending reminders but was not found", order_id);
                    continue;
                }
            };
            report.orders_scanned += 1;
            self.process_order(&order, now, &settings, &mut report, ctx)
                .await;
        }

        info!(
            orders_scanned = report.orders_scanned,
            sent = report.sent,
            failed = report.failed,
            orders_opted_out = report.orders_opted_out,
            "Reminder sweep done"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::*;
    use reorder_reminder_domain::{
        OrderStatus, ProductReminderConfig, ReminderRecord, ReminderToggle,
    };

    async fn seed_order(ctx: &ReorderContext, order: &Order) {
        ctx.repos.orders.save(order).await.unwrap();
        for product_id in order.product_ids() {
            let record = ReminderRecord::new(
                order.id,
                product_id,
                order.billing_email().unwrap(),
                order.completed_at.unwrap(),
            );
            ctx.repos.reminders.record_pending(&record).await.unwrap();
        }
    }

    async fn sweep(ctx: &ReorderContext) -> SweepReportDTO {
        let mut usecase = ProcessRemindersUseCase {};
        usecase.execute(ctx).await.unwrap()
    }

    async fn audit_statuses(ctx: &ReorderContext, order_id: i64) -> Vec<ReminderStatus> {
        ctx.repos
            .audit_logs
            .find_by_order(&ID::new(order_id))
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.status)
            .collect()
    }

    #[actix_web::test]
    async fn sends_once_when_due_after_default_delay() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7]).await;
        seed_order(&t.ctx, &completed_order(100, &[7], JAN_1_2024)).await;

        // 2024-01-30
        t.sys.set_timestamp_millis(JAN_1_2024 + 29 * DAY_MILLIS);
        assert_eq!(sweep(&t.ctx).await.sent, 0);
        assert!(t.mailer.sent().is_empty());

        // 2024-01-31
        t.sys.set_timestamp_millis(JAN_1_2024 + 30 * DAY_MILLIS);
        let report = sweep(&t.ctx).await;
        assert_eq!(report.sent, 1);
        assert_eq!(report.orders_scanned, 1);
        let sent = t.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "a@x.com");
        assert_eq!(sent[0].product_id, ID::new(7));
        assert_eq!(sent[0].customer_name, "Ada");
        assert_eq!(sent[0].subject(), "Time to reorder Product 7!");

        let record = t
            .ctx
            .repos
            .reminders
            .find(&ID::new(100), &ID::new(7))
            .await
            .unwrap()
            .unwrap();
        assert!(record.sent);
        assert_eq!(record.sent_at, Some(JAN_1_2024 + 30 * DAY_MILLIS));
        assert_eq!(audit_statuses(&t.ctx, 100).await, vec![ReminderStatus::Sent]);

        // Later sweeps never send it again
        t.sys.advance_millis(DAY_MILLIS);
        assert_eq!(sweep(&t.ctx).await.sent, 0);
        assert_eq!(t.mailer.sent().len(), 1);
        assert_eq!(audit_statuses(&t.ctx, 100).await, vec![ReminderStatus::Sent]);
    }

    #[actix_web::test]
    async fn due_boundary_is_inclusive() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7]).await;
        seed_order(&t.ctx, &completed_order(100, &[7], JAN_1_2024)).await;

        t.sys
            .set_timestamp_millis(JAN_1_2024 + 29 * DAY_MILLIS + 23 * 60 * 60 * 1000);
        assert_eq!(sweep(&t.ctx).await.sent, 0);
        t.sys.set_timestamp_millis(JAN_1_2024 + 30 * DAY_MILLIS);
        assert_eq!(sweep(&t.ctx).await.sent, 1);
    }

    #[actix_web::test]
    async fn opted_out_orders_are_never_dispatched() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7]).await;
        seed_order(&t.ctx, &completed_order(101, &[7], JAN_1_2024)).await;
        t.ctx
            .repos
            .opt_outs
            .opt_out("a@x.com", JAN_1_2024 + DAY_MILLIS)
            .await
            .unwrap();

        t.sys.set_timestamp_millis(JAN_1_2024 + 60 * DAY_MILLIS);
        let report = sweep(&t.ctx).await;
        assert_eq!(report.sent, 0);
        assert_eq!(report.orders_opted_out, 1);
        assert!(t.mailer.sent().is_empty());
        assert!(!t
            .ctx
            .repos
            .reminders
            .is_sent(&ID::new(101), &ID::new(7))
            .await
            .unwrap());
        assert!(audit_statuses(&t.ctx, 101).await.is_empty());
    }

    #[actix_web::test]
    async fn customer_delay_takes_precedence() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7]).await;
        let mut config = ProductReminderConfig::new(ID::new(7));
        config.set_delay_days(Some(45));
        t.ctx.repos.products.save_config(&config).await.unwrap();
        seed_order(&t.ctx, &completed_order(102, &[7], JAN_1_2024)).await;
        t.ctx
            .repos
            .reminders
            .set_customer_delay(&ID::new(102), 10)
            .await
            .unwrap();

        t.sys.set_timestamp_millis(JAN_1_2024 + 10 * DAY_MILLIS - 1);
        assert_eq!(sweep(&t.ctx).await.sent, 0);
        t.sys.set_timestamp_millis(JAN_1_2024 + 10 * DAY_MILLIS);
        assert_eq!(sweep(&t.ctx).await.sent, 1);
    }

    #[actix_web::test]
    async fn product_delay_beats_global_default() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7]).await;
        let mut config = ProductReminderConfig::new(ID::new(7));
        config.set_delay_days(Some(45));
        t.ctx.repos.products.save_config(&config).await.unwrap();
        seed_order(&t.ctx, &completed_order(100, &[7], JAN_1_2024)).await;

        t.sys.set_timestamp_millis(JAN_1_2024 + 44 * DAY_MILLIS);
        assert_eq!(sweep(&t.ctx).await.sent, 0);
        t.sys.set_timestamp_millis(JAN_1_2024 + 45 * DAY_MILLIS);
        assert_eq!(sweep(&t.ctx).await.sent, 1);
    }

    #[actix_web::test]
    async fn disabled_products_are_skipped_at_send_time() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7, 8]).await;
        seed_order(&t.ctx, &completed_order(100, &[7, 8], JAN_1_2024)).await;
        let mut config = ProductReminderConfig::new(ID::new(8));
        config.enabled = ReminderToggle::No;
        t.ctx.repos.products.save_config(&config).await.unwrap();

        t.sys.set_timestamp_millis(JAN_1_2024 + 30 * DAY_MILLIS);
        assert_eq!(sweep(&t.ctx).await.sent, 1);
        let sent = t.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].product_id, ID::new(7));
    }

    #[actix_web::test]
    async fn failed_deliveries_stay_pending_and_do_not_block_others() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7, 8]).await;
        seed_order(&t.ctx, &completed_order(100, &[7, 8], JAN_1_2024)).await;
        t.mailer.fail_for_product(ID::new(7));

        t.sys.set_timestamp_millis(JAN_1_2024 + 30 * DAY_MILLIS);
        let report = sweep(&t.ctx).await;
        assert_eq!(report.sent, 1);
        assert_eq!(report.failed, 1);
        assert!(!t
            .ctx
            .repos
            .reminders
            .is_sent(&ID::new(100), &ID::new(7))
            .await
            .unwrap());
        assert!(t
            .ctx
            .repos
            .reminders
            .is_sent(&ID::new(100), &ID::new(8))
            .await
            .unwrap());

        // Retried by the next sweep
        t.mailer.recover_product(&ID::new(7));
        t.sys.advance_millis(DAY_MILLIS);
        let report = sweep(&t.ctx).await;
        assert_eq!(report.sent, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(t.mailer.sent().len(), 2);

        let mut statuses = audit_statuses(&t.ctx, 100).await;
        statuses.sort_by_key(|s| s.as_str());
        assert_eq!(
            statuses,
            vec![
                ReminderStatus::Failed,
                ReminderStatus::Sent,
                ReminderStatus::Sent
            ]
        );
    }

    #[actix_web::test]
    async fn slow_deliveries_fail_and_release_their_claim() {
        let mut t = setup_test_context(JAN_1_2024);
        t.ctx.config.delivery_timeout_millis = 20;
        insert_products(&t.ctx, &[7]).await;
        seed_order(&t.ctx, &completed_order(100, &[7], JAN_1_2024)).await;
        t.mailer.set_latency(Some(Duration::from_millis(500)));

        let now = JAN_1_2024 + 30 * DAY_MILLIS;
        t.sys.set_timestamp_millis(now);
        let report = sweep(&t.ctx).await;
        assert_eq!(report.sent, 0);
        assert_eq!(report.failed, 1);
        assert!(t.mailer.sent().is_empty());
        assert!(!t
            .ctx
            .repos
            .reminders
            .is_sent(&ID::new(100), &ID::new(7))
            .await
            .unwrap());
        assert_eq!(audit_statuses(&t.ctx, 100).await, vec![ReminderStatus::Failed]);
        // Released, so the next sweep can take it right away
        assert!(t
            .ctx
            .repos
            .reminders
            .try_claim(&ID::new(100), &ID::new(7), now, 1000)
            .await
            .unwrap());
        t.ctx
            .repos
            .reminders
            .release_claim(&ID::new(100), &ID::new(7))
            .await
            .unwrap();

        t.mailer.set_latency(None);
        assert_eq!(sweep(&t.ctx).await.sent, 1);
    }

    #[actix_web::test]
    async fn nothing_is_sent_when_reminders_are_disabled() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7]).await;
        seed_order(&t.ctx, &completed_order(100, &[7], JAN_1_2024)).await;
        let settings = GlobalSettings {
            reminder_enabled: false,
            default_delay_days: 30,
        };
        t.ctx.repos.settings.save(&settings).await.unwrap();

        t.sys.set_timestamp_millis(JAN_1_2024 + 60 * DAY_MILLIS);
        assert_eq!(sweep(&t.ctx).await, SweepReportDTO::default());
        assert!(t.mailer.sent().is_empty());
    }

    #[actix_web::test]
    async fn orders_without_records_or_catalog_products_are_skipped() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7]).await;
        // Stored but never went through the completion handler
        t.ctx
            .repos
            .orders
            .save(&completed_order(100, &[7], JAN_1_2024))
            .await
            .unwrap();
        // Product 9 is not in the catalog
        seed_order(&t.ctx, &completed_order(103, &[9], JAN_1_2024)).await;

        t.sys.set_timestamp_millis(JAN_1_2024 + 60 * DAY_MILLIS);
        let report = sweep(&t.ctx).await;
        assert_eq!(report.orders_scanned, 1);
        assert_eq!(report.sent, 0);
        assert_eq!(report.failed, 0);
    }

    #[actix_web::test]
    async fn fully_sent_or_refunded_orders_are_not_scanned() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7]).await;
        seed_order(&t.ctx, &completed_order(100, &[7], JAN_1_2024)).await;
        let mut refunded = completed_order(101, &[7], JAN_1_2024);
        seed_order(&t.ctx, &refunded).await;
        refunded.status = OrderStatus::Refunded;
        t.ctx.repos.orders.save(&refunded).await.unwrap();

        t.sys.set_timestamp_millis(JAN_1_2024 + 30 * DAY_MILLIS);
        let report = sweep(&t.ctx).await;
        assert_eq!(report.orders_scanned, 1);
        assert_eq!(report.sent, 1);

        t.sys.advance_millis(DAY_MILLIS);
        assert_eq!(sweep(&t.ctx).await, SweepReportDTO::default());
    }

    #[actix_web::test]
    async fn pairs_claimed_by_another_sweep_are_left_alone() {
        let t = setup_test_context(JAN_1_2024);
        insert_products(&t.ctx, &[7]).await;
        seed_order(&t.ctx, &completed_order(100, &[7], JAN_1_2024)).await;
        let now = JAN_1_2024 + 30 * DAY_MILLIS;
        t.sys.set_timestamp_millis(now);
        assert!(t
            .ctx
            .repos
            .reminders
            .try_claim(&ID::new(100), &ID::new(7), now, 1000)
            .await
            .unwrap());

        assert_eq!(sweep(&t.ctx).await.sent, 0);
        t.sys.advance_millis(1000);
        assert_eq!(sweep(&t.ctx).await.sent, 1);
    }

    #[actix_web::test]
    async fn overlapping_sweeps_are_rejected() {
        let t = setup_test_context(JAN_1_2024);
        let _running_sweep = t.ctx.sweep_lock.lock().await;

        let mut usecase = ProcessRemindersUseCase {};
        let res = usecase.execute(&t.ctx).await;
        assert!(matches!(res, Err(UseCaseError::SweepInProgress)));
    }
}
