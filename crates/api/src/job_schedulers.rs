use crate::{reminder::process_reminders::ProcessRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval_at, Instant};
use reorder_reminder_infra::ReorderContext;
use std::time::Duration;
use tracing::info;

/// Seconds until the next multiple of `interval_secs` since the unix epoch,
/// so a daily sweep always runs at midnight UTC
pub fn get_start_delay(now_ts: i64, interval_secs: u64) -> u64 {
    let interval_secs = interval_secs.max(1);
    let now_secs = (now_ts / 1000).max(0) as u64;
    interval_secs - now_secs % interval_secs
}

pub fn start_reminder_sweep_job(ctx: ReorderContext) {
    actix_web::rt::spawn(async move {
        let interval_secs = ctx.config.sweep_interval_secs;
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now, interval_secs);
        info!(
            "Reminder sweep scheduled every {} seconds, first run in {} seconds",
            interval_secs, secs_to_next_run
        );

        let start = Instant::now() + Duration::from_secs(secs_to_next_run);
        let mut sweep_interval = interval_at(start, Duration::from_secs(interval_secs.max(1)));
        loop {
            sweep_interval.tick().await;

            let usecase = ProcessRemindersUseCase {};
            let _ = execute(usecase, &ctx).await;
        }
    });
}
