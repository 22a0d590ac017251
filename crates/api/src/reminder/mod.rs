mod details;
mod get_reminder_selector;
pub mod process_reminders;
mod save_reminder_days;
mod send_test_reminder;

use actix_web::web;
use get_reminder_selector::get_reminder_selector_controller;
use process_reminders::run_sweep_controller;
use reorder_reminder_domain::{Order, ID};
use save_reminder_days::save_reminder_days_controller;
use send_test_reminder::send_test_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/sweep", web::post().to(run_sweep_controller));
    cfg.route(
        "/admin/reminders/test",
        web::post().to(send_test_reminder_controller),
    );

    cfg.route(
        "/orders/{order_id}/reminder",
        web::get().to(get_reminder_selector_controller),
    );
    cfg.route(
        "/orders/{order_id}/reminder",
        web::post().to(save_reminder_days_controller),
    );
}

/// Buyers reach their order either logged in as its customer or through the order key
fn can_access_order(order: &Order, customer_id: Option<&ID>, order_key: Option<&str>) -> bool {
    customer_id.map(|id| order.is_owned_by(id)).unwrap_or(false)
        || order_key.map(|key| order.has_order_key(key)).unwrap_or(false)
}
