mod record_order_completion;
mod subscribers;
mod upsert_order;

use actix_web::web;
use record_order_completion::record_order_completion_controller;
use upsert_order::upsert_order_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/orders/{order_id}", web::put().to(upsert_order_controller));
    cfg.route(
        "/admin/orders/{order_id}/completed",
        web::post().to(record_order_completion_controller),
    );
}
