mod get_product_reminder;
mod set_product_reminder;
mod upsert_product;

use actix_web::web;
use get_product_reminder::get_product_reminder_controller;
use set_product_reminder::set_product_reminder_controller;
use upsert_product::upsert_product_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/admin/products/{product_id}",
        web::put().to(upsert_product_controller),
    );
    cfg.route(
        "/admin/products/{product_id}/reminder",
        web::get().to(get_product_reminder_controller),
    );
    cfg.route(
        "/admin/products/{product_id}/reminder",
        web::put().to(set_product_reminder_controller),
    );
}
