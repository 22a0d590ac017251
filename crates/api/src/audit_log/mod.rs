mod get_logs;
mod update_log_status;

use actix_web::web;
use get_logs::get_logs_controller;
use update_log_status::update_log_status_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/logs", web::get().to(get_logs_controller));
    cfg.route(
        "/admin/logs/{log_id}",
        web::put().to(update_log_status_controller),
    );
}
