mod get_settings;
mod update_settings;

use actix_web::web;
use get_settings::get_settings_controller;
use update_settings::update_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/settings", web::get().to(get_settings_controller));
    cfg.route("/admin/settings", web::put().to(update_settings_controller));
}
