mod get_unsubscribe_token;
mod unsubscribe;

use actix_web::web;
use get_unsubscribe_token::get_unsubscribe_token_controller;
use unsubscribe::{admin_unsubscribe_controller, public_unsubscribe_controller};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/admin/opt-outs/token",
        web::get().to(get_unsubscribe_token_controller),
    );
    cfg.route("/admin/opt-outs", web::post().to(admin_unsubscribe_controller));
    cfg.route("/unsubscribe", web::get().to(public_unsubscribe_controller));
}
