use reorder_reminder_api::Application;
use reorder_reminder_infra::{setup_context, Config};
use reorder_reminder_sdk::ReorderSDK;

pub struct TestApp {
    pub config: Config,
    pub address: String,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, ReorderSDK) {
    let mut ctx = setup_context()
        .await
        .expect("Failed to set up the application context");
    ctx.config.port = 0; // Random port

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = ReorderSDK::new(address.clone(), config.admin_api_key.clone());
    let app = TestApp { config, address };
    (app, sdk)
}
