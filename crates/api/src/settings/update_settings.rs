use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::update_settings::{APIResponse, RequestBody};
use reorder_reminder_domain::GlobalSettings;
use reorder_reminder_infra::ReorderContext;
use tracing::info;

pub async fn update_settings_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = UpdateSettingsUseCase {
        reminder_enabled: body.reminder_enabled,
        default_delay_days: body.default_delay_days,
    };

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(ReorderError::from)
}

/// Fields left out keep their current value
#[derive(Debug)]
pub struct UpdateSettingsUseCase {
    pub reminder_enabled: Option<bool>,
    pub default_delay_days: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidDefaultDelay(i64),
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDefaultDelay(days) => Self::BadClientData(format!(
                "Default delay days must be at least 1, got: {}",
                days
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSettingsUseCase {
    type Response = GlobalSettings;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSettings";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        let mut settings = ctx
            .repos
            .settings
            .get()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if let Some(days) = self.default_delay_days {
            settings
                .set_default_delay_days(days)
                .map_err(|_| UseCaseError::InvalidDefaultDelay(days))?;
        }
        if let Some(enabled) = self.reminder_enabled {
            settings.reminder_enabled = enabled;
        }

        ctx.repos
            .settings
            .save(&settings)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        info!(
            reminder_enabled = settings.reminder_enabled,
            default_delay_days = settings.default_delay_days,
            "Global reminder settings updated"
        );

        Ok(settings)
    }
}
