use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::get_settings::APIResponse;
use reorder_reminder_domain::GlobalSettings;
use reorder_reminder_infra::ReorderContext;

pub async fn get_settings_controller(
    http_req: HttpRequest,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = GetSettingsUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(ReorderError::from)
}

#[derive(Debug)]
pub struct GetSettingsUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSettingsUseCase {
    type Response = GlobalSettings;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSettings";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .settings
            .get()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
