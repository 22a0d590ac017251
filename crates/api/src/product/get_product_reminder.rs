use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::get_product_reminder::{APIResponse, PathParams};
use reorder_reminder_domain::{ProductReminderConfig, ID};
use reorder_reminder_infra::ReorderContext;

pub async fn get_product_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = GetProductReminderUseCase {
        product_id: path.product_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|config| HttpResponse::Ok().json(APIResponse::new(config)))
        .map_err(ReorderError::from)
}

/// Products without stored configuration report the defaults
#[derive(Debug)]
pub struct GetProductReminderUseCase {
    pub product_id: ID,
}

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
impl UseCase for GetProductReminderUseCase {
    type Response = ProductReminderConfig;

    type Error = UseCaseError;

    const NAME: &'static str = "GetProductReminder";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        let config = ctx
            .repos
            .products
            .find_config(&self.product_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(config.unwrap_or_else(|| ProductReminderConfig::new(self.product_id)))
    }
}
