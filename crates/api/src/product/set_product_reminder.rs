use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::set_product_reminder::{APIResponse, PathParams, RequestBody};
use reorder_reminder_domain::{ProductReminderConfig, ReminderToggle, ID};
use reorder_reminder_infra::ReorderContext;

pub async fn set_product_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = SetProductReminderUseCase {
        product_id: path.product_id,
        enabled: body.enabled,
        delay_days: body.delay_days,
    };

    execute(usecase, &ctx)
        .await
        .map(|config| HttpResponse::Ok().json(APIResponse::new(config)))
        .map_err(ReorderError::from)
}

#[derive(Debug)]
pub struct SetProductReminderUseCase {
    pub product_id: ID,
    pub enabled: ReminderToggle,
    pub delay_days: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidDelay(i64),
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDelay(days) => Self::BadClientData(format!(
                "Delay days can not be negative, got: {}",
                days
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetProductReminderUseCase {
    type Response = ProductReminderConfig;

    type Error = UseCaseError;

    const NAME: &'static str = "SetProductReminder";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        if let Some(days) = self.delay_days.filter(|days| *days < 0) {
            return Err(UseCaseError::InvalidDelay(days));
        }

        let mut config = ProductReminderConfig::new(self.product_id);
        config.enabled = self.enabled;
        config.set_delay_days(self.delay_days);
        ctx.repos
            .products
            .save_config(&config)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::super::get_product_reminder::GetProductReminderUseCase;
    use super::*;

    #[actix_web::test]
    async fn sets_and_clears_product_config() {
        let ctx = ReorderContext::create_inmemory();

        let mut get_usecase = GetProductReminderUseCase {
            product_id: ID::new(7),
        };
        let config = get_usecase.execute(&ctx).await.unwrap();
        assert_eq!(config, ProductReminderConfig::new(ID::new(7)));

        let mut usecase = SetProductReminderUseCase {
            product_id: ID::new(7),
            enabled: ReminderToggle::No,
            delay_days: Some(45),
        };
        usecase.execute(&ctx).await.unwrap();
        let config = get_usecase.execute(&ctx).await.unwrap();
        assert_eq!(config.enabled, ReminderToggle::No);
        assert_eq!(config.delay_days, Some(45));

        let mut usecase = SetProductReminderUseCase {
            product_id: ID::new(7),
            enabled: ReminderToggle::Yes,
            delay_days: Some(0),
        };
        usecase.execute(&ctx).await.unwrap();
        let config = get_usecase.execute(&ctx).await.unwrap();
        assert_eq!(config.enabled, ReminderToggle::Yes);
        assert_eq!(config.delay_days, None);
    }

    #[actix_web::test]
    async fn rejects_negative_delay() {
        let ctx = ReorderContext::create_inmemory();
        let mut usecase = SetProductReminderUseCase {
            product_id: ID::new(7),
            enabled: ReminderToggle::Unset,
            delay_days: Some(-3),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidDelay(-3))
        ));
        assert!(ctx
            .repos
            .products
            .find_config(&ID::new(7))
            .await
            .unwrap()
            .is_none());
    }
}
