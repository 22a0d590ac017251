use super::can_access_order;
use crate::{
    error::ReorderError,
    shared::{
        auth::authenticated_customer,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::get_reminder_selector::{APIResponse, PathParams, QueryParams};
use reorder_reminder_domain::{is_product_reminder_enabled, NonceAction, OrderStatus, ID};
use reorder_reminder_infra::ReorderContext;

pub async fn get_reminder_selector_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    query: web::Query<QueryParams>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    let usecase = GetReminderSelectorUseCase {
        order_id: path.order_id,
        customer_id: authenticated_customer(&http_req, &ctx),
        order_key: query.0.key,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(res))
        .map_err(ReorderError::from)
}

/// Data for the reminder day picker on the order confirmation page
#[derive(Debug)]
pub struct GetReminderSelectorUseCase {
    pub order_id: ID,
    pub customer_id: Option<ID>,
    pub order_key: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    OrderNotFound(ID),
    Forbidden,
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::OrderNotFound(order_id) => Self::NotFound(format!(
                "The order with id: {}, was not found.",
                order_id
            )),
            UseCaseError::Forbidden => {
                Self::Unauthorized("You are not allowed to access this order".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderSelectorUseCase {
    type Response = APIResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderSelector";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        let order = ctx
            .repos
            .orders
            .find(&self.order_id)
            .await
            .ok_or(UseCaseError::OrderNotFound(self.order_id))?;
        if !can_access_order(&order, self.customer_id.as_ref(), self.order_key.as_deref()) {
            return Err(UseCaseError::Forbidden);
        }

        let settings = ctx
            .repos
            .settings
            .get()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut has_enabled_product = false;
        for product_id in order.product_ids() {
            let config = ctx
                .repos
                .products
                .find_config(&product_id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if is_product_reminder_enabled(config.as_ref()) {
                has_enabled_product = true;
                break;
            }
        }

        let customer_delay = ctx
            .repos
            .reminders
            .find_customer_delay(&order.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(APIResponse {
            order_id: order.id,
            show: settings.reminder_enabled
                && order.status != OrderStatus::Failed
                && has_enabled_product,
            day_options: ctx.config.reminder_day_options.clone(),
            selected_days: customer_delay.unwrap_or(settings.default_delay_days),
            nonce: ctx.nonces.create(&NonceAction::SaveReminderDays(order.id)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::*;
    use reorder_reminder_domain::{ProductReminderConfig, ReminderToggle};

    fn usecase_for_owner(order_id: i64) -> GetReminderSelectorUseCase {
        GetReminderSelectorUseCase {
            order_id: ID::new(order_id),
            customer_id: Some(ID::new(5)),
            order_key: None,
        }
    }

    #[actix_web::test]
    async fn shows_selector_with_defaults() {
        let t = setup_test_context(JAN_1_2024);
        let order = completed_order(100, &[7], JAN_1_2024);
        t.ctx.repos.orders.save(&order).await.unwrap();

        let res = usecase_for_owner(100).execute(&t.ctx).await.unwrap();
        assert!(res.show);
        assert_eq!(res.selected_days, 30);
        assert_eq!(res.day_options, t.ctx.config.reminder_day_options);
        assert!(t
            .ctx
            .nonces
            .verify(&NonceAction::SaveReminderDays(ID::new(100)), &res.nonce));

        t.ctx
            .repos
            .reminders
            .set_customer_delay(&ID::new(100), 45)
            .await
            .unwrap();
        let res = usecase_for_owner(100).execute(&t.ctx).await.unwrap();
        assert_eq!(res.selected_days, 45);
    }

    #[actix_web::test]
    async fn hides_selector_without_enabled_products_or_for_failed_orders() {
        let t = setup_test_context(JAN_1_2024);
        let mut config = ProductReminderConfig::new(ID::new(7));
        config.enabled = ReminderToggle::No;
        t.ctx.repos.products.save_config(&config).await.unwrap();
        let order = completed_order(100, &[7], JAN_1_2024);
        t.ctx.repos.orders.save(&order).await.unwrap();

        let res = usecase_for_owner(100).execute(&t.ctx).await.unwrap();
        assert!(!res.show);

        let mut order = completed_order(101, &[8], JAN_1_2024);
        order.status = OrderStatus::Failed;
        t.ctx.repos.orders.save(&order).await.unwrap();
        let res = usecase_for_owner(101).execute(&t.ctx).await.unwrap();
        assert!(!res.show);
    }

    #[actix_web::test]
    async fn requires_owner_or_order_key() {
        let t = setup_test_context(JAN_1_2024);
        let order = completed_order(100, &[7], JAN_1_2024);
        t.ctx.repos.orders.save(&order).await.unwrap();

        let mut usecase = GetReminderSelectorUseCase {
            order_id: ID::new(100),
            customer_id: Some(ID::new(6)),
            order_key: None,
        };
        assert!(matches!(
            usecase.execute(&t.ctx).await,
            Err(UseCaseError::Forbidden)
        ));

        let mut usecase = GetReminderSelectorUseCase {
            order_id: ID::new(100),
            customer_id: None,
            order_key: Some("wc_order_100".into()),
        };
        assert!(usecase.execute(&t.ctx).await.is_ok());

        let mut usecase = usecase_for_owner(999);
        assert!(matches!(
            usecase.execute(&t.ctx).await,
            Err(UseCaseError::OrderNotFound(_))
        ));
    }
}
