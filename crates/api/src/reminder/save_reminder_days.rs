use super::can_access_order;
use crate::{
    error::ReorderError,
    shared::{
        auth::authenticated_customer,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::save_reminder_days::{APIResponse, PathParams, RequestBody};
use reorder_reminder_domain::{validate_delay_days, NonceAction, ID};
use reorder_reminder_infra::ReorderContext;

pub async fn save_reminder_days_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    let body = body.0;
    let usecase = SaveReminderDaysUseCase {
        order_id: path.order_id,
        customer_id: authenticated_customer(&http_req, &ctx),
        order_key: body.order_key,
        days: body.days,
        nonce: body.nonce,
    };

    execute(usecase, &ctx)
        .await
        .map(|days| {
            HttpResponse::Ok().json(APIResponse {
                order_id: path.order_id,
                days,
                message: "Reminder preference saved".into(),
            })
        })
        .map_err(ReorderError::from)
}

/// Stores the reminder delay the buyer picked for an order
#[derive(Debug)]
pub struct SaveReminderDaysUseCase {
    pub order_id: ID,
    pub customer_id: Option<ID>,
    pub order_key: Option<String>,
    pub days: i64,
    pub nonce: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidNonce,
    OrderNotFound(ID),
    Forbidden,
    InvalidDays(i64),
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidNonce => Self::Unauthorized("Security check failed".into()),
            UseCaseError::OrderNotFound(order_id) => Self::NotFound(format!(
                "The order with id: {}, was not found.",
                order_id
            )),
            UseCaseError::Forbidden => {
                Self::Unauthorized("You are not allowed to access this order".into())
            }
            UseCaseError::InvalidDays(days) => Self::BadClientData(format!(
                "Reminder days must be at least 1, got: {}",
                days
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SaveReminderDaysUseCase {
    type Response = i64;

    type Error = UseCaseError;

    const NAME: &'static str = "SaveReminderDays";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        if !ctx
            .nonces
            .verify(&NonceAction::SaveReminderDays(self.order_id), &self.nonce)
        {
            return Err(UseCaseError::InvalidNonce);
        }

        let order = ctx
            .repos
            .orders
            .find(&self.order_id)
            .await
            .ok_or(UseCaseError::OrderNotFound(self.order_id))?;
        if !can_access_order(&order, self.customer_id.as_ref(), self.order_key.as_deref()) {
            return Err(UseCaseError::Forbidden);
        }

        let days =
            validate_delay_days(self.days).map_err(|_| UseCaseError::InvalidDays(self.days))?;
        ctx.repos
            .reminders
            .set_customer_delay(&order.id, days)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::*;

    fn usecase_factory(ctx: &ReorderContext, order_id: i64, days: i64) -> SaveReminderDaysUseCase {
        SaveReminderDaysUseCase {
            order_id: ID::new(order_id),
            customer_id: Some(ID::new(5)),
            order_key: None,
            days,
            nonce: ctx
                .nonces
                .create(&NonceAction::SaveReminderDays(ID::new(order_id))),
        }
    }

    #[actix_web::test]
    async fn saves_and_overwrites_preference() {
        let t = setup_test_context(JAN_1_2024);
        t.ctx
            .repos
            .orders
            .save(&completed_order(102, &[7], JAN_1_2024))
            .await
            .unwrap();

        let mut usecase = usecase_factory(&t.ctx, 102, 10);
        assert_eq!(usecase.execute(&t.ctx).await.unwrap(), 10);
        let mut usecase = usecase_factory(&t.ctx, 102, 60);
        assert_eq!(usecase.execute(&t.ctx).await.unwrap(), 60);
        assert_eq!(
            t.ctx
                .repos
                .reminders
                .find_customer_delay(&ID::new(102))
                .await
                .unwrap(),
            Some(60)
        );
    }

    #[actix_web::test]
    async fn rejects_forged_or_foreign_requests() {
        let t = setup_test_context(JAN_1_2024);
        t.ctx
            .repos
            .orders
            .save(&completed_order(102, &[7], JAN_1_2024))
            .await
            .unwrap();

        // Nonce bound to another order
        let mut usecase = usecase_factory(&t.ctx, 102, 10);
        usecase.nonce = t
            .ctx
            .nonces
            .create(&NonceAction::SaveReminderDays(ID::new(103)));
        assert!(matches!(
            usecase.execute(&t.ctx).await,
            Err(UseCaseError::InvalidNonce)
        ));

        let mut usecase = usecase_factory(&t.ctx, 102, 10);
        usecase.customer_id = None;
        assert!(matches!(
            usecase.execute(&t.ctx).await,
            Err(UseCaseError::Forbidden)
        ));
        usecase.order_key = Some("wc_order_102".into());
        assert!(usecase.execute(&t.ctx).await.is_ok());

        let mut usecase = usecase_factory(&t.ctx, 102, 0);
        assert!(matches!(
            usecase.execute(&t.ctx).await,
            Err(UseCaseError::InvalidDays(0))
        ));
        assert_eq!(
            t.ctx
                .repos
                .reminders
                .find_customer_delay(&ID::new(102))
                .await
                .unwrap(),
            Some(10)
        );

        let mut usecase = usecase_factory(&t.ctx, 104, 10);
        assert!(matches!(
            usecase.execute(&t.ctx).await,
            Err(UseCaseError::OrderNotFound(_))
        ));
    }
}
