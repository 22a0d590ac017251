use super::details::build_reminder_details;
use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::send_test_reminder::{APIResponse, RequestBody};
use reorder_reminder_domain::{is_valid_email, ReminderDetails, ID};
use reorder_reminder_infra::ReorderContext;
use tracing::warn;

pub async fn send_test_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = SendTestReminderUseCase {
        email: body.email,
        product_id: body.product_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|details| {
            HttpResponse::Ok().json(APIResponse {
                subject: details.subject(),
                recipient: details.recipient,
                product_id: details.product_id,
            })
        })
        .map_err(ReorderError::from)
}

/// Sends a reminder outside of the sweep. Nothing is marked or audited.
#[derive(Debug)]
pub struct SendTestReminderUseCase {
    pub email: String,
    pub product_id: Option<ID>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidEmail(String),
    ProductNotFound(Option<ID>),
    DeliveryFailed,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("{} is not a valid email address", email))
            }
            UseCaseError::ProductNotFound(Some(product_id)) => Self::NotFound(format!(
                "The product with id: {}, was not found.",
                product_id
            )),
            UseCaseError::ProductNotFound(None) => {
                Self::NotFound("There are no products in the catalog".into())
            }
            UseCaseError::DeliveryFailed => {
                Self::DeliveryFailure("The test reminder could not be sent".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendTestReminderUseCase {
    type Response = ReminderDetails;

    type Error = UseCaseError;

    const NAME: &'static str = "SendTestReminder";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(UseCaseError::InvalidEmail(self.email.clone()));
        }

        let product = match &self.product_id {
            Some(product_id) => ctx.repos.products.find(product_id).await,
            None => ctx.repos.products.find_first().await,
        }
        .ok_or(UseCaseError::ProductNotFound(self.product_id))?;

        let details = build_reminder_details(ctx, email, None, None, &product);
        ctx.mailer.send(&details).await.map_err(|e| {
            warn!("Test reminder to {} failed. Error: {:?}", email, e);
            UseCaseError::DeliveryFailed
        })?;

        Ok(details)
    }
}
