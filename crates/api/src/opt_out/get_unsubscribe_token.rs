use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::get_unsubscribe_token::{APIResponse, QueryParams};
use reorder_reminder_domain::{is_valid_email, unsubscribe_link, NonceAction};
use reorder_reminder_infra::ReorderContext;

pub async fn get_unsubscribe_token_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = GetUnsubscribeTokenUseCase {
        email: query.0.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(res))
        .map_err(ReorderError::from)
}

#[derive(Debug)]
pub struct GetUnsubscribeTokenUseCase {
    pub email: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidEmail(String),
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("{} is not a valid email address", email))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUnsubscribeTokenUseCase {
    type Response = APIResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUnsubscribeToken";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        if !is_valid_email(&self.email) {
            return Err(UseCaseError::InvalidEmail(self.email.clone()));
        }

        let nonce = ctx
            .nonces
            .create(&NonceAction::Unsubscribe(self.email.clone()));
        Ok(APIResponse {
            unsubscribe_link: unsubscribe_link(&ctx.config.public_url, &self.email, &nonce),
            email: self.email.clone(),
            nonce,
        })
    }
}
