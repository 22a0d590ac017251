use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::unsubscribe::{APIResponse, QueryParams, RequestBody};
use reorder_reminder_domain::NonceAction;
use reorder_reminder_infra::ReorderContext;
use tracing::info;

fn handle_unsubscribe_response(
    res: Result<String, UseCaseError>,
) -> Result<HttpResponse, ReorderError> {
    res.map(|email| {
        HttpResponse::Ok().json(APIResponse {
            email,
            message: "You have been unsubscribed from reorder reminders".into(),
        })
    })
    .map_err(ReorderError::from)
}

pub async fn admin_unsubscribe_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UnsubscribeUseCase {
        email: body.email,
        nonce: body.nonce,
    };

    handle_unsubscribe_response(execute(usecase, &ctx).await)
}

/// Target of the unsubscribe link in reminder emails, the nonce is the only credential
pub async fn public_unsubscribe_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    let query = query.0;
    let usecase = UnsubscribeUseCase {
        email: query.email,
        nonce: query.nonce,
    };

    handle_unsubscribe_response(execute(usecase, &ctx).await)
}

#[derive(Debug)]
pub struct UnsubscribeUseCase {
    pub email: String,
    pub nonce: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidNonce,
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidNonce => Self::Unauthorized("Security check failed".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UnsubscribeUseCase {
    type Response = String;

    type Error = UseCaseError;

    const NAME: &'static str = "Unsubscribe";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        if !ctx
            .nonces
            .verify(&NonceAction::Unsubscribe(self.email.clone()), &self.nonce)
        {
            return Err(UseCaseError::InvalidNonce);
        }

        let newly_opted_out = ctx
            .repos
            .opt_outs
            .opt_out(&self.email, ctx.sys.get_timestamp_millis())
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if newly_opted_out {
            info!("Email: {} opted out of reorder reminders", self.email);
        }

        Ok(self.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usecase_factory(ctx: &ReorderContext, email: &str) -> UnsubscribeUseCase {
        UnsubscribeUseCase {
            email: email.into(),
            nonce: ctx
                .nonces
                .create(&NonceAction::Unsubscribe(email.to_string())),
        }
    }

    #[actix_web::test]
    async fn opts_out_with_valid_nonce() {
        let ctx = ReorderContext::create_inmemory();

        let mut usecase = usecase_factory(&ctx, "a@x.com");
        assert_eq!(usecase.execute(&ctx).await.unwrap(), "a@x.com");
        // Idempotent
        assert!(usecase.execute(&ctx).await.is_ok());
        assert!(ctx.repos.opt_outs.is_opted_out("a@x.com").await.unwrap());
        assert!(!ctx.repos.opt_outs.is_opted_out("A@x.com").await.unwrap());
    }

    #[actix_web::test]
    async fn rejects_nonce_of_other_email() {
        let ctx = ReorderContext::create_inmemory();

        let mut usecase = usecase_factory(&ctx, "b@x.com");
        usecase.email = "a@x.com".into();
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidNonce)
        ));

        let mut usecase = usecase_factory(&ctx, "a@x.com");
        usecase.nonce = "".into();
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidNonce)
        ));
        assert!(!ctx.repos.opt_outs.is_opted_out("a@x.com").await.unwrap());
    }
}
