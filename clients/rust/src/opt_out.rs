use crate::{shared::to_query_string, APIResponse, BaseClient};
use reorder_reminder_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct OptOutClient {
    base: Arc<BaseClient>,
}

pub struct UnsubscribeInput {
    pub email: String,
    pub nonce: String,
}

impl OptOutClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_token(
        &self,
        email: String,
    ) -> APIResponse<get_unsubscribe_token::APIResponse> {
        let query = to_query_string(&[("email", Some(email))]);
        self.base
            .get(format!("admin/opt-outs/token?{}", query), StatusCode::OK)
            .await
    }

    pub async fn unsubscribe(
        &self,
        input: UnsubscribeInput,
    ) -> APIResponse<unsubscribe::APIResponse> {
        let body = unsubscribe::RequestBody {
            email: input.email,
            nonce: input.nonce,
        };
        self.base
            .post(body, "admin/opt-outs".into(), StatusCode::OK)
            .await
    }

    /// Same as following the unsubscribe link of a reminder email
    pub async fn public_unsubscribe(
        &self,
        input: UnsubscribeInput,
    ) -> APIResponse<unsubscribe::APIResponse> {
        let query = to_query_string(&[
            ("email", Some(input.email)),
            ("nonce", Some(input.nonce)),
        ]);
        self.base
            .get(format!("unsubscribe?{}", query), StatusCode::OK)
            .await
    }
}
