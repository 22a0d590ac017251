use crate::error::ReorderError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reorder_reminder_domain::ID;
use reorder_reminder_infra::ReorderContext;
use serde::{Deserialize, Serialize};

/// Claims of the tokens the store hands out to logged in customers
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerClaims {
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
    pub customer_id: ID,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn decode_token(secret: &str, token: &str) -> anyhow::Result<CustomerClaims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let claims =
        decode::<CustomerClaims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;
    Ok(claims)
}

/// The logged in customer making the request, if any. Missing, malformed
/// and expired tokens all count as an anonymous request.
pub fn authenticated_customer(req: &HttpRequest, ctx: &ReorderContext) -> Option<ID> {
    let token = req.headers().get("authorization")?;
    let token = parse_authtoken_header(token.to_str().ok()?);
    decode_token(&ctx.config.customer_jwt_secret, &token)
        .ok()
        .map(|claims| claims.customer_id)
}

pub fn protect_admin_route(req: &HttpRequest, ctx: &ReorderContext) -> Result<(), ReorderError> {
    let api_key = match req.headers().get("x-api-key") {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(ReorderError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(ReorderError::Unauthorized(
                "Unable to find api-key in x-api-key header".to_string(),
            ))
        }
    };

    if api_key != ctx.config.admin_api_key {
        return Err(ReorderError::Unauthorized(
            "Invalid api-key provided in x-api-key header".to_string(),
        ));
    }
    Ok(())
}
