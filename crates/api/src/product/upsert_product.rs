use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::upsert_product::{APIResponse, PathParams, RequestBody};
use reorder_reminder_domain::{Product, ID};
use reorder_reminder_infra::ReorderContext;

pub async fn upsert_product_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = UpsertProductUseCase {
        product_id: path.product_id,
        name: body.0.name,
    };

    execute(usecase, &ctx)
        .await
        .map(|product| HttpResponse::Ok().json(APIResponse::new(product)))
        .map_err(ReorderError::from)
}

#[derive(Debug)]
pub struct UpsertProductUseCase {
    pub product_id: ID,
    pub name: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    EmptyName,
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => Self::BadClientData("Product name can not be empty".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpsertProductUseCase {
    type Response = Product;

    type Error = UseCaseError;

    const NAME: &'static str = "UpsertProduct";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UseCaseError::EmptyName);
        }

        let product = Product {
            id: self.product_id,
            name: name.to_string(),
        };
        ctx.repos
            .products
            .save(&product)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn upserts_product() {
        let ctx = ReorderContext::create_inmemory();
        let mut usecase = UpsertProductUseCase {
            product_id: ID::new(7),
            name: " Coffee beans ".into(),
        };
        let product = usecase.execute(&ctx).await.unwrap();
        assert_eq!(product.name, "Coffee beans");

        let mut usecase = UpsertProductUseCase {
            product_id: ID::new(7),
            name: "Coffee beans 1kg".into(),
        };
        usecase.execute(&ctx).await.unwrap();
        let product = ctx.repos.products.find(&ID::new(7)).await.unwrap();
        assert_eq!(product.name, "Coffee beans 1kg");
    }

    #[actix_web::test]
    async fn rejects_empty_name() {
        let ctx = ReorderContext::create_inmemory();
        let mut usecase = UpsertProductUseCase {
            product_id: ID::new(7),
            name: "  ".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::EmptyName)
        ));
    }
}
