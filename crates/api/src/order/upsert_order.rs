use super::subscribers::RecordCompletionOnOrderCompleted;
use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::upsert_order::{APIResponse, PathParams, RequestBody};
use reorder_reminder_domain::{LineItem, Order, OrderStatus, ID};
use reorder_reminder_infra::ReorderContext;

pub async fn upsert_order_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpsertOrderUseCase {
        order_id: path.order_id,
        customer_id: body.customer_id,
        order_key: body.order_key,
        status: body.status,
        billing_email: body.billing_email,
        billing_first_name: body.billing_first_name,
        completed_at: body.completed_at,
        line_items: body
            .line_items
            .into_iter()
            .map(|item| item.into_line_item())
            .collect(),
    };

    execute(usecase, &ctx)
        .await
        .map(|order| HttpResponse::Ok().json(APIResponse::new(order)))
        .map_err(ReorderError::from)
}

/// Syncs an order from the store into the local order store
#[derive(Debug)]
pub struct UpsertOrderUseCase {
    pub order_id: ID,
    pub customer_id: Option<ID>,
    pub order_key: String,
    pub status: OrderStatus,
    pub billing_email: Option<String>,
    pub billing_first_name: Option<String>,
    pub completed_at: Option<i64>,
    pub line_items: Vec<LineItem>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidQuantity(i64),
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidQuantity(quantity) => Self::BadClientData(format!(
                "Line item quantity must be positive, got: {}",
                quantity
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpsertOrderUseCase {
    type Response = Order;

    type Error = UseCaseError;

    const NAME: &'static str = "UpsertOrder";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        if let Some(item) = self.line_items.iter().find(|item| item.quantity < 1) {
            return Err(UseCaseError::InvalidQuantity(item.quantity));
        }

        // Completion time is set once
        let existing_completed_at = ctx
            .repos
            .orders
            .find(&self.order_id)
            .await
            .and_then(|order| order.completed_at);
        let completed_at = match existing_completed_at {
            Some(completed_at) => Some(completed_at),
            None if self.status == OrderStatus::Completed => Some(
                self.completed_at
                    .unwrap_or_else(|| ctx.sys.get_timestamp_millis()),
            ),
            None => self.completed_at,
        };

        let order = Order {
            id: self.order_id,
            customer_id: self.customer_id,
            order_key: self.order_key.clone(),
            status: self.status,
            billing_email: self.billing_email.clone(),
            billing_first_name: self.billing_first_name.clone(),
            completed_at,
            line_items: self.line_items.clone(),
        };
        ctx.repos
            .orders
            .save(&order)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(order)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RecordCompletionOnOrderCompleted)]
    }
}
