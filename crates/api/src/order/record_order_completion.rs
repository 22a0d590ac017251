use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::record_order_completion::{APIResponse, PathParams};
use reorder_reminder_domain::{
    is_product_reminder_enabled, AuditLogEntry, ReminderRecord, ReminderStatus, ID,
};
use reorder_reminder_infra::ReorderContext;
use tracing::error;

pub async fn record_order_completion_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = RecordOrderCompletionUseCase {
        order_id: path.order_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|created| HttpResponse::Ok().json(APIResponse::new(created)))
        .map_err(ReorderError::from)
}

/// Creates the pending reminder records of a completed order.
/// Running it again for the same order creates nothing new.
#[derive(Debug)]
pub struct RecordOrderCompletionUseCase {
    pub order_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    OrderNotFound(ID),
    NotCompleted(ID),
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::OrderNotFound(order_id) => Self::NotFound(format!(
                "The order with id: {}, was not found.",
                order_id
            )),
            UseCaseError::NotCompleted(order_id) => Self::Conflict(format!(
                "The order with id: {}, is not completed.",
                order_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RecordOrderCompletionUseCase {
    type Response = Vec<ReminderRecord>;

    type Error = UseCaseError;

    const NAME: &'static str = "RecordOrderCompletion";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        let order = ctx
            .repos
            .orders
            .find(&self.order_id)
            .await
            .ok_or(UseCaseError::OrderNotFound(self.order_id))?;
        if !order.is_completed() {
            return Err(UseCaseError::NotCompleted(order.id));
        }

        let settings = ctx
            .repos
            .settings
            .get()
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !settings.reminder_enabled {
            return Ok(Vec::new());
        }
        let email = match order.billing_email() {
            Some(email) => email,
            None => return Ok(Vec::new()),
        };
        let completed_at = order
            .completed_at
            .unwrap_or_else(|| ctx.sys.get_timestamp_millis());

        let mut created = Vec::new();
        for product_id in order.product_ids() {
            let config = ctx
                .repos
                .products
                .find_config(&product_id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if !is_product_reminder_enabled(config.as_ref()) {
                continue;
            }

            let record = ReminderRecord::new(order.id, product_id, email, completed_at);
            let is_new = ctx
                .repos
                .reminders
                .record_pending(&record)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if !is_new {
                continue;
            }

            let entry = AuditLogEntry::new(
                order.id,
                product_id,
                email,
                ReminderStatus::Pending,
                ctx.sys.get_timestamp_millis(),
            );
            if let Err(e) = ctx.repos.audit_logs.insert(&entry).await {
                error!(
                    "Unable to write pending audit entry for order: {} and product: {}. Error: {:?}",
                    order.id, product_id, e
                );
            }
            created.push(record);
        }

        Ok(created)
    }
}
