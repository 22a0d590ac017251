use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::update_log_status::{APIResponse, PathParams, RequestBody};
use reorder_reminder_domain::{AuditLogEntry, ReminderStatus};
use reorder_reminder_infra::ReorderContext;

pub async fn update_log_status_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = UpdateLogStatusUseCase {
        log_id: path.log_id,
        status: body.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|log| HttpResponse::Ok().json(APIResponse::new(log)))
        .map_err(ReorderError::from)
}

/// Manual correction of an audit entry from the admin log viewer
#[derive(Debug)]
pub struct UpdateLogStatusUseCase {
    pub log_id: i64,
    pub status: ReminderStatus,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(i64),
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(log_id) => Self::NotFound(format!(
                "The log entry with id: {}, was not found.",
                log_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateLogStatusUseCase {
    type Response = AuditLogEntry;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateLogStatus";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        let updated = ctx
            .repos
            .audit_logs
            .update_status(self.log_id, self.status)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !updated {
            return Err(UseCaseError::NotFound(self.log_id));
        }

        ctx.repos
            .audit_logs
            .find(self.log_id)
            .await
            .ok_or(UseCaseError::NotFound(self.log_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reorder_reminder_domain::ID;

    #[actix_web::test]
    async fn updates_existing_entry() {
        let ctx = ReorderContext::create_inmemory();
        let entry = AuditLogEntry::new(
            ID::new(100),
            ID::new(7),
            "a@x.com",
            ReminderStatus::Failed,
            0,
        );
        let log_id = ctx.repos.audit_logs.insert(&entry).await.unwrap();

        let mut usecase = UpdateLogStatusUseCase {
            log_id,
            status: ReminderStatus::Sent,
        };
        let log = usecase.execute(&ctx).await.unwrap();
        assert_eq!(log.id, log_id);
        assert_eq!(log.status, ReminderStatus::Sent);

        let mut usecase = UpdateLogStatusUseCase {
            log_id: log_id + 1,
            status: ReminderStatus::Sent,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
