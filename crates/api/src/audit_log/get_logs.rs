use crate::{
    error::ReorderError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reorder_reminder_api_structs::get_logs::{APIResponse, QueryParams};
use reorder_reminder_domain::{AuditLogEntry, ReminderStatus, SortOrder};
use reorder_reminder_infra::{AuditLogQuery, ReorderContext};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

pub async fn get_logs_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<ReorderContext>,
) -> Result<HttpResponse, ReorderError> {
    protect_admin_route(&http_req, &ctx)?;

    let query = query.0;
    let usecase = GetLogsUseCase {
        status: query.status,
        limit: query.limit,
        offset: query.offset,
        sort: query.order,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.logs, res.total)))
        .map_err(ReorderError::from)
}

#[derive(Debug)]
pub struct GetLogsUseCase {
    pub status: Option<ReminderStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<SortOrder>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub logs: Vec<AuditLogEntry>,
    /// Number of entries matching the status filter, ignoring paging
    pub total: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidPaging,
    StorageError,
}

impl From<UseCaseError> for ReorderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidPaging => Self::BadClientData(format!(
                "Limit must be between 1 and {} and offset can not be negative",
                MAX_LIMIT
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetLogsUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetLogs";

    async fn execute(&mut self, ctx: &ReorderContext) -> Result<Self::Response, Self::Error> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        let offset = self.offset.unwrap_or(0);
        if !(1..=MAX_LIMIT).contains(&limit) || offset < 0 {
            return Err(UseCaseError::InvalidPaging);
        }

        let query = AuditLogQuery {
            status: self.status,
            limit,
            offset,
            sort: self.sort.unwrap_or_default(),
        };
        let logs = ctx
            .repos
            .audit_logs
            .find_many(&query)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let total = ctx
            .repos
            .audit_logs
            .count(self.status)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseResponse { logs, total })
    }
}
