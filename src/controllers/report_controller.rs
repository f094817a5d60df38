use sqlx::PgPool;
use validator::Validate;

use crate::clients::EloraClient;
use crate::dto::report_dto::{SendReportRequest, SendReportResponse};
use crate::services::mailer::Mailer;
use crate::services::ReportService;
use crate::utils::errors::AppError;

pub struct ReportController {
    pool: PgPool,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn send(
        &self,
        elora: Option<&EloraClient>,
        mailer: &dyn Mailer,
        request: SendReportRequest,
    ) -> Result<SendReportResponse, AppError> {
        request.validate()?;
        if request.include_charts {
            tracing::debug!("📊 includeCharts solicitado; el digest se envía en texto plano");
        }

        ReportService::new(self.pool.clone(), elora, mailer)
            .send_report(&request)
            .await
    }
}
