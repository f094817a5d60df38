//! Cliente del endpoint de envío de reportes
//!
//! Lo usan los cron drivers (binarios `monthly_reports` y `weekly_digest`)
//! para invocar `POST /api/reports/send` del backend desplegado.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::dto::report_dto::{SendReportRequest, SendReportResponse};

pub struct ReportEndpointClient {
    client: Client,
    endpoint: String,
}

impl ReportEndpointClient {
    pub fn new(app_base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/reports/send", app_base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn send_report(&self, request: &SendReportRequest) -> Result<SendReportResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("send-report returned {}: {}", status, body));
        }

        response
            .json::<SendReportResponse>()
            .await
            .context("invalid send-report response")
    }
}
