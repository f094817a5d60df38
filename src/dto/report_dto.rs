use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::DateRange;
use crate::utils::validation::validate_date_order;

// Request del endpoint de envío de reportes (lo llaman los cron drivers y el dashboard)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_send_report"))]
pub struct SendReportRequest {
    #[serde(default)]
    pub cron_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub user_email: Option<String>,
    pub date_range: DateRange,
    #[serde(default)]
    pub report_types: Vec<String>,
    #[serde(default)]
    pub include_charts: bool,
}

fn validate_send_report(request: &SendReportRequest) -> Result<(), ValidationError> {
    if request.company_id.is_none() && request.user_email.is_none() {
        return Err(ValidationError::new("company_id_or_user_email_required"));
    }
    validate_date_order(request.date_range.start, request.date_range.end)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendReportResponse {
    pub sent_to: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}

// Request para guardar el digest semanal
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReportPreferenceRequest {
    pub company_id: Option<Uuid>,
    pub enabled: bool,
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: i16,
    #[validate(regex = "crate::utils::validation::SEND_TIME_RE")]
    pub send_time: String,
    #[validate(custom = "crate::utils::validation::validate_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub report_types: Vec<String>,
    #[serde(default)]
    pub include_charts: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_report_request_wire_format() {
        let request: SendReportRequest = serde_json::from_value(json!({
            "cronMode": true,
            "companyId": "00000000-0000-0000-0000-000000000001",
            "dateRange": { "start": "2026-09-01", "end": "2026-09-30" },
            "reportTypes": ["compliance"],
            "includeCharts": false
        }))
        .unwrap();

        assert!(request.cron_mode);
        assert_eq!(request.report_types, vec!["compliance"]);
        assert!(request.validate().is_ok());

        let back = serde_json::to_value(&request).unwrap();
        assert_eq!(back["dateRange"]["start"], "2026-09-01");
        assert!(back.get("userEmail").is_none());
    }

    #[test]
    fn test_send_report_requires_target() {
        let request: SendReportRequest = serde_json::from_value(json!({
            "dateRange": { "start": "2026-09-01", "end": "2026-09-30" }
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_send_report_rejects_reversed_range() {
        let request: SendReportRequest = serde_json::from_value(json!({
            "userEmail": "ops@example.com",
            "dateRange": { "start": "2026-09-30", "end": "2026-09-01" }
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_uses_sent_to() {
        let response = SendReportResponse {
            sent_to: vec!["a@example.com".into()],
            failed: vec![],
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "sentTo": ["a@example.com"] })
        );
    }

    #[test]
    fn test_report_preference_validation() {
        let request = UpdateReportPreferenceRequest {
            company_id: None,
            enabled: true,
            day_of_week: 1,
            send_time: "08:30".into(),
            timezone: "Australia/Sydney".into(),
            report_types: vec![],
            include_charts: false,
        };
        assert!(request.validate().is_ok());

        let bad = UpdateReportPreferenceRequest {
            day_of_week: 9,
            send_time: "8.30am".into(),
            timezone: "Nowhere/City".into(),
            ..request
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("day_of_week"));
        assert!(fields.contains_key("send_time"));
        assert!(fields.contains_key("timezone"));
    }
}
