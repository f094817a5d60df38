//! Calendario de reportes programados
//!
//! Cálculo de rangos de fechas y de elegibilidad del digest semanal. Todo es
//! puro: el instante actual se recibe como parámetro y las zonas horarias son
//! explícitas (`chrono-tz`), nunca la hora local de la máquina.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::dto::report_dto::SendReportRequest;
use crate::models::{DateRange, ReportPreference};

/// Margen tras la hora configurada antes de enviar
pub const SEND_GRACE_MINUTES: i64 = 30;
/// Separación mínima entre dos digest (6,5 días)
pub const MIN_MINUTES_BETWEEN_SENDS: i64 = 6 * 24 * 60 + 12 * 60;

/// Motivo por el que un digest se envía o no
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Send,
    WrongDay,
    TooEarly,
    SentRecently,
    InvalidSchedule,
}

/// Mes natural anterior a `now` en la zona horaria indicada
pub fn previous_month_range(now: DateTime<Utc>, tz: Tz) -> DateRange {
    let today = now.with_timezone(&tz).date_naive();
    let first_of_month = first_day_of_month(today);
    let end = first_of_month.pred_opt().unwrap_or(first_of_month);
    DateRange::new(first_day_of_month(end), end)
}

/// Últimos 7 días terminando ayer en la zona horaria indicada
pub fn trailing_week_range(now: DateTime<Utc>, tz: Tz) -> DateRange {
    let today = now.with_timezone(&tz).date_naive();
    let end = today - Duration::days(1);
    DateRange::new(end - Duration::days(6), end)
}

fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Zona horaria de la preferencia, si es válida
pub fn preference_timezone(pref: &ReportPreference) -> Option<Tz> {
    pref.timezone.parse::<Tz>().ok()
}

pub fn eligibility(pref: &ReportPreference, now: DateTime<Utc>) -> Eligibility {
    let Some(tz) = preference_timezone(pref) else {
        return Eligibility::InvalidSchedule;
    };
    let Ok(send_time) = NaiveTime::parse_from_str(&pref.send_time, "%H:%M") else {
        return Eligibility::InvalidSchedule;
    };

    let local = now.with_timezone(&tz);
    if i64::from(local.weekday().num_days_from_sunday()) != i64::from(pref.day_of_week) {
        return Eligibility::WrongDay;
    }

    let scheduled = local.date_naive().and_time(send_time);
    if local.naive_local() < scheduled + Duration::minutes(SEND_GRACE_MINUTES) {
        return Eligibility::TooEarly;
    }

    if let Some(last_sent) = pref.last_sent {
        if now - last_sent < Duration::minutes(MIN_MINUTES_BETWEEN_SENDS) {
            return Eligibility::SentRecently;
        }
    }

    Eligibility::Send
}

/// ¿Hay que enviar el digest de esta preferencia ahora?
pub fn should_send_now(pref: &ReportPreference, now: DateTime<Utc>) -> bool {
    eligibility(pref, now) == Eligibility::Send
}

/// Request del reporte mensual de una empresa
pub fn monthly_request(company_id: Uuid, now: DateTime<Utc>, tz: Tz) -> SendReportRequest {
    SendReportRequest {
        cron_mode: true,
        company_id: Some(company_id),
        user_email: None,
        date_range: previous_month_range(now, tz),
        report_types: Vec::new(),
        include_charts: false,
    }
}

/// Request del digest semanal, solo si la preferencia es elegible ahora
pub fn weekly_request(pref: &ReportPreference, now: DateTime<Utc>) -> Option<SendReportRequest> {
    if !should_send_now(pref, now) {
        return None;
    }
    let tz = preference_timezone(pref)?;
    Some(SendReportRequest {
        cron_mode: true,
        company_id: pref.company_id,
        user_email: Some(pref.user_email.clone()),
        date_range: trailing_week_range(now, tz),
        report_types: pref.report_types.clone(),
        include_charts: pref.include_charts,
    })
}
