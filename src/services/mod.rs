//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: reglas de
//! notificación, deduplicación, dispatch, envío de emails y reportes.

pub mod deduplicator;
pub mod mailer;
pub mod notification_dispatcher;
pub mod notification_service;
pub mod report_schedule;
pub mod report_service;
pub mod rule_evaluator;

pub use mailer::{LogMailer, Mailer, SmtpMailer};
pub use notification_service::NotificationService;
pub use report_service::ReportService;
