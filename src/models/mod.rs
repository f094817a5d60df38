//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos: tablas de Postgres (Supabase)
//! y los vehículos que devuelve Elora.

pub mod company;
pub mod maintenance;
pub mod notification;
pub mod preference;
pub mod report;
pub mod user;
pub mod vehicle;

pub use company::Company;
pub use maintenance::MaintenanceRecord;
pub use notification::{NewNotification, Notification, NotificationType, Severity};
pub use preference::{NotificationPreference, ReportPreference};
pub use report::{DateRange, ReportSummary};
pub use user::{User, UserRole};
pub use vehicle::Vehicle;
