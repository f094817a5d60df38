//! Repositorios
//!
//! Acceso a las tablas de Postgres (Supabase) con SQLx.

pub mod company_repository;
pub mod maintenance_repository;
pub mod notification_repository;
pub mod preference_repository;
pub mod user_repository;

pub use company_repository::CompanyRepository;
pub use maintenance_repository::MaintenanceRepository;
pub use notification_repository::{NotificationRepository, NotificationStore};
pub use preference_repository::PreferenceRepository;
pub use user_repository::UserRepository;
