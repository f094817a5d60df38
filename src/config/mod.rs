//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos y variables de entorno.

pub mod database;
pub mod environment;
pub mod logging;

pub use database::DatabaseConfig;
pub use environment::*;
pub use logging::init_cron_logging;
