//! Controllers
//!
//! Capa entre los handlers de Axum y los servicios / repositorios.

pub mod elora_controller;
pub mod notification_controller;
pub mod preference_controller;
pub mod report_controller;
