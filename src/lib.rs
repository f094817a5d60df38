//! Fleet compliance backend
//!
//! Evaluación de reglas de notificación (mantenimiento y cumplimiento de
//! lavados), deduplicación, dispatch por email y reportes programados.
//! El binario principal sirve la API; `monthly_reports` y `weekly_digest`
//! son los cron drivers.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
