//! Clients - HTTP Clients for External APIs
//!
//! This module contains HTTP clients for communicating with Elora and with
//! the backend's own report endpoint.

pub mod elora_client;
pub mod report_endpoint_client;

pub use elora_client::EloraClient;
pub use report_endpoint_client::ReportEndpointClient;
