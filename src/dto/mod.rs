//! DTOs de request / response de la API

pub mod common_dto;
pub mod notification_dto;
pub mod report_dto;

pub use common_dto::ApiResponse;
