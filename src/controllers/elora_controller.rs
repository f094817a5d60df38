use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::clients::EloraClient;
use crate::models::{DateRange, Vehicle};
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::{validate_date_order, validate_not_empty};

/// Query común de los endpoints proxy de Elora
#[derive(Debug, Deserialize)]
pub struct EloraQuery {
    pub customer: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl EloraQuery {
    fn check_customer(&self) -> Result<(), AppError> {
        validate_not_empty(&self.customer).map_err(|_| bad_request_error("customer is required"))
    }

    pub fn date_range(&self) -> Result<Option<DateRange>, AppError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                validate_date_order(start, end)
                    .map_err(|_| bad_request_error("start must not be after end"))?;
                Ok(Some(DateRange::new(start, end)))
            }
            (None, None) => Ok(None),
            _ => Err(bad_request_error("start and end must be provided together")),
        }
    }
}

pub struct EloraController<'a> {
    client: &'a EloraClient,
}

impl<'a> EloraController<'a> {
    pub fn new(client: &'a EloraClient) -> Self {
        Self { client }
    }

    pub async fn vehicles(&self, query: &EloraQuery) -> Result<Vec<Vehicle>, AppError> {
        query.check_customer()?;
        let range = query.date_range()?;
        self.client.list_vehicles(&query.customer, range).await
    }

    pub async fn dashboard(&self, query: &EloraQuery) -> Result<Value, AppError> {
        query.check_customer()?;
        let range = query.date_range()?;
        self.client.dashboard(&query.customer, range).await
    }
}
