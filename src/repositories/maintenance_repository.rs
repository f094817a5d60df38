use sqlx::PgPool;
use uuid::Uuid;

use crate::models::MaintenanceRecord;
use crate::utils::errors::AppResult;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> AppResult<Vec<MaintenanceRecord>> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT id, company_id, vehicle_id, vehicle_name, site_id, next_service_date, service_type
            FROM maintenance_records
            WHERE company_id = $1 AND next_service_date IS NOT NULL
            ORDER BY next_service_date
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
