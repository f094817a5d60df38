use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Company;
use crate::utils::errors::AppResult;

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, elora_customer_ref, is_active, scheduled_reports_enabled
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    pub async fn find_active(&self) -> AppResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, elora_customer_ref, is_active, scheduled_reports_enabled
            FROM companies
            WHERE is_active = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    /// Empresas activas con reportes mensuales habilitados
    pub async fn find_with_scheduled_reports(&self) -> AppResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, elora_customer_ref, is_active, scheduled_reports_enabled
            FROM companies
            WHERE is_active = TRUE AND scheduled_reports_enabled = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }
}
