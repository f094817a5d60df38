use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;
use crate::utils::errors::AppResult;

const USER_COLUMNS: &str = r#"
    id, company_id, email, full_name, role,
    COALESCE(assigned_sites, '{}') AS assigned_sites,
    COALESCE(assigned_vehicles, '{}') AS assigned_vehicles
"#;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE company_id = $1 ORDER BY email",
            USER_COLUMNS
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Admins de la empresa: destinatarios por defecto de los reportes
    pub async fn find_admins(&self, company_id: Uuid) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE company_id = $1 AND role = 'admin' ORDER BY email",
            USER_COLUMNS
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE lower(email) = lower($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
