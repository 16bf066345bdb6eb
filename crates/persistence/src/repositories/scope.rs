//! Scope repository for database operations.

use sqlx::PgPool;

use crate::entities::{CategoryEntity, ServiceTypeEntity, SubcategoryEntity};
use crate::metrics::QueryTimer;

/// Repository for service type, category and subcategory lookups.
#[derive(Clone)]
pub struct ScopeRepository {
    pool: PgPool,
}

impl ScopeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_service_type(
        &self,
        id: &str,
    ) -> Result<Option<ServiceTypeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_service_type");
        let result = sqlx::query_as::<_, ServiceTypeEntity>(
            r#"
            SELECT id, name, created_at
            FROM service_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds a category only if it belongs to the given service type.
    pub async fn find_category(
        &self,
        service_type_id: &str,
        id: &str,
    ) -> Result<Option<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_category");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            SELECT id, service_type_id, name
            FROM categories
            WHERE id = $1 AND service_type_id = $2
            "#,
        )
        .bind(id)
        .bind(service_type_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds a subcategory only if it belongs to the given category.
    pub async fn find_subcategory(
        &self,
        category_id: &str,
        id: &str,
    ) -> Result<Option<SubcategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_subcategory");
        let result = sqlx::query_as::<_, SubcategoryEntity>(
            r#"
            SELECT id, category_id, name
            FROM subcategories
            WHERE id = $1 AND category_id = $2
            "#,
        )
        .bind(id)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
