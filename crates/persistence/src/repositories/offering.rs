//! Offering repository for database operations.

use domain::models::{FormScope, OfferingColumns};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::OfferingEntity;
use crate::metrics::QueryTimer;

macro_rules! offering_columns {
    () => {
        "id, service_type_id, category_id, subcategory_id, name, description, price, \
         vendor_id, images, is_available, attributes, custom_attributes, created_at, updated_at"
    };
}

/// Repository for offerings saved from submitted forms.
#[derive(Clone)]
pub struct OfferingRepository {
    pool: PgPool,
}

impl OfferingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        scope: &FormScope,
        columns: &OfferingColumns,
    ) -> Result<OfferingEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_offering");
        let result = sqlx::query_as::<_, OfferingEntity>(concat!(
            r#"
            INSERT INTO offerings (
                service_type_id, category_id, subcategory_id, name, description, price,
                vendor_id, images, is_available, attributes, custom_attributes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING "#,
            offering_columns!()
        ))
        .bind(&scope.service_type_id)
        .bind(&scope.category_id)
        .bind(&scope.subcategory_id)
        .bind(&columns.name)
        .bind(&columns.description)
        .bind(columns.price)
        .bind(&columns.vendor_id)
        .bind(Json(&columns.images))
        .bind(columns.is_available)
        .bind(Json(&columns.attributes))
        .bind(Json(&columns.custom_attributes))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replaces an offering's scope and columns. Returns `None` for an unknown id.
    pub async fn update(
        &self,
        id: Uuid,
        scope: &FormScope,
        columns: &OfferingColumns,
    ) -> Result<Option<OfferingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_offering");
        let result = sqlx::query_as::<_, OfferingEntity>(concat!(
            r#"
            UPDATE offerings
            SET service_type_id = $2, category_id = $3, subcategory_id = $4, name = $5,
                description = $6, price = $7, vendor_id = $8, images = $9,
                is_available = $10, attributes = $11, custom_attributes = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING "#,
            offering_columns!()
        ))
        .bind(id)
        .bind(&scope.service_type_id)
        .bind(&scope.category_id)
        .bind(&scope.subcategory_id)
        .bind(&columns.name)
        .bind(&columns.description)
        .bind(columns.price)
        .bind(&columns.vendor_id)
        .bind(Json(&columns.images))
        .bind(columns.is_available)
        .bind(Json(&columns.attributes))
        .bind(Json(&columns.custom_attributes))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OfferingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_offering");
        let result = sqlx::query_as::<_, OfferingEntity>(concat!(
            "SELECT ",
            offering_columns!(),
            " FROM offerings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
