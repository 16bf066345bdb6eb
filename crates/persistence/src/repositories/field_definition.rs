//! Field definition repository for database operations.

use domain::models::FieldDefinitionDraft;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{FieldDefinitionEntity, FieldTypeDb, InputTypeDb, UpsertedFieldEntity};
use crate::metrics::QueryTimer;

macro_rules! field_columns {
    () => {
        "id, service_type_id, category_id, subcategory_id, field_name, field_label, \
         field_type, input_type, field_group, validation_rules, field_options, \
         default_value, placeholder, help_text, is_required, is_searchable, \
         is_filterable, is_translatable, is_visible, is_mandatory, inherit_flags, \
         sort_order, created_at, updated_at"
    };
}

/// Optional tier filters for listing a service type's fields.
#[derive(Debug, Clone, Default)]
pub struct ListFieldsFilter {
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
}

/// Repository for field definition database operations.
#[derive(Clone)]
pub struct FieldDefinitionRepository {
    pool: PgPool,
}

impl FieldDefinitionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        service_type_id: &str,
        draft: &FieldDefinitionDraft,
    ) -> Result<FieldDefinitionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_field_definition");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(concat!(
            r#"
            INSERT INTO field_definitions (
                service_type_id, category_id, subcategory_id, field_name, field_label,
                field_type, input_type, field_group, validation_rules, field_options,
                default_value, placeholder, help_text, is_required, is_searchable,
                is_filterable, is_translatable, is_visible, is_mandatory, inherit_flags,
                sort_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21)
            RETURNING "#,
            field_columns!()
        ))
        .bind(service_type_id)
        .bind(&draft.category_id)
        .bind(&draft.subcategory_id)
        .bind(&draft.field_name)
        .bind(&draft.field_label)
        .bind(FieldTypeDb::from(draft.field_type))
        .bind(draft.input_type.map(InputTypeDb::from))
        .bind(&draft.field_group)
        .bind(Json(&draft.validation_rules))
        .bind(draft.field_options.as_ref().map(Json))
        .bind(&draft.default_value)
        .bind(&draft.placeholder)
        .bind(&draft.help_text)
        .bind(draft.is_required)
        .bind(draft.is_searchable)
        .bind(draft.is_filterable)
        .bind(draft.is_translatable)
        .bind(draft.is_visible)
        .bind(draft.is_mandatory)
        .bind(draft.inherit_flags)
        .bind(draft.sort_order)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FieldDefinitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_field_definition");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(concat!(
            "SELECT ",
            field_columns!(),
            " FROM field_definitions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replaces a definition wholesale. The service type never changes.
    /// Last write wins; there is no version check.
    pub async fn update(
        &self,
        id: Uuid,
        draft: &FieldDefinitionDraft,
    ) -> Result<Option<FieldDefinitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_field_definition");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(concat!(
            r#"
            UPDATE field_definitions
            SET category_id = $2, subcategory_id = $3, field_name = $4, field_label = $5,
                field_type = $6, input_type = $7, field_group = $8, validation_rules = $9,
                field_options = $10, default_value = $11, placeholder = $12,
                help_text = $13, is_required = $14, is_searchable = $15,
                is_filterable = $16, is_translatable = $17, is_visible = $18,
                is_mandatory = $19, inherit_flags = $20, sort_order = $21,
                updated_at = NOW()
            WHERE id = $1
            RETURNING "#,
            field_columns!()
        ))
        .bind(id)
        .bind(&draft.category_id)
        .bind(&draft.subcategory_id)
        .bind(&draft.field_name)
        .bind(&draft.field_label)
        .bind(FieldTypeDb::from(draft.field_type))
        .bind(draft.input_type.map(InputTypeDb::from))
        .bind(&draft.field_group)
        .bind(Json(&draft.validation_rules))
        .bind(draft.field_options.as_ref().map(Json))
        .bind(&draft.default_value)
        .bind(&draft.placeholder)
        .bind(&draft.help_text)
        .bind(draft.is_required)
        .bind(draft.is_searchable)
        .bind(draft.is_filterable)
        .bind(draft.is_translatable)
        .bind(draft.is_visible)
        .bind(draft.is_mandatory)
        .bind(draft.inherit_flags)
        .bind(draft.sort_order)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Permanently deletes a definition. Offerings keep any stored values.
    pub async fn delete(&self, id: Uuid) -> Result<Option<FieldDefinitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("delete_field_definition");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(concat!(
            "DELETE FROM field_definitions WHERE id = $1 RETURNING ",
            field_columns!()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Lists a service type's definitions, optionally narrowed to one tier.
    pub async fn list_by_service_type(
        &self,
        service_type_id: &str,
        filter: &ListFieldsFilter,
    ) -> Result<Vec<FieldDefinitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_field_definitions");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(concat!(
            "SELECT ",
            field_columns!(),
            r#"
            FROM field_definitions
            WHERE service_type_id = $1
              AND ($2::text IS NULL OR category_id = $2)
              AND ($3::text IS NULL OR subcategory_id = $3)
            ORDER BY field_group, sort_order, created_at
            "#
        ))
        .bind(service_type_id)
        .bind(&filter.category_id)
        .bind(&filter.subcategory_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Loads every definition visible to a scope in insertion order: the
    /// service type tier, the category tier and, when given, the subcategory tier.
    pub async fn load_form_tiers(
        &self,
        service_type_id: &str,
        category_id: &str,
        subcategory_id: Option<&str>,
    ) -> Result<Vec<FieldDefinitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("load_form_tiers");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(concat!(
            "SELECT ",
            field_columns!(),
            r#"
            FROM field_definitions
            WHERE service_type_id = $1
              AND (
                category_id IS NULL
                OR (category_id = $2 AND (subcategory_id IS NULL OR subcategory_id = $3))
              )
            ORDER BY created_at, id
            "#
        ))
        .bind(service_type_id)
        .bind(category_id)
        .bind(subcategory_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Upserts service-type definitions in one transaction, last writer wins
    /// on a name conflict.
    ///
    /// Admin-owned flags (`is_mandatory`, `is_visible`) are kept, as is the
    /// default of a mandatory row when the incoming one is empty.
    pub async fn upsert_service_type_fields(
        &self,
        service_type_id: &str,
        drafts: &[FieldDefinitionDraft],
    ) -> Result<Vec<UpsertedFieldEntity>, sqlx::Error> {
        let timer = QueryTimer::new("upsert_service_type_fields");
        let mut tx = self.pool.begin().await?;

        let mut rows = Vec::with_capacity(drafts.len());
        for draft in drafts {
            match upsert_one(&mut tx, service_type_id, draft).await {
                Ok(row) => rows.push(row),
                Err(e) => {
                    timer.record();
                    return Err(e);
                }
            }
        }

        let result = tx.commit().await.map(|_| rows);
        timer.record();
        result
    }
}

async fn upsert_one(
    tx: &mut Transaction<'_, Postgres>,
    service_type_id: &str,
    draft: &FieldDefinitionDraft,
) -> Result<UpsertedFieldEntity, sqlx::Error> {
    sqlx::query_as::<_, UpsertedFieldEntity>(concat!(
        r#"
        INSERT INTO field_definitions (
            service_type_id, field_name, field_label, field_type, input_type,
            field_group, validation_rules, field_options, default_value, placeholder,
            help_text, is_required, sort_order
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        ON CONFLICT ON CONSTRAINT field_definitions_scope_name_unique DO UPDATE
        SET field_label = EXCLUDED.field_label,
            field_type = EXCLUDED.field_type,
            input_type = EXCLUDED.input_type,
            field_group = EXCLUDED.field_group,
            validation_rules = EXCLUDED.validation_rules,
            field_options = EXCLUDED.field_options,
            default_value = CASE
                WHEN field_definitions.is_mandatory AND EXCLUDED.default_value IS NULL
                    THEN field_definitions.default_value
                ELSE EXCLUDED.default_value
            END,
            placeholder = EXCLUDED.placeholder,
            help_text = EXCLUDED.help_text,
            is_required = EXCLUDED.is_required,
            sort_order = EXCLUDED.sort_order,
            updated_at = NOW()
        RETURNING (xmax = 0) AS inserted, "#,
        field_columns!()
    ))
    .bind(service_type_id)
    .bind(&draft.field_name)
    .bind(&draft.field_label)
    .bind(FieldTypeDb::from(draft.field_type))
    .bind(draft.input_type.map(InputTypeDb::from))
    .bind(&draft.field_group)
    .bind(Json(&draft.validation_rules))
    .bind(draft.field_options.as_ref().map(Json))
    .bind(&draft.default_value)
    .bind(&draft.placeholder)
    .bind(&draft.help_text)
    .bind(draft.is_required)
    .bind(draft.sort_order)
    .fetch_one(&mut **tx)
    .await
}
