//! Field template repository for database operations.

use sqlx::PgPool;

use crate::entities::FieldTemplateEntity;
use crate::metrics::QueryTimer;

/// Repository for read-only field templates.
#[derive(Clone)]
pub struct FieldTemplateRepository {
    pool: PgPool,
}

impl FieldTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<FieldTemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_field_templates");
        let result = sqlx::query_as::<_, FieldTemplateEntity>(
            r#"
            SELECT id, name, bundle, field_label, field_type, field_group, help_text,
                   placeholder, validation_rules, field_options, default_value,
                   is_required, sort_order, created_at
            FROM field_templates
            ORDER BY sort_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Templates applied for a name: the template itself, or every member of
    /// the bundle with that name.
    pub async fn find_for_apply(&self, name: &str) -> Result<Vec<FieldTemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_templates_for_apply");
        let result = sqlx::query_as::<_, FieldTemplateEntity>(
            r#"
            SELECT id, name, bundle, field_label, field_type, field_group, help_text,
                   placeholder, validation_rules, field_options, default_value,
                   is_required, sort_order, created_at
            FROM field_templates
            WHERE name = $1 OR bundle = $1
            ORDER BY sort_order, name
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
