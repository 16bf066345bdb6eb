//! Field template handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{
    ApplyTemplateRequest, ApplyTemplateResponse, FieldDefinition, FieldDefinitionDraft,
    FieldTemplate, ListTemplatesResponse,
};
use domain::services::validate_definition;
use persistence::repositories::{FieldDefinitionRepository, FieldTemplateRepository};
use tracing::info;
use validator::Validate;

use super::admin_fields::{ensure_definition_scope, list_service_type_fields};
use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_templates_applied;

/// List the available field templates.
///
/// GET /api/v1/admin/field-templates
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<ListTemplatesResponse>, ApiError> {
    let data = FieldTemplateRepository::new(state.pool.clone())
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ListTemplatesResponse { data }))
}

/// Apply a template, or every template of a bundle, to a service type.
///
/// POST /api/v1/admin/service-types/:service_type_id/fields/apply-template
pub async fn apply_template(
    State(state): State<AppState>,
    Path(service_type_id): Path<String>,
    Json(request): Json<ApplyTemplateRequest>,
) -> Result<Json<ApplyTemplateResponse>, ApiError> {
    request.validate()?;
    ensure_definition_scope(&state, &service_type_id, None, None).await?;

    let templates: Vec<FieldTemplate> = FieldTemplateRepository::new(state.pool.clone())
        .find_for_apply(&request.template_name)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    if templates.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Template '{}' not found",
            request.template_name
        )));
    }

    let drafts = templates
        .iter()
        .map(|template| validate_definition(&template.to_request()))
        .collect::<Result<Vec<FieldDefinitionDraft>, _>>()?;

    let rows = FieldDefinitionRepository::new(state.pool.clone())
        .upsert_service_type_fields(&service_type_id, &drafts)
        .await?;

    let (inserted, updated): (Vec<_>, Vec<_>) = rows.into_iter().partition(|row| row.inserted);
    let inserted: Vec<String> = inserted.into_iter().map(|r| r.field.field_name).collect();
    let updated: Vec<String> = updated.into_iter().map(|r| r.field.field_name).collect();

    info!(
        template = %request.template_name,
        service_type_id = %service_type_id,
        inserted = ?inserted,
        updated = ?updated,
        "Field template applied"
    );
    record_templates_applied(inserted.len() + updated.len());

    let fields: Vec<FieldDefinition> = list_service_type_fields(&state, &service_type_id)
        .await?
        .data;

    Ok(Json(ApplyTemplateResponse {
        template_name: request.template_name,
        service_type_id,
        inserted,
        updated,
        fields,
    }))
}
