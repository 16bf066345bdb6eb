//! Form resolution, rendering and validation handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use domain::models::{
    FieldDefinition, FormScope, RenderFormRequest, RenderFormResponse, ResolveFormQuery,
    ResolveFormResponse, ValidateFormRequest, ValidateFormResponse,
};
use domain::services::{
    default_form_fields, render_form, resolve_form_fields, AttributeResolutionInput, FormState,
    ResolvedForm,
};
use persistence::repositories::FieldDefinitionRepository;
use tracing::debug;
use validator::Validate;

use super::admin_fields::ensure_definition_scope;
use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::{record_form_resolved, record_form_validation_failure};

/// Validates a scope against the scope tables and merges its field tiers.
pub(crate) async fn resolve_scope(
    state: &AppState,
    scope: &FormScope,
) -> Result<ResolvedForm, ApiError> {
    scope.validate()?;

    ensure_definition_scope(
        state,
        &scope.service_type_id,
        Some(scope.category_id.as_str()),
        scope.subcategory_id.as_deref(),
    )
    .await?;

    let definitions: Vec<FieldDefinition> = FieldDefinitionRepository::new(state.pool.clone())
        .load_form_tiers(
            &scope.service_type_id,
            &scope.category_id,
            scope.subcategory_id.as_deref(),
        )
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let form = resolve_form_fields(AttributeResolutionInput::from_definitions(
        scope,
        default_form_fields(),
        definitions,
    ));

    debug!(
        service_type_id = %scope.service_type_id,
        category_id = %scope.category_id,
        subcategory_id = ?scope.subcategory_id,
        fields = form.fields.len(),
        configured = form.configured,
        "Form resolved"
    );
    record_form_resolved(form.configured);

    Ok(form)
}

/// Resolve the effective fields of a scope.
///
/// GET /api/v1/forms/fields?service_type_id=..&category_id=..&subcategory_id=..
pub async fn resolve_fields(
    State(state): State<AppState>,
    Query(query): Query<ResolveFormQuery>,
) -> Result<Json<ResolveFormResponse>, ApiError> {
    let scope = FormScope::new(query.service_type_id, query.category_id, query.subcategory_id);
    let form = resolve_scope(&state, &scope).await?;

    Ok(Json(ResolveFormResponse {
        service_type_id: scope.service_type_id,
        category_id: scope.category_id,
        subcategory_id: scope.subcategory_id,
        configured: form.configured,
        fields: form.fields,
    }))
}

/// Render the controls of a scope, pre-filled with the given values.
///
/// POST /api/v1/forms/render
pub async fn render(
    State(state): State<AppState>,
    Json(request): Json<RenderFormRequest>,
) -> Result<Json<RenderFormResponse>, ApiError> {
    let form = resolve_scope(&state, &request.scope).await?;

    let mut form_state = FormState::from_fields(&form.fields, request.values);
    if request.validate {
        form_state.validate(&form.fields);
    }
    let groups = render_form(&form.fields, &form_state);

    Ok(Json(RenderFormResponse {
        configured: form.configured,
        groups,
        errors: form_state.errors().clone(),
    }))
}

/// Validate values against the form of a scope.
///
/// POST /api/v1/forms/validate
pub async fn validate(
    State(state): State<AppState>,
    Json(request): Json<ValidateFormRequest>,
) -> Result<Json<ValidateFormResponse>, ApiError> {
    let form = resolve_scope(&state, &request.scope).await?;

    let mut form_state = FormState::from_fields(&form.fields, request.values);
    let valid = form_state.validate(&form.fields);
    if !valid {
        record_form_validation_failure();
    }

    Ok(Json(ValidateFormResponse {
        valid,
        errors: form_state.errors().clone(),
    }))
}
