//! Admin field definition handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    FieldDefinition, FieldDefinitionRequest, FieldListResponse, FieldMutationResponse,
    ListFieldsQuery,
};
use domain::services::validate_definition;
use persistence::repositories::{FieldDefinitionRepository, ListFieldsFilter, ScopeRepository};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_field_definition_mutated;

/// Checks that a definition's tier exists under its service type.
pub(crate) async fn ensure_definition_scope(
    state: &AppState,
    service_type_id: &str,
    category_id: Option<&str>,
    subcategory_id: Option<&str>,
) -> Result<(), ApiError> {
    let scopes = ScopeRepository::new(state.pool.clone());
    scopes
        .find_service_type(service_type_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Service type '{}' not found", service_type_id)))?;

    if let Some(category_id) = category_id {
        scopes
            .find_category(service_type_id, category_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "Category '{}' not found in service type '{}'",
                    category_id, service_type_id
                ))
            })?;

        if let Some(subcategory_id) = subcategory_id {
            scopes
                .find_subcategory(category_id, subcategory_id)
                .await?
                .ok_or_else(|| {
                    ApiError::NotFound(format!(
                        "Subcategory '{}' not found in category '{}'",
                        subcategory_id, category_id
                    ))
                })?;
        }
    }

    Ok(())
}

/// Every definition of a service type, as returned after each mutation.
pub(crate) async fn list_service_type_fields(
    state: &AppState,
    service_type_id: &str,
) -> Result<FieldListResponse, ApiError> {
    let data: Vec<FieldDefinition> = FieldDefinitionRepository::new(state.pool.clone())
        .list_by_service_type(service_type_id, &ListFieldsFilter::default())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(FieldListResponse {
        service_type_id: service_type_id.to_string(),
        data,
    })
}

/// List the field definitions of a service type.
///
/// GET /api/v1/admin/service-types/:service_type_id/fields
pub async fn list_fields(
    State(state): State<AppState>,
    Path(service_type_id): Path<String>,
    Query(query): Query<ListFieldsQuery>,
) -> Result<Json<FieldListResponse>, ApiError> {
    ensure_definition_scope(&state, &service_type_id, None, None).await?;

    let filter = ListFieldsFilter {
        category_id: query.category_id,
        subcategory_id: query.subcategory_id,
    };
    let data = FieldDefinitionRepository::new(state.pool.clone())
        .list_by_service_type(&service_type_id, &filter)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(FieldListResponse {
        service_type_id,
        data,
    }))
}

/// Create a field definition.
///
/// POST /api/v1/admin/service-types/:service_type_id/fields
pub async fn create_field(
    State(state): State<AppState>,
    Path(service_type_id): Path<String>,
    Json(request): Json<FieldDefinitionRequest>,
) -> Result<(StatusCode, Json<FieldMutationResponse>), ApiError> {
    let draft = validate_definition(&request)?;
    ensure_definition_scope(
        &state,
        &service_type_id,
        draft.category_id.as_deref(),
        draft.subcategory_id.as_deref(),
    )
    .await?;

    let field: FieldDefinition = FieldDefinitionRepository::new(state.pool.clone())
        .create(&service_type_id, &draft)
        .await?
        .into();

    info!(
        field_id = %field.id,
        service_type_id = %service_type_id,
        field_name = %field.field_name,
        tier = ?field.tier(),
        "Field definition created"
    );
    record_field_definition_mutated("create");

    let fields = list_service_type_fields(&state, &service_type_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(FieldMutationResponse {
            field: Some(field),
            deleted_id: None,
            fields,
        }),
    ))
}

/// Replace a field definition wholesale.
///
/// PUT /api/v1/admin/fields/:field_id
pub async fn update_field(
    State(state): State<AppState>,
    Path(field_id): Path<Uuid>,
    Json(request): Json<FieldDefinitionRequest>,
) -> Result<Json<FieldMutationResponse>, ApiError> {
    let draft = validate_definition(&request)?;

    let repo = FieldDefinitionRepository::new(state.pool.clone());
    let existing = repo
        .find_by_id(field_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Field definition not found".to_string()))?;

    ensure_definition_scope(
        &state,
        &existing.service_type_id,
        draft.category_id.as_deref(),
        draft.subcategory_id.as_deref(),
    )
    .await?;

    let field: FieldDefinition = repo
        .update(field_id, &draft)
        .await?
        .ok_or_else(|| ApiError::NotFound("Field definition not found".to_string()))?
        .into();

    info!(
        field_id = %field.id,
        service_type_id = %field.service_type_id,
        field_name = %field.field_name,
        "Field definition updated"
    );
    record_field_definition_mutated("update");

    let fields = list_service_type_fields(&state, &field.service_type_id).await?;
    Ok(Json(FieldMutationResponse {
        field: Some(field),
        deleted_id: None,
        fields,
    }))
}

/// Hard-delete a field definition. Stored offering values are left untouched.
///
/// DELETE /api/v1/admin/fields/:field_id
pub async fn delete_field(
    State(state): State<AppState>,
    Path(field_id): Path<Uuid>,
) -> Result<Json<FieldMutationResponse>, ApiError> {
    let deleted: FieldDefinition = FieldDefinitionRepository::new(state.pool.clone())
        .delete(field_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Field definition not found".to_string()))?
        .into();

    info!(
        field_id = %deleted.id,
        service_type_id = %deleted.service_type_id,
        field_name = %deleted.field_name,
        "Field definition deleted"
    );
    record_field_definition_mutated("delete");

    let fields = list_service_type_fields(&state, &deleted.service_type_id).await?;
    Ok(Json(FieldMutationResponse {
        field: None,
        deleted_id: Some(deleted.id),
        fields,
    }))
}
