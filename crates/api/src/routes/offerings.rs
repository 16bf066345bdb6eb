//! Offering submission handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{Offering, OfferingColumns, SubmitOfferingRequest};
use domain::services::prepare_submission;
use persistence::repositories::OfferingRepository;
use tracing::info;
use uuid::Uuid;

use super::forms::resolve_scope;
use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_form_validation_failure;

/// Resolves and validates a submission. Nothing is written when it fails.
async fn submission_columns(
    state: &AppState,
    request: SubmitOfferingRequest,
) -> Result<OfferingColumns, ApiError> {
    let form = resolve_scope(state, &request.scope).await?;
    prepare_submission(&form.fields, request.values).map_err(|errors| {
        record_form_validation_failure();
        ApiError::from(errors)
    })
}

/// Submit a form and create an offering.
///
/// POST /api/v1/offerings
pub async fn create_offering(
    State(state): State<AppState>,
    Json(request): Json<SubmitOfferingRequest>,
) -> Result<(StatusCode, Json<Offering>), ApiError> {
    let scope = request.scope.clone();
    let columns = submission_columns(&state, request).await?;

    let offering: Offering = OfferingRepository::new(state.pool.clone())
        .create(&scope, &columns)
        .await?
        .into();

    info!(
        offering_id = %offering.id,
        service_type_id = %offering.service_type_id,
        category_id = %offering.category_id,
        custom_attributes = offering.custom_attributes.len(),
        "Offering created"
    );

    Ok((StatusCode::CREATED, Json(offering)))
}

/// Submit a form and replace an existing offering.
///
/// PUT /api/v1/offerings/:offering_id
pub async fn update_offering(
    State(state): State<AppState>,
    Path(offering_id): Path<Uuid>,
    Json(request): Json<SubmitOfferingRequest>,
) -> Result<Json<Offering>, ApiError> {
    let scope = request.scope.clone();
    let columns = submission_columns(&state, request).await?;

    let offering: Offering = OfferingRepository::new(state.pool.clone())
        .update(offering_id, &scope, &columns)
        .await?
        .ok_or_else(|| ApiError::NotFound("Offering not found".to_string()))?
        .into();

    info!(
        offering_id = %offering.id,
        service_type_id = %offering.service_type_id,
        "Offering updated"
    );

    Ok(Json(offering))
}

/// GET /api/v1/offerings/:offering_id
pub async fn get_offering(
    State(state): State<AppState>,
    Path(offering_id): Path<Uuid>,
) -> Result<Json<Offering>, ApiError> {
    let offering = OfferingRepository::new(state.pool.clone())
        .find_by_id(offering_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Offering not found".to_string()))?;

    Ok(Json(offering.into()))
}
