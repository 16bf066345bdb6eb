use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{admin_fields, field_templates, forms, health, offerings, uploads};
use crate::services::upload::ObjectStore;

/// Multipart framing allowance on top of the upload size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub object_store: Arc<dyn ObjectStore>,
}

pub fn create_app(config: Config, pool: PgPool, object_store: Arc<dyn ObjectStore>) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        object_store,
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let form_routes = Router::new()
        .route("/api/v1/forms/fields", get(forms::resolve_fields))
        .route("/api/v1/forms/render", post(forms::render))
        .route("/api/v1/forms/validate", post(forms::validate));

    let offering_routes = Router::new()
        .route("/api/v1/offerings", post(offerings::create_offering))
        .route(
            "/api/v1/offerings/:offering_id",
            put(offerings::update_offering).get(offerings::get_offering),
        );

    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/service-types/:service_type_id/fields",
            get(admin_fields::list_fields).post(admin_fields::create_field),
        )
        .route(
            "/api/v1/admin/service-types/:service_type_id/fields/apply-template",
            post(field_templates::apply_template),
        )
        .route(
            "/api/v1/admin/fields/:field_id",
            put(admin_fields::update_field).delete(admin_fields::delete_field),
        )
        .route(
            "/api/v1/admin/field-templates",
            get(field_templates::list_templates),
        );

    // Multipart bodies get their own limit; the size check in the handler is exact.
    let upload_routes = Router::new().route(
        "/api/v1/uploads",
        post(uploads::upload_file).layer(DefaultBodyLimit::max(
            config.uploads.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES,
        )),
    );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(form_routes)
        .merge(offering_routes)
        .merge(admin_routes)
        .merge(upload_routes)
        .nest_service("/uploads", ServeDir::new(&config.uploads.storage_dir))
        // Global middleware (order matters: bottom layers run first)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
