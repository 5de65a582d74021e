use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::handlers::{self, AppState};
use crate::middleware::{log_request, request_logger::MAX_LOGGED_BODY_BYTES, require_bearer_token};

/// Builds the application router.
///
/// `protect` decorates the token-protected lead routes with extra layers
/// (the binary adds rate limiting there); `/health` and the docs are left
/// outside of it.
///
/// # Arguments
///
/// * `state` - The shared application state.
/// * `protect` - Extra layers for the lead routes.
pub fn build_router<F>(state: Arc<AppState>, protect: F) -> Router
where
    F: FnOnce(Router<Arc<AppState>>) -> Router<Arc<AppState>>,
{
    let lead_routes = Router::new()
        .route("/retired", post(handlers::create_retired_lead))
        .route("/retired/:id", get(handlers::get_retired_lead))
        .route(
            "/api/athletes-rights",
            post(handlers::create_athletes_rights_lead),
        )
        .route(
            "/api/athletes-rights/:id",
            get(handlers::get_athletes_rights_lead),
        )
        .route_layer(middleware::from_fn_with_state(
            state.config.api_tokens.clone(),
            require_bearer_token,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(protect(lead_routes))
        .layer(middleware::from_fn_with_state(
            state.storage.clone(),
            log_request,
        ))
        // Request size limit: 5MB max payload
        .layer(RequestBodyLimitLayer::new(MAX_LOGGED_BODY_BYTES))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
