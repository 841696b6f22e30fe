use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Upper bound for multipart uploads
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", wardrobe_routes())
        .route("/api/fusion-lab/generate", post(handlers::generate_fusion_design))
        .route(
            "/api/marketplace/search-fusion",
            post(handlers::search_fusion_marketplace),
        )
        .route("/api/marketplace/products", get(handlers::list_products))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Wardrobe and outfit routes under /api/v1
fn wardrobe_routes() -> Router<AppState> {
    Router::new()
        // Clothing collection
        .route("/clothing/collection", get(handlers::get_collection))
        .route("/clothing/add", post(handlers::add_item))
        .route("/clothing/update", put(handlers::update_item))
        .route("/clothing/delete", delete(handlers::delete_item))
        .route("/clothing/analyze-image", post(handlers::analyze_image))
        // Outfits
        .route("/outfit/generate", post(handlers::generate_outfit_for_event))
        // AI provider
        .route("/openai/status", get(handlers::provider_status))
        // Samples and demo reference data
        .route("/sample/outfit", get(handlers::sample_outfit))
        .route("/sample/images", get(handlers::sample_images))
        .route("/demo/user", get(handlers::demo_user))
        .route("/demo/clothing-collection", get(handlers::demo_clothing_collection))
        .route("/demo/outfit-results", get(handlers::demo_outfit_results))
        .route("/demo/fusion-styles", get(handlers::demo_fusion_styles))
        .route("/demo/marketplace", get(handlers::demo_marketplace))
        .route("/demo/scenarios", get(handlers::demo_scenarios))
}

/// CORS policy for the configured browser origins; unparsable origins are skipped
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
