use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::api::handlers::{self, AppState};

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.settings.pagination.max_request_body_size;

    let api_routes = Router::new()
        // Catalog
        .route("/recipes", get(handlers::list_recipes))
        .route("/recipes/search", get(handlers::search_recipes))
        .route("/recipes/by-name", get(handlers::recipe_by_name))
        .route("/recipes/names", get(handlers::list_recipe_names))
        // Derived sets
        .route("/ingredients", get(handlers::list_ingredients))
        .route("/diets", get(handlers::list_diets))
        .route("/meal-types", get(handlers::list_meal_types))
        // Shopping list
        .route("/shopping-list", get(handlers::get_shopping_list))
        .route("/shopping-list/add", post(handlers::add_ingredients))
        .route("/shopping-list/remove", post(handlers::remove_ingredients))
        .route("/shopping-list/clear", post(handlers::clear_shopping_list))
        // Semantic search
        .route("/semantic/by-text", get(handlers::semantic_by_text))
        .route("/semantic/by-ingredient", get(handlers::semantic_by_ingredient))
        .route("/semantic/by-diet", get(handlers::semantic_by_diet))
        .route("/semantic/by-meal-type", get(handlers::semantic_by_meal_type))
        // Stats
        .route("/stats", get(handlers::get_stats))
        .with_state(state);

    let health_routes = Router::new().route("/health", get(handlers::health_check));

    // Main router with middleware
    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            // Request body size limit - prevent memory exhaustion from large payloads
            RequestBodyLimitLayer::new(max_body_size),
        )
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
