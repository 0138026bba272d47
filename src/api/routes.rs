use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_session_id, session_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Recommendation flow
        .route(
            "/",
            get(handlers::show_form).post(handlers::submit_recommendations),
        )
        .route("/temp_results", get(handlers::temp_results))
        .route("/api/recommendations", get(handlers::recommendations_api))
        .route("/neighbors_data", get(handlers::neighbors_data))
        // Raw table views
        .route("/movies", get(handlers::movies_table))
        .route("/ratings", get(handlers::ratings_table))
        .route("/tags", get(handlers::tags_table))
        // Session middleware runs outermost so the trace span below it can
        // read the token from the request extensions.
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(session_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_session_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
