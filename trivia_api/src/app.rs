use axum::{
    Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use sqlx::sqlite::SqlitePool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::routes;

/// Build the full API router around a connection pool
pub fn create_router(pool: SqlitePool) -> Router {
    // The trivia frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Outermost first. Fixed allow-headers go on every response the CORS
    // layer leaves alone.
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type,Authorization,true"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,PUT,POST,DELETE,OPTIONS"),
        ));

    Router::new()
        // Root and health
        .route("/", get(|| async { "Trivia API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Category endpoints
        .route("/categories", get(routes::categories::get_categories))
        .route("/categories/{id}/questions", get(routes::categories::get_category_questions))

        // Question endpoints
        .route(
            "/questions",
            get(routes::questions::get_questions).post(routes::questions::create_or_search_questions),
        )
        // GET deletes too; existing clients rely on it
        .route(
            "/questions/{id}",
            get(routes::questions::delete_question).delete(routes::questions::delete_question),
        )

        // Quiz endpoints
        .route("/quizzes", post(routes::quizzes::next_quiz_question))

        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .layer(middleware)
        .with_state(pool)
}
