mod chapters;
mod flashcards;
mod health;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::response::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/chapters",
            get(chapters::list).post(chapters::create),
        )
        .route(
            "/api/chapters/:id",
            get(chapters::get_one)
                .put(chapters::update)
                .delete(chapters::delete),
        )
        .route(
            "/api/flashcards",
            get(flashcards::list).post(flashcards::create),
        )
        .route(
            "/api/flashcards/:id",
            get(flashcards::get_one)
                .put(flashcards::update)
                .delete(flashcards::delete),
        )
        .nest("/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    AppError::not_found("Route not found").into_response()
}

pub(crate) fn internal_error(context: &'static str, err: sqlx::Error) -> AppError {
    tracing::warn!(error = %err, context, "database operation failed");
    AppError::internal(context)
}
