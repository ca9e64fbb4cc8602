use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/habits", get(handlers::list_habits))
        .route("/api/habits", post(handlers::create_habit))
        .route("/api/habits/:id", get(handlers::get_habit))
        .route("/api/habits/:id", patch(handlers::update_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/habits/:id/increment", post(handlers::increment_habit))
        .route("/api/habits/:id/decrement", post(handlers::decrement_habit))
        .route("/api/habits/:id/reset", post(handlers::reset_habit))
        .route("/api/habits/:id/heatmap", get(handlers::habit_heatmap))
        .route("/api/foreground", post(handlers::foreground))
        .with_state(state)
}
