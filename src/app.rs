use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/today", get(handlers::get_today))
        .route("/api/log/:date", get(handlers::get_log))
        .route("/api/log/:date/habit", post(handlers::toggle_habit))
        .route("/api/log/:date/journal", post(handlers::update_journal))
        .route("/api/habits", get(handlers::habit_panel))
        .route("/api/chart", get(handlers::chart))
        .route("/api/report", post(handlers::report))
        .with_state(state)
}
