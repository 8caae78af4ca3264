//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Contact API (v1)
        .route(
            "/v1/contacts/check-number",
            post(handlers::contacts::check_number),
        )
        // Session API (v1)
        .route(
            "/v1/sessions",
            get(handlers::sessions::list_sessions).post(handlers::sessions::create_session),
        )
        .route(
            "/v1/sessions/{id}",
            get(handlers::sessions::get_session)
                .patch(handlers::sessions::update_session)
                .delete(handlers::sessions::delete_session),
        )
        .route(
            "/v1/sessions/{id}/default",
            post(handlers::sessions::set_default_session),
        )
        .route(
            "/v1/sessions/{id}/start",
            post(handlers::sessions::start_session),
        )
        .route(
            "/v1/sessions/{id}/stop",
            post(handlers::sessions::stop_session),
        )
        // Attach state
        .with_state(state)
}
