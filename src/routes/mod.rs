// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use chat::{
    chat_handler, clear_history_handler, export_handler, get_metrics_handler, get_session_handler,
    options_handler, update_config_handler,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(state: SharedState) -> Router {
    let admin_routes = Router::new()
        .route("/metrics", get(get_metrics_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/options", get(options_handler))
        .route("/sessions/{id}", get(get_session_handler))
        .route("/sessions/{id}/config", put(update_config_handler))
        .route("/sessions/{id}/history", delete(clear_history_handler))
        .route("/sessions/{id}/export", get(export_handler))
        .nest("/admin", admin_routes)
        .route("/health", get(|| async { "OK" }))
        .nest_service("/exports", ServeDir::new(&state.config.export_dir))
        .fallback_service(ServeDir::new(&state.config.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn auth_middleware(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // API Key check.
    match req.headers().get("x-admin-key") {
        Some(val) if val.as_bytes() == state.config.admin_api_key.as_bytes() => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
