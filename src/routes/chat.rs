use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, ExportResponse},
    services::{
        metrics_manager::MetricsData,
        report_generator::export_transcript_pdf,
        session_config::{self, ConfigOptions, ConfigUpdate, SessionConfig},
        session_manager::{SessionSnapshot, TurnRole},
    },
    state::SharedState,
};

const RESET_COMMANDS: &[&str] = &["reset", "/reset", "clear chat", "/clear"];
const RESET_REPLY: &str = "The conversation has been reset. Your selections are unchanged.";

fn is_reset_command(message: &str) -> bool {
    RESET_COMMANDS.iter().any(|cmd| message.eq_ignore_ascii_case(cmd))
}

fn not_found(session_id: &str) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found"))
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    // Only ids this service could have issued are adopted; anything else starts a new session.
    let session_id = match payload.session_id.as_deref().map(|s| Uuid::parse_str(s.trim())) {
        Some(Ok(id)) => state.sessions.ensure_session(&id.to_string()).await,
        Some(Err(_)) => {
            warn!("ignoring malformed session id");
            state.sessions.create_session().await
        }
        None => state.sessions.create_session().await,
    };

    if is_reset_command(trimmed) {
        state.sessions.clear_history(&session_id).await;
        state.metrics.record_reset().await;
        info!(%session_id, "conversation reset");
        return Ok(Json(ChatResponse {
            session_id,
            reply: RESET_REPLY.to_string(),
            intent: "Reset".to_string(),
        }));
    }

    state.sessions.append_turn(&session_id, TurnRole::User, trimmed).await;

    let config = state.sessions.get_config(&session_id).await.unwrap_or_default();
    let reply = state.selector.respond(trimmed, &config);

    state.metrics.record(&reply, &config).await;

    state.sessions.append_turn(&session_id, TurnRole::Assistant, reply.text.as_str()).await;
    debug!(%session_id, intent = reply.intent.as_str(), "reply generated");

    Ok(Json(ChatResponse {
        session_id,
        reply: reply.text,
        intent: reply.intent.as_str().to_string(),
    }))
}

pub async fn get_session_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state
        .sessions
        .snapshot(&session_id)
        .await
        .map(Json)
        .ok_or_else(|| not_found(&session_id))
}

pub async fn update_config_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(update): Json<ConfigUpdate>,
) -> Result<Json<SessionConfig>, AppError> {
    let config = state
        .sessions
        .update_config(&session_id, update)
        .await?
        .ok_or_else(|| not_found(&session_id))?;
    info!(%session_id, role = %config.role, grade = %config.grade_level, material = %config.material_type, "selections updated");
    Ok(Json(config))
}

pub async fn clear_history_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.clear_history(&session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&session_id))
    }
}

pub async fn export_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<ExportResponse>, AppError> {
    if Uuid::parse_str(&session_id).is_err() {
        return Err(not_found(&session_id));
    }
    let snapshot = state
        .sessions
        .snapshot(&session_id)
        .await
        .ok_or_else(|| not_found(&session_id))?;
    let url = export_transcript_pdf(&state.config.export_dir, &snapshot).await?;
    info!(%session_id, %url, "transcript exported");
    Ok(Json(ExportResponse { url }))
}

pub async fn options_handler() -> Json<ConfigOptions> {
    Json(session_config::options())
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
