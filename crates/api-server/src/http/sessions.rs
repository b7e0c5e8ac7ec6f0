use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::{CreateSessionResponse, OkResponse};
use tracing::info;
use uuid::Uuid;

use super::AppState;
use super::errors::session_error_response;

pub(super) async fn create_session(State(state): State<AppState>) -> Response {
    let context = state.sessions.create();
    info!(session_id = %context.id(), "session created");

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: context.id(),
            page: context.page(),
            expires_in: state.sessions.ttl().as_secs(),
        }),
    )
        .into_response()
}

pub(super) async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    match state.sessions.end(session_id) {
        Ok(()) => {
            info!(session_id = %session_id, "session ended");
            (StatusCode::OK, Json(OkResponse { ok: true })).into_response()
        }
        Err(err) => session_error_response(err),
    }
}
