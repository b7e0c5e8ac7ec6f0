use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use shared::models::NavigateRequest;
use shared::pages::render;
use uuid::Uuid;

use super::AppState;
use super::errors::{json_rejection_response, session_error_response};

pub(super) async fn current_page(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    match state
        .sessions
        .with_session(session_id, |context| render(context.page(), context))
    {
        Ok(view) => Json(view).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(super) async fn navigate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<NavigateRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };

    match state.sessions.with_session(session_id, |context| {
        context.navigate(req.page);
        render(req.page, context)
    }) {
        Ok(view) => Json(view).into_response(),
        Err(err) => session_error_response(err),
    }
}
