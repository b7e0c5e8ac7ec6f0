use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use shared::inputs::vital_reading;
use shared::models::{
    AddVitalReadingRequest, AddVitalReadingResponse, HealthInsightsResponse, Notice, NoticeLevel,
};
use shared::vitals::{VitalLog, VitalSummary};
use tracing::info;
use uuid::Uuid;

use super::AppState;
use super::errors::{invalid_input_response, json_rejection_response, session_error_response};

const ENTRY_ADDED_MESSAGE: &str = "Health entry added!";

pub(super) async fn add_reading(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<AddVitalReadingRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };

    let date = req.date.unwrap_or_else(|| Utc::now().date_naive());
    let reading = match vital_reading(date, req.blood_pressure, req.cholesterol, req.heart_rate) {
        Ok(reading) => reading,
        Err(err) => return invalid_input_response(err),
    };

    let entry_count = match state
        .sessions
        .with_session(session_id, |context| context.vitals_mut().append(reading))
    {
        Ok(entry_count) => entry_count,
        Err(err) => return session_error_response(err),
    };
    info!(session_id = %session_id, entry_count, "vital reading appended");

    (
        StatusCode::CREATED,
        Json(AddVitalReadingResponse {
            entry_count,
            reading,
            summary: VitalSummary::for_reading(reading),
            notice: Notice::new(NoticeLevel::Success, ENTRY_ADDED_MESSAGE),
        }),
    )
        .into_response()
}

pub(super) async fn health_insights(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    let insights = state.sessions.with_session(session_id, |context| {
        let vitals = context.vitals();
        let summary = vitals.latest_summary();
        HealthInsightsResponse {
            readings: vitals.readings().to_vec(),
            trends: vitals.trends(),
            notice: summary.is_none().then(VitalLog::empty_notice),
            summary,
        }
    });

    match insights {
        Ok(insights) => Json(insights).into_response(),
        Err(err) => session_error_response(err),
    }
}
