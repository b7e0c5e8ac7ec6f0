use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use shared::inputs::health_profile;
use shared::models::{RiskAssessmentRequest, RiskAssessmentResponse};
use shared::risk::score;

use super::errors::{invalid_input_response, json_rejection_response};

pub(super) async fn assess_risk(
    payload: Result<Json<RiskAssessmentRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };

    let profile = match health_profile(req.age, req.bmi, req.smoker, &req.activity_level) {
        Ok(profile) => profile,
        Err(err) => return invalid_input_response(err),
    };

    let risk = score(&profile);
    Json(RiskAssessmentResponse {
        raw_score: risk.raw_score,
        tier: risk.tier,
        notice: risk.tier.notice(),
    })
    .into_response()
}
