use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::response::{IntoResponse, Response};
use shared::llm::{
    AnalysisCapability, GenerationRequest, GenerationTelemetryEvent, GenerativeGatewayError,
    PromptInput, generate_with_telemetry,
};
use shared::models::{
    AnalysisResponse, ImageAnalysisRequest, Notice, NoticeLevel, ReportAnalysisRequest,
    SymptomCheckRequest,
};
use shared::symptoms::{SymptomQuery, SymptomQueryError};
use shared::upload::{decode_image, extract_report_text};
use tracing::{info, warn};

use super::AppState;
use super::errors::{
    IMAGE_RETRY_HINT, bad_gateway_response, bad_request_response, json_rejection_response,
    upload_error_response,
};
use super::observability::RequestContext;

const SYMPTOMS_REQUIRED_MESSAGE: &str = "Please select at least one symptom.";

pub(super) async fn analyze_image(
    State(state): State<AppState>,
    Extension(request_context): Extension<RequestContext>,
    payload: Result<Json<ImageAnalysisRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };

    let image = match decode_image(&req.file, state.max_upload_bytes) {
        Ok(image) => image,
        Err(err) => return upload_error_response(err),
    };

    let request = GenerationRequest::from_prompt(PromptInput::ImageFindings).with_image(image);
    run_analysis(&state, &request_context.request_id, request).await
}

pub(super) async fn analyze_report(
    State(state): State<AppState>,
    Extension(request_context): Extension<RequestContext>,
    payload: Result<Json<ReportAnalysisRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };

    let report_text = match extract_report_text(&req.file, state.max_upload_bytes) {
        Ok(report_text) => report_text,
        Err(err) => return upload_error_response(err),
    };

    let request = GenerationRequest::from_prompt(PromptInput::ReportSummary {
        report_text: &report_text,
    });
    run_analysis(&state, &request_context.request_id, request).await
}

pub(super) async fn check_symptoms(
    State(state): State<AppState>,
    Extension(request_context): Extension<RequestContext>,
    payload: Result<Json<SymptomCheckRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };

    let query = match SymptomQuery::from_labels(&req.symptoms, &req.duration, &req.severity) {
        Ok(query) => query,
        Err(SymptomQueryError::NoSymptoms) => {
            return bad_request_response("symptoms_required", SYMPTOMS_REQUIRED_MESSAGE);
        }
        Err(err) => return bad_request_response("invalid_input", &err.to_string()),
    };

    let request = GenerationRequest::from_prompt(PromptInput::SymptomCheck { query: &query });
    run_analysis(&state, &request_context.request_id, request).await
}

async fn run_analysis(state: &AppState, request_id: &str, request: GenerationRequest) -> Response {
    let capability = request.capability;
    let (result, telemetry) = generate_with_telemetry(state.llm_gateway.as_ref(), request).await;
    log_generation_telemetry(request_id, &telemetry);

    match result {
        Ok(response) => Json(AnalysisResponse {
            title: capability.result_title().to_string(),
            analysis: response.text,
            model: response.model,
            notice: Notice::new(success_level(capability), capability.success_message()),
        })
        .into_response(),
        Err(err) => analysis_error_response(capability, err),
    }
}

const fn success_level(capability: AnalysisCapability) -> NoticeLevel {
    match capability {
        AnalysisCapability::SymptomCheck => NoticeLevel::Info,
        AnalysisCapability::ImageFindings | AnalysisCapability::ReportSummary => {
            NoticeLevel::Success
        }
    }
}

fn analysis_error_response(capability: AnalysisCapability, err: GenerativeGatewayError) -> Response {
    let hint = match capability {
        AnalysisCapability::ImageFindings => Some(IMAGE_RETRY_HINT),
        AnalysisCapability::ReportSummary | AnalysisCapability::SymptomCheck => None,
    };
    let code = match err {
        GenerativeGatewayError::ContentBlocked(_) => "content_blocked",
        _ => "analysis_failed",
    };

    bad_gateway_response(code, &format!("{}: {err}", capability.failure_label()), hint)
}

fn log_generation_telemetry(request_id: &str, telemetry: &GenerationTelemetryEvent) {
    if telemetry.outcome == "failure" {
        warn!(
            metric_name = "llm_request",
            capability = telemetry.capability,
            outcome = telemetry.outcome,
            request_id = request_id,
            provider = telemetry.provider,
            model = ?telemetry.model,
            has_image = telemetry.has_image,
            prompt_chars = telemetry.prompt_chars,
            latency_ms = telemetry.latency_ms,
            error_type = ?telemetry.error_type,
            "llm request metrics"
        );
    } else {
        info!(
            metric_name = "llm_request",
            capability = telemetry.capability,
            outcome = telemetry.outcome,
            request_id = request_id,
            provider = telemetry.provider,
            model = ?telemetry.model,
            has_image = telemetry.has_image,
            prompt_chars = telemetry.prompt_chars,
            latency_ms = telemetry.latency_ms,
            prompt_tokens = ?telemetry.prompt_tokens,
            completion_tokens = ?telemetry.completion_tokens,
            total_tokens = ?telemetry.total_tokens,
            estimated_cost_usd = ?telemetry.estimated_cost_usd,
            "llm request metrics"
        );
    }

    if let Some(alert) = telemetry.provider_degradation_alert.as_ref() {
        warn!(
            event = "llm_provider_degradation_alert",
            metric_name = "llm_provider_degradation",
            request_id = request_id,
            provider = telemetry.provider,
            consecutive_failures = alert.consecutive_failures,
            degraded_for_seconds = alert.degraded_for_seconds,
            "llm provider sustained degradation detected"
        );
    }

    if telemetry.provider_recovered {
        info!(
            event = "llm_provider_recovered",
            metric_name = "llm_provider_degradation",
            request_id = request_id,
            provider = telemetry.provider,
            "llm provider recovered after degradation"
        );
    }
}
