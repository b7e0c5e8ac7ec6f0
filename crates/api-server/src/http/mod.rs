use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::{Router, middleware};
use shared::llm::GenerativeGateway;
use shared::session::SessionStore;

mod diagnosis;
mod errors;
mod health;
mod observability;
mod pages;
mod reference;
mod risk;
mod sessions;
mod vitals;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub llm_gateway: Arc<dyn GenerativeGateway>,
    pub max_upload_bytes: usize,
}

const JSON_ENVELOPE_OVERHEAD_BYTES: usize = 64 * 1024;

/// Largest request body that can still carry a `max_upload_bytes` file as base64.
pub fn request_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(JSON_ENVELOPE_OVERHEAD_BYTES)
}

pub fn build_router(app_state: AppState) -> Router {
    let body_limit = request_body_limit(app_state.max_upload_bytes);

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/v1/navigation", get(reference::navigation))
        .route("/v1/sessions", post(sessions::create_session))
        .route(
            "/v1/sessions/{session_id}",
            delete(sessions::end_session),
        )
        .route(
            "/v1/sessions/{session_id}/page",
            get(pages::current_page).put(pages::navigate),
        )
        .route(
            "/v1/sessions/{session_id}/vitals",
            post(vitals::add_reading).get(vitals::health_insights),
        )
        .route("/v1/risk-assessment", post(risk::assess_risk))
        .route("/v1/diagnosis/image", post(diagnosis::analyze_image))
        .route("/v1/diagnosis/report", post(diagnosis::analyze_report))
        .route("/v1/diagnosis/symptoms", post(diagnosis::check_symptoms))
        .route("/v1/diseases", get(reference::list_diseases))
        .route("/v1/diseases/{name}", get(reference::get_disease))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(
            observability::request_observability_middleware,
        ))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::request_body_limit;

    #[test]
    fn body_limit_leaves_room_for_base64_encoded_upload() {
        let max_upload_bytes: usize = 10 * 1024 * 1024;
        let encoded_len = max_upload_bytes.div_ceil(3) * 4;
        assert!(request_body_limit(max_upload_bytes) > encoded_len);
        assert!(request_body_limit(max_upload_bytes) > 2 * 1024 * 1024);
    }

    #[test]
    fn body_limit_saturates_instead_of_overflowing() {
        assert_eq!(request_body_limit(usize::MAX), usize::MAX);
    }
}
