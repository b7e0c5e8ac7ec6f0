use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};
use std::time::{Duration, Instant};

use super::{
    AnalysisCapability, GenerationRequest, GenerationResponse, GenerativeGateway,
    GenerativeGatewayError,
};

const PROVIDER_DEGRADATION_FAILURE_THRESHOLD: u32 = 5;
const PROVIDER_DEGRADATION_DURATION_THRESHOLD: Duration = Duration::from_secs(120);
const DEGRADATION_PROVIDER_KEY: &str = "gemini";

#[derive(Debug, Clone)]
pub struct ProviderDegradationAlert {
    pub consecutive_failures: u32,
    pub degraded_for_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct GenerationTelemetryEvent {
    pub capability: &'static str,
    pub outcome: &'static str,
    pub latency_ms: u64,
    pub provider: &'static str,
    pub model: Option<String>,
    pub has_image: bool,
    pub prompt_chars: usize,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
    pub estimated_cost_usd: Option<f64>,
    pub error_type: Option<&'static str>,
    pub provider_degradation_alert: Option<ProviderDegradationAlert>,
    pub provider_recovered: bool,
}

pub async fn generate_with_telemetry(
    gateway: &dyn GenerativeGateway,
    request: GenerationRequest,
) -> (
    Result<GenerationResponse, GenerativeGatewayError>,
    GenerationTelemetryEvent,
) {
    let capability = request.capability;
    let has_image = request.image.is_some();
    let prompt_chars = request.prompt.chars().count();
    let started_at = Instant::now();
    let result = gateway.generate(request).await;
    let telemetry = telemetry_for_result(
        RequestShape {
            capability,
            has_image,
            prompt_chars,
        },
        started_at.elapsed(),
        &result,
    );
    (result, telemetry)
}

#[derive(Debug, Clone, Copy)]
struct RequestShape {
    capability: AnalysisCapability,
    has_image: bool,
    prompt_chars: usize,
}

fn telemetry_for_result(
    shape: RequestShape,
    latency: Duration,
    result: &Result<GenerationResponse, GenerativeGatewayError>,
) -> GenerationTelemetryEvent {
    let latency_ms = duration_to_millis(latency);
    // Safety rejections are about the content, not provider health.
    let provider_healthy = match result {
        Ok(_) => true,
        Err(GenerativeGatewayError::ContentBlocked(_)) => true,
        Err(_) => false,
    };
    let transition = update_provider_health(
        DEGRADATION_PROVIDER_KEY,
        provider_healthy,
        Instant::now(),
        PROVIDER_DEGRADATION_FAILURE_THRESHOLD,
        PROVIDER_DEGRADATION_DURATION_THRESHOLD,
    );

    match result {
        Ok(response) => {
            let usage = response.usage.clone().unwrap_or_default();
            let has_usage = response.usage.is_some();
            let estimated_cost_usd = if has_usage {
                estimate_cost_usd(
                    &response.model,
                    usage.prompt_tokens,
                    usage.completion_tokens,
                )
            } else {
                None
            };

            GenerationTelemetryEvent {
                capability: shape.capability.as_str(),
                outcome: "success",
                latency_ms,
                provider: DEGRADATION_PROVIDER_KEY,
                model: Some(response.model.clone()),
                has_image: shape.has_image,
                prompt_chars: shape.prompt_chars,
                prompt_tokens: has_usage.then_some(usage.prompt_tokens),
                completion_tokens: has_usage.then_some(usage.completion_tokens),
                total_tokens: has_usage.then_some(usage.total_tokens),
                estimated_cost_usd,
                error_type: None,
                provider_degradation_alert: transition.degradation_alert,
                provider_recovered: transition.recovered,
            }
        }
        Err(err) => GenerationTelemetryEvent {
            capability: shape.capability.as_str(),
            outcome: "failure",
            latency_ms,
            provider: DEGRADATION_PROVIDER_KEY,
            model: None,
            has_image: shape.has_image,
            prompt_chars: shape.prompt_chars,
            prompt_tokens: None,
            completion_tokens: None,
            total_tokens: None,
            estimated_cost_usd: None,
            error_type: Some(error_type(err)),
            provider_degradation_alert: transition.degradation_alert,
            provider_recovered: transition.recovered,
        },
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    let millis = duration.as_millis();
    u64::try_from(millis).unwrap_or(u64::MAX)
}

fn error_type(error: &GenerativeGatewayError) -> &'static str {
    match error {
        GenerativeGatewayError::Timeout => "timeout",
        GenerativeGatewayError::ProviderFailure(_) => "provider_failure",
        GenerativeGatewayError::ContentBlocked(_) => "content_blocked",
        GenerativeGatewayError::InvalidProviderPayload(_) => "invalid_provider_payload",
    }
}

fn estimate_cost_usd(model: &str, prompt_tokens: u32, completion_tokens: u32) -> Option<f64> {
    let pricing = pricing_for_model(model)?;
    let prompt = f64::from(prompt_tokens);
    let completion = f64::from(completion_tokens);
    let total = (prompt * pricing.input_per_million + completion * pricing.output_per_million)
        / 1_000_000.0;
    Some((total * 1_000_000.0).round() / 1_000_000.0)
}

#[derive(Debug, Clone, Copy)]
struct ModelPricing {
    input_per_million: f64,
    output_per_million: f64,
}

fn pricing_for_model(model: &str) -> Option<ModelPricing> {
    let normalized = model.trim().to_ascii_lowercase();
    if normalized.starts_with("gemini-1.5-flash") {
        return Some(ModelPricing {
            input_per_million: 0.075,
            output_per_million: 0.30,
        });
    }

    if normalized.starts_with("gemini-1.5-pro") {
        return Some(ModelPricing {
            input_per_million: 1.25,
            output_per_million: 5.00,
        });
    }

    None
}

#[derive(Debug, Clone, Default)]
struct ProviderHealthState {
    consecutive_failures: u32,
    first_failure_at: Option<Instant>,
    alert_open: bool,
}

#[derive(Debug, Clone, Default)]
struct ProviderHealthTransition {
    degradation_alert: Option<ProviderDegradationAlert>,
    recovered: bool,
}

static PROVIDER_HEALTH: LazyLock<Mutex<HashMap<String, ProviderHealthState>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn update_provider_health(
    provider: &str,
    succeeded: bool,
    now: Instant,
    failure_threshold: u32,
    duration_threshold: Duration,
) -> ProviderHealthTransition {
    let mut tracker = lock_provider_health();

    if succeeded {
        let recovered = tracker
            .remove(provider)
            .is_some_and(|state| state.alert_open);
        return ProviderHealthTransition {
            degradation_alert: None,
            recovered,
        };
    }

    let state = tracker.entry(provider.to_string()).or_default();
    if state.consecutive_failures == 0 {
        state.first_failure_at = Some(now);
    }

    state.consecutive_failures = state.consecutive_failures.saturating_add(1);
    let degraded_for = state
        .first_failure_at
        .map(|started| now.saturating_duration_since(started))
        .unwrap_or_default();

    if !state.alert_open
        && state.consecutive_failures >= failure_threshold
        && degraded_for >= duration_threshold
    {
        state.alert_open = true;
        return ProviderHealthTransition {
            degradation_alert: Some(ProviderDegradationAlert {
                consecutive_failures: state.consecutive_failures,
                degraded_for_seconds: degraded_for.as_secs(),
            }),
            recovered: false,
        };
    }

    ProviderHealthTransition::default()
}

fn lock_provider_health() -> std::sync::MutexGuard<'static, HashMap<String, ProviderHealthState>> {
    match PROVIDER_HEALTH.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
