use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tokio::time::sleep;

use super::gateway::{
    GenerationRequest, GenerationResponse, GenerativeGateway, GenerativeGatewayError,
    GenerativeGatewayFuture, TokenUsage,
};
use super::prompts::ASSISTANT_SYSTEM_PROMPT;
use crate::config::ConfigError;
use crate::config_env::{
    optional_trimmed_env, parse_bool_env, parse_u32_env, parse_u64_env, require_env,
};

const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_RETRY_BASE_BACKOFF_MS: u64 = 250;

const API_KEY_HEADER: &str = "x-goog-api-key";
const BLOCK_MEDIUM_AND_ABOVE: &str = "BLOCK_MEDIUM_AND_ABOVE";
const SAFETY_FINISH_REASONS: [&str; 4] = ["SAFETY", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

/// Decoding parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_p: 1.0,
            top_k: 32,
            max_output_tokens: 4096,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl SafetySetting {
    pub fn defaults() -> Vec<Self> {
        [
            "HARM_CATEGORY_HARASSMENT",
            "HARM_CATEGORY_HATE_SPEECH",
            "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            "HARM_CATEGORY_DANGEROUS_CONTENT",
        ]
        .into_iter()
        .map(|category| Self {
            category: category.to_string(),
            threshold: BLOCK_MEDIUM_AND_ABOVE.to_string(),
        })
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct GeminiModelRoute {
    pub primary_model: String,
    pub fallback_model: Option<String>,
}

impl GeminiModelRoute {
    fn candidate_models(&self) -> Vec<&str> {
        let mut candidates = Vec::new();
        if !self.primary_model.is_empty() {
            candidates.push(self.primary_model.as_str());
        }

        if let Some(fallback_model) = self.fallback_model.as_deref()
            && !fallback_model.is_empty()
            && fallback_model != self.primary_model
        {
            candidates.push(fallback_model);
        }

        candidates
    }
}

#[derive(Debug, Clone)]
pub struct GeminiGatewayConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_base_backoff_ms: u64,
    pub model_route: GeminiModelRoute,
    pub generation: GenerationSettings,
    pub safety_settings: Vec<SafetySetting>,
    pub system_instruction: Option<String>,
}

impl GeminiGatewayConfig {
    pub fn from_env() -> Result<Self, GeminiConfigError> {
        let api_key = require_env("GEMINI_API_KEY")?;
        let api_base_url = optional_trimmed_env("GEMINI_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(GeminiConfigError::InvalidConfiguration(
                "GEMINI_API_BASE_URL must start with http:// or https://".to_string(),
            ));
        }

        let system_instruction = parse_bool_env("GEMINI_SYSTEM_INSTRUCTION_ENABLED", false)?
            .then(|| ASSISTANT_SYSTEM_PROMPT.to_string());

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout_ms: parse_u64_env("GEMINI_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
            max_retries: parse_u32_env("GEMINI_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            retry_base_backoff_ms: parse_u64_env(
                "GEMINI_RETRY_BASE_BACKOFF_MS",
                DEFAULT_RETRY_BASE_BACKOFF_MS,
            )?,
            model_route: GeminiModelRoute {
                primary_model: optional_trimmed_env("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                fallback_model: optional_trimmed_env("GEMINI_MODEL_FALLBACK"),
            },
            generation: GenerationSettings::default(),
            safety_settings: SafetySetting::defaults(),
            system_instruction,
        })
    }
}

#[derive(Debug, Error)]
pub enum GeminiConfigError {
    #[error(transparent)]
    Env(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to build Gemini http client: {0}")]
    HttpClient(String),
}

#[derive(Clone)]
pub struct GeminiGateway {
    client: reqwest::Client,
    config: GeminiGatewayConfig,
}

impl GeminiGateway {
    pub fn new(config: GeminiGatewayConfig) -> Result<Self, GeminiConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| GeminiConfigError::HttpClient(err.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn primary_model(&self) -> &str {
        &self.config.model_route.primary_model
    }

    async fn generate_for_model(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ModelAttemptError> {
        let mut attempt = 0_u32;

        loop {
            match self.send_once(model, request).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    if err.retryable && attempt < self.config.max_retries {
                        let backoff_multiplier = 2_u64.saturating_pow(attempt);
                        let backoff_ms = self
                            .config
                            .retry_base_backoff_ms
                            .saturating_mul(backoff_multiplier);
                        sleep(Duration::from_millis(backoff_ms)).await;
                        attempt = attempt.saturating_add(1);
                        continue;
                    }

                    return Err(ModelAttemptError {
                        error: err.error,
                        fallback_allowed: err.fallback_allowed,
                    });
                }
            }
        }
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        let mut parts = vec![json!({ "text": request.prompt })];
        if let Some(image) = &request.image {
            parts.push(json!({
                "inlineData": {
                    "mimeType": image.mime_type,
                    "data": STANDARD.encode(&image.data),
                }
            }));
        }

        let mut body = json!({
            "contents": [
                { "role": "user", "parts": parts }
            ],
            "generationConfig": self.config.generation,
            "safetySettings": self.config.safety_settings,
        });

        if let Some(system_instruction) = &self.config.system_instruction
            && let Value::Object(entries) = &mut body
        {
            entries.insert(
                "systemInstruction".to_string(),
                json!({ "parts": [{ "text": system_instruction }] }),
            );
        }

        body
    }

    async fn send_once(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, SendAttemptError> {
        let url = format!(
            "{}/models/{model}:generateContent",
            self.config.api_base_url
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    SendAttemptError::retryable(GenerativeGatewayError::Timeout, true)
                } else {
                    SendAttemptError::retryable(
                        GenerativeGatewayError::ProviderFailure(
                            "request_unavailable".to_string(),
                        ),
                        true,
                    )
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|_| {
            SendAttemptError::non_retryable(
                GenerativeGatewayError::InvalidProviderPayload(
                    "response_body_read_failed".to_string(),
                ),
                true,
            )
        })?;

        if !status.is_success() {
            let provider_status = parse_provider_error_status(&body);
            let fallback_allowed =
                status != StatusCode::UNAUTHORIZED && status != StatusCode::FORBIDDEN;
            return Err(SendAttemptError {
                error: GenerativeGatewayError::ProviderFailure(format!(
                    "status={} code={provider_status}",
                    status.as_u16()
                )),
                retryable: is_retryable_status(status),
                fallback_allowed,
            });
        }

        let parsed: GeminiSuccessResponse = serde_json::from_str(&body).map_err(|_| {
            SendAttemptError::non_retryable(
                GenerativeGatewayError::InvalidProviderPayload(
                    "response_json_parse_failed".to_string(),
                ),
                true,
            )
        })?;

        if let Some(block_reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return Err(SendAttemptError::non_retryable(
                GenerativeGatewayError::ContentBlocked(format!("block_reason={block_reason}")),
                false,
            ));
        }

        let candidate = parsed.candidates.first().ok_or_else(|| {
            SendAttemptError::non_retryable(
                GenerativeGatewayError::InvalidProviderPayload("missing_candidate".to_string()),
                true,
            )
        })?;

        let text = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            let finish_reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            let error = if SAFETY_FINISH_REASONS.contains(&finish_reason) {
                SendAttemptError::non_retryable(
                    GenerativeGatewayError::ContentBlocked(format!(
                        "finish_reason={finish_reason}"
                    )),
                    false,
                )
            } else {
                SendAttemptError::non_retryable(
                    GenerativeGatewayError::InvalidProviderPayload(
                        "empty_candidate_text".to_string(),
                    ),
                    true,
                )
            };
            return Err(error);
        }

        Ok(GenerationResponse {
            model: parsed.model_version.unwrap_or_else(|| model.to_string()),
            text,
            usage: parsed.usage_metadata.map(|usage| TokenUsage {
                prompt_tokens: clamp_u64_to_u32(usage.prompt_token_count.unwrap_or(0)),
                completion_tokens: clamp_u64_to_u32(usage.candidates_token_count.unwrap_or(0)),
                total_tokens: clamp_u64_to_u32(usage.total_token_count.unwrap_or(0)),
            }),
        })
    }
}

impl GenerativeGateway for GeminiGateway {
    fn generate<'a>(&'a self, request: GenerationRequest) -> GenerativeGatewayFuture<'a> {
        Box::pin(async move {
            let candidate_models = self.config.model_route.candidate_models();

            for (index, model) in candidate_models.iter().enumerate() {
                match self.generate_for_model(model, &request).await {
                    Ok(response) => return Ok(response),
                    Err(model_err) => {
                        let has_more_candidates = index + 1 < candidate_models.len();
                        if has_more_candidates && model_err.fallback_allowed {
                            continue;
                        }
                        return Err(model_err.error);
                    }
                }
            }

            Err(GenerativeGatewayError::ProviderFailure(
                "no_gemini_model_candidates".to_string(),
            ))
        })
    }
}

#[derive(Debug)]
struct SendAttemptError {
    error: GenerativeGatewayError,
    retryable: bool,
    fallback_allowed: bool,
}

impl SendAttemptError {
    fn retryable(error: GenerativeGatewayError, fallback_allowed: bool) -> Self {
        Self {
            error,
            retryable: true,
            fallback_allowed,
        }
    }

    fn non_retryable(error: GenerativeGatewayError, fallback_allowed: bool) -> Self {
        Self {
            error,
            retryable: false,
            fallback_allowed,
        }
    }
}

#[derive(Debug)]
struct ModelAttemptError {
    error: GenerativeGatewayError,
    fallback_allowed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiSuccessResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    usage_metadata: Option<GeminiUsage>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    prompt_token_count: Option<u64>,
    candidates_token_count: Option<u64>,
    total_token_count: Option<u64>,
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

fn parse_provider_error_status(body: &str) -> String {
    #[derive(Deserialize)]
    struct ProviderErrorEnvelope {
        error: Option<ProviderErrorDetails>,
    }

    #[derive(Deserialize)]
    struct ProviderErrorDetails {
        status: Option<String>,
        code: Option<Value>,
    }

    let Some(details) = serde_json::from_str::<ProviderErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
    else {
        return "unknown".to_string();
    };

    if let Some(status) = details.status.filter(|status| !status.is_empty()) {
        return status;
    }

    match details.code {
        Some(Value::String(code)) => code,
        Some(Value::Number(code)) => code.to_string(),
        _ => "unknown".to_string(),
    }
}

fn clamp_u64_to_u32(value: u64) -> u32 {
    value.min(u32::MAX as u64) as u32
}
