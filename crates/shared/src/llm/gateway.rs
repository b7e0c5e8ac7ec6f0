use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::prompts::{AnalysisCapability, PromptInput, render_prompt};

pub type GenerativeGatewayFuture<'a> = Pin<
    Box<dyn Future<Output = Result<GenerationResponse, GenerativeGatewayError>> + Send + 'a>,
>;

/// Decoded image bytes sent alongside a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub capability: AnalysisCapability,
    pub prompt: String,
    pub image: Option<InlineImage>,
}

impl GenerationRequest {
    pub fn from_prompt(input: PromptInput<'_>) -> Self {
        Self {
            capability: input.capability(),
            prompt: render_prompt(input),
            image: None,
        }
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub model: String,
    pub text: String,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Error)]
pub enum GenerativeGatewayError {
    #[error("generative provider request timed out")]
    Timeout,
    #[error("generative provider request failed: {0}")]
    ProviderFailure(String),
    #[error("generative provider blocked the content: {0}")]
    ContentBlocked(String),
    #[error("generative provider returned an invalid payload: {0}")]
    InvalidProviderPayload(String),
}

pub trait GenerativeGateway: Send + Sync {
    fn generate<'a>(&'a self, request: GenerationRequest) -> GenerativeGatewayFuture<'a>;
}
