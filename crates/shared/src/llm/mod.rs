pub mod gateway;
pub mod gemini;
pub mod observability;
pub mod prompts;

pub use gateway::{
    GenerationRequest, GenerationResponse, GenerativeGateway, GenerativeGatewayError,
    GenerativeGatewayFuture, InlineImage, TokenUsage,
};
pub use gemini::{
    GeminiConfigError, GeminiGateway, GeminiGatewayConfig, GeminiModelRoute, GenerationSettings,
    SafetySetting,
};
pub use observability::{GenerationTelemetryEvent, generate_with_telemetry};
pub use prompts::{
    ASSISTANT_SYSTEM_PROMPT, AnalysisCapability, PromptInput, REPORT_TEXT_CHAR_BUDGET,
    render_prompt, truncate_report_text,
};
