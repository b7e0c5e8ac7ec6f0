use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pages::{NavigationItem, Page};
use crate::reference::DiseaseEntry;
use crate::risk::RiskTier;
use crate::upload::UploadedFile;
use crate::vitals::{VitalReading, VitalSummary, VitalTrends};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A user-visible message and the banner style the client should use for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResponse {
    pub items: Vec<NavigationItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub page: Page,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigateRequest {
    pub page: Page,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddVitalReadingRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub blood_pressure: i64,
    pub cholesterol: i64,
    pub heart_rate: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddVitalReadingResponse {
    pub entry_count: usize,
    pub reading: VitalReading,
    pub summary: VitalSummary,
    pub notice: Notice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInsightsResponse {
    pub readings: Vec<VitalReading>,
    pub trends: VitalTrends,
    pub summary: Option<VitalSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessmentRequest {
    pub age: i64,
    pub bmi: f64,
    pub smoker: bool,
    pub activity_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessmentResponse {
    pub raw_score: u8,
    pub tier: RiskTier,
    pub notice: Notice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysisRequest {
    pub file: UploadedFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportAnalysisRequest {
    pub file: UploadedFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomCheckRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub duration: String,
    pub severity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub title: String,
    pub analysis: String,
    pub model: String,
    pub notice: Notice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseListResponse {
    pub items: Vec<DiseaseEntry>,
}
