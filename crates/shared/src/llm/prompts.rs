use serde::{Deserialize, Serialize};

use crate::symptoms::SymptomQuery;

/// Maximum number of characters of report text embedded in a prompt.
pub const REPORT_TEXT_CHAR_BUDGET: usize = 3000;

pub const ASSISTANT_SYSTEM_PROMPT: &str = "\
You are a professional AI medical health assistant. Provide clear, evidence-based general \
health information based on the symptoms, history and lifestyle details the user shares.

Support, do not diagnose: never give a diagnosis or a treatment plan. Help the user understand \
possible conditions, explain medical concepts, and suggest sensible next steps such as lifestyle \
changes or when to see a healthcare professional.

Ground guidance in reputable clinical sources (CDC, WHO, Mayo Clinic, NICE) and widely accepted \
recommendations.

Use simple, respectful and reassuring language. Acknowledge uncertainty honestly and remind the \
user that no online tool replaces a qualified healthcare provider.

Do not retain personal health information. Avoid speculative or unsafe suggestions even when \
asked, and recommend professional evaluation when in doubt.

Include this disclaimer: \"Please note: I am an AI health assistant and not a licensed medical \
professional. The information I provide is for general guidance only and should not be \
considered a medical diagnosis or a substitute for professional medical advice. If you are \
experiencing symptoms or have health concerns, please consult a licensed healthcare provider \
promptly.\"";

const IMAGE_FINDINGS_TEMPLATE: &str = "\
You are a medical imaging specialist analyzing this image. Provide:
1. A professional assessment of any visible abnormalities
2. Potential conditions that could explain these findings
3. Recommended next steps (imaging follow-up, specialist consultation)
4. Urgency level (routine, moderate, urgent)

Be factual but compassionate. Always remind this is not a diagnosis.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisCapability {
    ImageFindings,
    ReportSummary,
    SymptomCheck,
}

impl AnalysisCapability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ImageFindings => "image_findings",
            Self::ReportSummary => "report_summary",
            Self::SymptomCheck => "symptom_check",
        }
    }

    /// Heading shown above the model's answer.
    pub const fn result_title(self) -> &'static str {
        match self {
            Self::ImageFindings => "AI Analysis Results",
            Self::ReportSummary => "Report Analysis Summary",
            Self::SymptomCheck => "Symptom Analysis",
        }
    }

    pub const fn success_message(self) -> &'static str {
        match self {
            Self::ImageFindings => "Analysis complete!",
            Self::ReportSummary => "Report analysis complete!",
            Self::SymptomCheck => "Preliminary Insight:",
        }
    }

    pub const fn failure_label(self) -> &'static str {
        match self {
            Self::ImageFindings => "Analysis failed",
            Self::ReportSummary => "Report analysis failed",
            Self::SymptomCheck => "Symptom analysis failed",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum PromptInput<'a> {
    ImageFindings,
    ReportSummary { report_text: &'a str },
    SymptomCheck { query: &'a SymptomQuery },
}

impl PromptInput<'_> {
    pub const fn capability(&self) -> AnalysisCapability {
        match self {
            Self::ImageFindings => AnalysisCapability::ImageFindings,
            Self::ReportSummary { .. } => AnalysisCapability::ReportSummary,
            Self::SymptomCheck { .. } => AnalysisCapability::SymptomCheck,
        }
    }
}

pub fn render_prompt(input: PromptInput<'_>) -> String {
    match input {
        PromptInput::ImageFindings => IMAGE_FINDINGS_TEMPLATE.to_string(),
        PromptInput::ReportSummary { report_text } => format!(
            "Analyze this medical report and provide:\n\
             1. Summary of key abnormal findings\n\
             2. Potential health implications\n\
             3. Recommended follow-up actions\n\
             4. General health advice\n\
             \n\
             Report content:\n\
             {}... [truncated if long]",
            truncate_report_text(report_text)
        ),
        PromptInput::SymptomCheck { query } => format!(
            "A user reports these symptoms:\n\
             - Main symptoms: {}\n\
             - Duration: {}\n\
             - Severity: {}\n\
             \n\
             Provide:\n\
             1. 2-3 most likely general conditions (not diagnoses)\n\
             2. Recommended self-care measures\n\
             3. When to seek medical attention\n\
             4. Red flag symptoms to watch for\n\
             \n\
             Be conservative and always recommend professional evaluation when uncertain.",
            query.joined_symptoms(),
            query.duration().label(),
            query.severity().label()
        ),
    }
}

/// Returns at most `REPORT_TEXT_CHAR_BUDGET` characters, cut on a char boundary.
pub fn truncate_report_text(report_text: &str) -> &str {
    match report_text.char_indices().nth(REPORT_TEXT_CHAR_BUDGET) {
        Some((byte_index, _)) => &report_text[..byte_index],
        None => report_text,
    }
}
