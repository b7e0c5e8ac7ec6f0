//! Page routing. Every page is a pure function of the session context that
//! returns a view description for the client to draw.

use serde::{Deserialize, Serialize};

use crate::inputs::{
    AGE_BOUNDS, BLOOD_PRESSURE_BOUNDS, BMI_BOUNDS, CHOLESTEROL_BOUNDS, HEART_RATE_BOUNDS,
    IntegerBounds,
};
use crate::models::Notice;
use crate::reference::{
    ContactDetails, FaqEntry, HOTLINES, PREVENTION_TIPS, ResourceLink, contact_details,
    disease_names, faq, trusted_websites,
};
use crate::risk::ActivityLevel;
use crate::session::SessionContext;
use crate::symptoms::{Severity, Symptom, SymptomDuration};
use crate::upload::{IMAGE_EXTENSIONS, REPORT_EXTENSIONS};
use crate::vitals::{VitalLog, VitalMetric, VitalSummary, VitalTrends};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Home,
    AiDiagnosis,
    HealthInsights,
    DiseaseEncyclopedia,
    PreventionHub,
    RiskAssessment,
    MedicalResources,
    Faq,
    Contact,
}

impl Page {
    /// Menu order.
    pub const ALL: [Self; 9] = [
        Self::Home,
        Self::AiDiagnosis,
        Self::HealthInsights,
        Self::DiseaseEncyclopedia,
        Self::PreventionHub,
        Self::RiskAssessment,
        Self::MedicalResources,
        Self::Faq,
        Self::Contact,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::AiDiagnosis => "AI Diagnosis",
            Self::HealthInsights => "Health Insights",
            Self::DiseaseEncyclopedia => "Disease Encyclopedia",
            Self::PreventionHub => "Prevention Hub",
            Self::RiskAssessment => "Risk Assessment",
            Self::MedicalResources => "Medical Resources",
            Self::Faq => "FAQ",
            Self::Contact => "Contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub page: Page,
    pub label: String,
}

pub fn navigation() -> Vec<NavigationItem> {
    Page::ALL
        .into_iter()
        .map(|page| NavigationItem {
            page,
            label: page.label().to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub page: Page,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub blocks: Vec<ViewBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub id: String,
    pub label: String,
    pub blocks: Vec<ViewBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Integer { min: i64, max: i64, default: i64 },
    Decimal { min: f64, max: f64, default: f64 },
    Slider { min: i64, max: i64, default: i64 },
    SingleChoice { options: Vec<String>, default: String },
    MultiChoice { options: Vec<String> },
    Toggle { default: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewBlock {
    Hero {
        title: String,
        subtitle: String,
        call_to_action: String,
    },
    FeatureGrid {
        heading: String,
        features: Vec<Feature>,
    },
    Tabs {
        tabs: Vec<Tab>,
    },
    Upload {
        heading: String,
        description: String,
        accept: Vec<String>,
        endpoint: String,
        submit_label: String,
    },
    Form {
        id: String,
        endpoint: String,
        submit_label: String,
        fields: Vec<FormField>,
    },
    BulletList {
        heading: Option<String>,
        items: Vec<String>,
    },
    LinkList {
        heading: String,
        links: Vec<ResourceLink>,
    },
    Notice(Notice),
    Faq {
        entries: Vec<FaqEntry>,
    },
    Selector {
        label: String,
        options: Vec<String>,
        endpoint: String,
    },
    Contact(ContactDetails),
    TrendCharts {
        metrics: Vec<String>,
        trends: VitalTrends,
    },
    HealthSummary {
        summary: VitalSummary,
    },
}

pub fn render(page: Page, context: &SessionContext) -> PageView {
    match page {
        Page::Home => home(),
        Page::AiDiagnosis => ai_diagnosis(),
        Page::HealthInsights => health_insights(context),
        Page::DiseaseEncyclopedia => disease_encyclopedia(),
        Page::PreventionHub => prevention_hub(),
        Page::RiskAssessment => risk_assessment(),
        Page::MedicalResources => medical_resources(),
        Page::Faq => faq_page(),
        Page::Contact => contact(),
    }
}

fn home() -> PageView {
    let features = [
        ("⚡", "Lightning Fast", "Get results in minutes, not days"),
        ("🎯", "Highly Accurate", "Powered by advanced AI models"),
        ("🔒", "Secure & Private", "Your data stays confidential"),
        ("💡", "Actionable Insights", "Clear next steps for your health"),
    ];

    PageView {
        page: Page::Home,
        title: "Revolutionizing Healthcare with AI".to_string(),
        subtitle: None,
        blocks: vec![
            ViewBlock::Hero {
                title: "Revolutionizing Healthcare with AI".to_string(),
                subtitle: "Your Personal Health Companion for Accurate, Instant Medical Insights"
                    .to_string(),
                call_to_action: "Get Started".to_string(),
            },
            ViewBlock::FeatureGrid {
                heading: "Instant Analysis".to_string(),
                features: vec![Feature {
                    icon: "🩺".to_string(),
                    title: "Instant Analysis".to_string(),
                    description: "Upload medical images or reports and receive AI-powered \
                                  insights in seconds."
                        .to_string(),
                }],
            },
            ViewBlock::FeatureGrid {
                heading: "Why Choose MediScan AI?".to_string(),
                features: features
                    .into_iter()
                    .map(|(icon, title, description)| Feature {
                        icon: icon.to_string(),
                        title: title.to_string(),
                        description: description.to_string(),
                    })
                    .collect(),
            },
        ],
    }
}

fn ai_diagnosis() -> PageView {
    let image_tab = Tab {
        id: "image".to_string(),
        label: "Image Analysis".to_string(),
        blocks: vec![ViewBlock::Upload {
            heading: "Upload Medical Image".to_string(),
            description: "Supported formats: JPG, PNG".to_string(),
            accept: strings(IMAGE_EXTENSIONS),
            endpoint: "/v1/diagnosis/image".to_string(),
            submit_label: "Analyze Image".to_string(),
        }],
    };

    let report_tab = Tab {
        id: "report".to_string(),
        label: "Report Analysis".to_string(),
        blocks: vec![ViewBlock::Upload {
            heading: "Upload Lab Report".to_string(),
            description: "Supported formats: PDF, TXT, CSV".to_string(),
            accept: strings(REPORT_EXTENSIONS),
            endpoint: "/v1/diagnosis/report".to_string(),
            submit_label: "Analyze Report".to_string(),
        }],
    };

    let symptom_tab = Tab {
        id: "symptoms".to_string(),
        label: "Symptom Checker".to_string(),
        blocks: vec![ViewBlock::Form {
            id: "symptom_checker".to_string(),
            endpoint: "/v1/diagnosis/symptoms".to_string(),
            submit_label: "Check Possible Conditions".to_string(),
            fields: vec![
                FormField {
                    name: "symptoms".to_string(),
                    label: "Choose your symptoms:".to_string(),
                    kind: FieldKind::MultiChoice {
                        options: strings(Symptom::ALL.map(Symptom::label)),
                    },
                },
                FormField {
                    name: "duration".to_string(),
                    label: "Duration of symptoms".to_string(),
                    kind: FieldKind::SingleChoice {
                        options: strings(SymptomDuration::ALL.map(SymptomDuration::label)),
                        default: SymptomDuration::LessThanOneDay.label().to_string(),
                    },
                },
                FormField {
                    name: "severity".to_string(),
                    label: "Symptom severity".to_string(),
                    kind: FieldKind::SingleChoice {
                        options: strings(Severity::ALL.map(Severity::label)),
                        default: Severity::Mild.label().to_string(),
                    },
                },
            ],
        }],
    };

    PageView {
        page: Page::AiDiagnosis,
        title: "AI-Powered Medical Diagnosis".to_string(),
        subtitle: Some("Upload your medical images or reports for instant analysis".to_string()),
        blocks: vec![ViewBlock::Tabs {
            tabs: vec![image_tab, report_tab, symptom_tab],
        }],
    }
}

fn health_insights(context: &SessionContext) -> PageView {
    let vitals_endpoint = format!("/v1/sessions/{}/vitals", context.id());
    let mut blocks = vec![ViewBlock::Form {
        id: "health_input_form".to_string(),
        endpoint: vitals_endpoint,
        submit_label: "Add Entry".to_string(),
        fields: vec![
            integer_field("blood_pressure", "Blood Pressure (mm Hg)", BLOOD_PRESSURE_BOUNDS),
            integer_field("cholesterol", "Cholesterol (mg/dL)", CHOLESTEROL_BOUNDS),
            integer_field("heart_rate", "Heart Rate (bpm)", HEART_RATE_BOUNDS),
        ],
    }];

    match context.vitals().latest_summary() {
        Some(summary) => {
            blocks.push(ViewBlock::TrendCharts {
                metrics: VitalMetric::ALL
                    .into_iter()
                    .map(|metric| format!("{} ({})", metric.label(), metric.unit()))
                    .collect(),
                trends: context.vitals().trends(),
            });
            blocks.push(ViewBlock::HealthSummary { summary });
        }
        None => blocks.push(ViewBlock::Notice(VitalLog::empty_notice())),
    }

    PageView {
        page: Page::HealthInsights,
        title: "Your Health Insights Dashboard".to_string(),
        subtitle: Some("Track and analyze your health metrics over time".to_string()),
        blocks,
    }
}

fn disease_encyclopedia() -> PageView {
    PageView {
        page: Page::DiseaseEncyclopedia,
        title: "Disease Insights".to_string(),
        subtitle: None,
        blocks: vec![ViewBlock::Selector {
            label: "Select a condition to learn more:".to_string(),
            options: strings(disease_names()),
            endpoint: "/v1/diseases/{name}".to_string(),
        }],
    }
}

fn prevention_hub() -> PageView {
    PageView {
        page: Page::PreventionHub,
        title: "Prevention Hub".to_string(),
        subtitle: None,
        blocks: vec![ViewBlock::BulletList {
            heading: Some("General Preventive Tips".to_string()),
            items: strings(PREVENTION_TIPS),
        }],
    }
}

fn risk_assessment() -> PageView {
    PageView {
        page: Page::RiskAssessment,
        title: "Health Risk Assessment".to_string(),
        subtitle: None,
        blocks: vec![ViewBlock::Form {
            id: "risk_assessment".to_string(),
            endpoint: "/v1/risk-assessment".to_string(),
            submit_label: "Assess Risk".to_string(),
            fields: vec![
                FormField {
                    name: "age".to_string(),
                    label: "Your Age".to_string(),
                    kind: FieldKind::Slider {
                        min: AGE_BOUNDS.min,
                        max: AGE_BOUNDS.max,
                        default: AGE_BOUNDS.default,
                    },
                },
                FormField {
                    name: "bmi".to_string(),
                    label: "Your BMI".to_string(),
                    kind: FieldKind::Decimal {
                        min: BMI_BOUNDS.min,
                        max: BMI_BOUNDS.max,
                        default: BMI_BOUNDS.default,
                    },
                },
                FormField {
                    name: "smoker".to_string(),
                    label: "Do you smoke?".to_string(),
                    kind: FieldKind::Toggle { default: false },
                },
                FormField {
                    name: "activity_level".to_string(),
                    label: "Physical Activity Level".to_string(),
                    kind: FieldKind::SingleChoice {
                        options: strings(ActivityLevel::ALL.map(ActivityLevel::label)),
                        default: ActivityLevel::Low.label().to_string(),
                    },
                },
            ],
        }],
    }
}

fn medical_resources() -> PageView {
    PageView {
        page: Page::MedicalResources,
        title: "Medical Resources".to_string(),
        subtitle: None,
        blocks: vec![
            ViewBlock::LinkList {
                heading: "Trusted Health Websites".to_string(),
                links: trusted_websites(),
            },
            ViewBlock::BulletList {
                heading: Some("Medical Hotline Numbers (Country-Specific)".to_string()),
                items: strings(HOTLINES),
            },
        ],
    }
}

fn faq_page() -> PageView {
    PageView {
        page: Page::Faq,
        title: "Frequently Asked Questions".to_string(),
        subtitle: None,
        blocks: vec![ViewBlock::Faq { entries: faq() }],
    }
}

fn contact() -> PageView {
    PageView {
        page: Page::Contact,
        title: "Contact & Feedback".to_string(),
        subtitle: Some(
            "We'd love to hear from you. For support, questions, or suggestions:".to_string(),
        ),
        blocks: vec![ViewBlock::Contact(contact_details())],
    }
}

fn integer_field(name: &str, label: &str, bounds: IntegerBounds) -> FormField {
    FormField {
        name: name.to_string(),
        label: label.to_string(),
        kind: FieldKind::Integer {
            min: bounds.min,
            max: bounds.max,
            default: bounds.default,
        },
    }
}

fn strings<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'static str>,
{
    items.into_iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::{FieldKind, Page, ViewBlock, navigation, render};
    use crate::session::SessionContext;
    use crate::vitals::VitalReading;

    fn context() -> SessionContext {
        SessionContext::new(Uuid::new_v4(), Instant::now())
    }

    #[test]
    fn navigation_lists_every_page_in_menu_order() {
        let labels = navigation()
            .into_iter()
            .map(|item| item.label)
            .collect::<Vec<_>>();
        assert_eq!(labels.len(), Page::ALL.len());
        assert_eq!(labels.first().map(String::as_str), Some("Home"));
        assert_eq!(labels.last().map(String::as_str), Some("Contact"));
    }

    #[test]
    fn every_page_renders_its_own_view() {
        let context = context();
        for page in Page::ALL {
            let view = render(page, &context);
            assert_eq!(view.page, page);
            assert!(!view.blocks.is_empty());
        }
    }

    #[test]
    fn page_ids_use_kebab_case() {
        let value = serde_json::to_value(Page::AiDiagnosis).expect("page serializes");
        assert_eq!(value, "ai-diagnosis");
        let parsed: Page = serde_json::from_str("\"health-insights\"").expect("page parses");
        assert_eq!(parsed, Page::HealthInsights);
    }

    #[test]
    fn health_insights_shows_empty_notice_without_readings() {
        let view = render(Page::HealthInsights, &context());
        assert!(view.blocks.iter().any(|block| matches!(
            block,
            ViewBlock::Notice(notice) if notice.message.starts_with("No data to display yet")
        )));
    }

    #[test]
    fn health_insights_summarizes_latest_session_reading() {
        let mut context = context();
        for blood_pressure in [150, 122] {
            context.vitals_mut().append(VitalReading {
                date: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid test date"),
                blood_pressure,
                cholesterol: 190,
                heart_rate: 70,
            });
        }

        let view = render(Page::HealthInsights, &context);
        let summary = view
            .blocks
            .iter()
            .find_map(|block| match block {
                ViewBlock::HealthSummary { summary } => Some(summary),
                _ => None,
            })
            .expect("summary block should be present");
        assert_eq!(summary.reading.blood_pressure, 122);
        assert!(summary.classification.blood_pressure_normal);

        let form_endpoint = view.blocks.iter().find_map(|block| match block {
            ViewBlock::Form { endpoint, .. } => Some(endpoint.clone()),
            _ => None,
        });
        assert_eq!(
            form_endpoint,
            Some(format!("/v1/sessions/{}/vitals", context.id()))
        );
    }

    #[test]
    fn risk_form_declares_input_bounds() {
        let view = render(Page::RiskAssessment, &context());
        let ViewBlock::Form { fields, .. } = &view.blocks[0] else {
            panic!("risk page should start with a form");
        };
        assert_eq!(
            fields[0].kind,
            FieldKind::Slider {
                min: 10,
                max: 90,
                default: 30
            }
        );
    }
}
