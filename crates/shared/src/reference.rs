//! Static educational content served alongside the assessments.

use serde::{Deserialize, Serialize};

use crate::models::{Notice, NoticeLevel};

const DISEASES: [(&str, &str); 5] = [
    (
        "Diabetes",
        "A chronic condition affecting how your body turns food into energy. Management involves \
         lifestyle changes and possibly medication.",
    ),
    (
        "Hypertension",
        "High blood pressure often has no symptoms but can lead to serious health issues. Regular \
         monitoring and healthy living are key.",
    ),
    (
        "Asthma",
        "A respiratory condition marked by spasms in the bronchi of the lungs, causing difficulty \
         in breathing.",
    ),
    (
        "Heart Disease",
        "Includes conditions like coronary artery disease, heart attacks, and arrhythmias. It's \
         the leading cause of death globally.",
    ),
    (
        "COVID-19",
        "A viral respiratory illness caused by SARS-CoV-2. Preventive measures and vaccination \
         reduce risk of severe outcomes.",
    ),
];

pub const PREVENTION_TIPS: [&str; 7] = [
    "Eat a balanced, nutrient-rich diet",
    "Exercise at least 30 minutes a day",
    "Avoid tobacco and limit alcohol",
    "Sleep 7-9 hours each night",
    "Wash hands regularly and practice hygiene",
    "Stay up to date with vaccinations",
    "Manage stress through mindfulness or meditation",
];

const TRUSTED_WEBSITES: [(&str, &str); 5] = [
    ("World Health Organization (WHO)", "https://www.who.int/"),
    (
        "Centers for Disease Control and Prevention (CDC)",
        "https://www.cdc.gov/",
    ),
    ("Mayo Clinic", "https://www.mayoclinic.org/"),
    ("WebMD", "https://www.webmd.com/"),
    ("National Institutes of Health (NIH)", "https://www.nih.gov/"),
];

pub const HOTLINES: [&str; 2] = [
    "Emergency: 112 / 911",
    "COVID-19 Helpline: [Local Ministry of Health site]",
];

const FAQ: [(&str, NoticeLevel, &str); 4] = [
    (
        "Is this app a substitute for a doctor?",
        NoticeLevel::Info,
        "No. This app provides general health insights and does not replace professional \
         medical advice.",
    ),
    (
        "Is my data stored?",
        NoticeLevel::Info,
        "No. All data is processed in-session and not stored permanently.",
    ),
    (
        "Can I get a prescription?",
        NoticeLevel::Warning,
        "No. Only a licensed physician can issue medical prescriptions.",
    ),
    (
        "Which files can I upload?",
        NoticeLevel::Info,
        "Supported files include JPG and PNG for images and PDF, TXT, CSV for reports.",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseEntry {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub website: String,
    pub feedback_form: String,
    pub support_hours: String,
}

pub fn diseases() -> Vec<DiseaseEntry> {
    DISEASES
        .iter()
        .map(|(name, description)| DiseaseEntry {
            name: (*name).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

pub fn disease_names() -> Vec<&'static str> {
    DISEASES.iter().map(|(name, _)| *name).collect()
}

pub fn find_disease(name: &str) -> Option<DiseaseEntry> {
    let wanted = name.trim();
    diseases()
        .into_iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(wanted))
}

pub fn trusted_websites() -> Vec<ResourceLink> {
    TRUSTED_WEBSITES
        .iter()
        .map(|(name, url)| ResourceLink {
            name: (*name).to_string(),
            url: (*url).to_string(),
        })
        .collect()
}

pub fn faq() -> Vec<FaqEntry> {
    FAQ.iter()
        .map(|(question, level, answer)| FaqEntry {
            question: (*question).to_string(),
            answer: Notice::new(*level, *answer),
        })
        .collect()
}

pub fn contact_details() -> ContactDetails {
    ContactDetails {
        email: "support@aimedicalassist.com".to_string(),
        website: "www.aimedicalassist.com".to_string(),
        feedback_form: "Fill here".to_string(),
        support_hours: "Mon-Fri, 9AM - 5PM (Local Time)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{diseases, faq, find_disease};
    use crate::models::NoticeLevel;

    #[test]
    fn finds_diseases_case_insensitively() {
        let entry = find_disease(" covid-19 ").expect("COVID-19 should be listed");
        assert_eq!(entry.name, "COVID-19");
        assert!(entry.description.contains("SARS-CoV-2"));
        assert!(find_disease("Influenza").is_none());
    }

    #[test]
    fn encyclopedia_lists_five_conditions() {
        let names = diseases()
            .into_iter()
            .map(|entry| entry.name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["Diabetes", "Hypertension", "Asthma", "Heart Disease", "COVID-19"]
        );
    }

    #[test]
    fn prescription_answer_is_a_warning() {
        let entries = faq();
        let prescription = entries
            .iter()
            .find(|entry| entry.question.contains("prescription"))
            .expect("prescription entry should exist");
        assert_eq!(prescription.answer.level, NoticeLevel::Warning);
    }
}
