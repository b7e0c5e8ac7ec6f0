use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator used when listing symptoms inside a prompt.
pub const SYMPTOM_DELIMITER: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symptom {
    Fever,
    Cough,
    #[serde(rename = "Chest Pain")]
    ChestPain,
    #[serde(rename = "Shortness of Breath")]
    ShortnessOfBreath,
    Fatigue,
    Nausea,
    Headache,
    #[serde(rename = "Abdominal Pain")]
    AbdominalPain,
    #[serde(rename = "Joint Pain")]
    JointPain,
    #[serde(rename = "Skin Rash")]
    SkinRash,
}

impl Symptom {
    pub const ALL: [Self; 10] = [
        Self::Fever,
        Self::Cough,
        Self::ChestPain,
        Self::ShortnessOfBreath,
        Self::Fatigue,
        Self::Nausea,
        Self::Headache,
        Self::AbdominalPain,
        Self::JointPain,
        Self::SkinRash,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fever => "Fever",
            Self::Cough => "Cough",
            Self::ChestPain => "Chest Pain",
            Self::ShortnessOfBreath => "Shortness of Breath",
            Self::Fatigue => "Fatigue",
            Self::Nausea => "Nausea",
            Self::Headache => "Headache",
            Self::AbdominalPain => "Abdominal Pain",
            Self::JointPain => "Joint Pain",
            Self::SkinRash => "Skin Rash",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|symptom| symptom.label().eq_ignore_ascii_case(label.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymptomDuration {
    #[serde(rename = "Less than 24 hours")]
    LessThanOneDay,
    #[serde(rename = "1-3 days")]
    OneToThreeDays,
    #[serde(rename = "3-7 days")]
    ThreeToSevenDays,
    #[serde(rename = "1-2 weeks")]
    OneToTwoWeeks,
    #[serde(rename = "More than 2 weeks")]
    MoreThanTwoWeeks,
}

impl SymptomDuration {
    pub const ALL: [Self; 5] = [
        Self::LessThanOneDay,
        Self::OneToThreeDays,
        Self::ThreeToSevenDays,
        Self::OneToTwoWeeks,
        Self::MoreThanTwoWeeks,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::LessThanOneDay => "Less than 24 hours",
            Self::OneToThreeDays => "1-3 days",
            Self::ThreeToSevenDays => "3-7 days",
            Self::OneToTwoWeeks => "1-2 weeks",
            Self::MoreThanTwoWeeks => "More than 2 weeks",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|duration| duration.label().eq_ignore_ascii_case(label.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Self; 3] = [Self::Mild, Self::Moderate, Self::Severe];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.label().eq_ignore_ascii_case(label.trim()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymptomQueryError {
    #[error("at least one symptom must be selected")]
    NoSymptoms,
    #[error("unknown symptom '{0}'")]
    UnknownSymptom(String),
    #[error("unknown symptom duration '{0}'")]
    UnknownDuration(String),
    #[error("unknown symptom severity '{0}'")]
    UnknownSeverity(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomQuery {
    symptoms: Vec<Symptom>,
    duration: SymptomDuration,
    severity: Severity,
}

impl SymptomQuery {
    /// Keeps selection order and drops repeated symptoms.
    pub fn new(
        symptoms: impl IntoIterator<Item = Symptom>,
        duration: SymptomDuration,
        severity: Severity,
    ) -> Result<Self, SymptomQueryError> {
        let mut selected = Vec::new();
        for symptom in symptoms {
            if !selected.contains(&symptom) {
                selected.push(symptom);
            }
        }

        if selected.is_empty() {
            return Err(SymptomQueryError::NoSymptoms);
        }

        Ok(Self {
            symptoms: selected,
            duration,
            severity,
        })
    }

    pub fn from_labels<S: AsRef<str>>(
        symptom_labels: &[S],
        duration: &str,
        severity: &str,
    ) -> Result<Self, SymptomQueryError> {
        let symptoms = symptom_labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                Symptom::from_label(label)
                    .ok_or_else(|| SymptomQueryError::UnknownSymptom(label.trim().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if symptoms.is_empty() {
            return Err(SymptomQueryError::NoSymptoms);
        }

        let duration = SymptomDuration::from_label(duration)
            .ok_or_else(|| SymptomQueryError::UnknownDuration(duration.trim().to_string()))?;
        let severity = Severity::from_label(severity)
            .ok_or_else(|| SymptomQueryError::UnknownSeverity(severity.trim().to_string()))?;

        Self::new(symptoms, duration, severity)
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn duration(&self) -> SymptomDuration {
        self.duration
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn joined_symptoms(&self) -> String {
        self.symptoms
            .iter()
            .map(|symptom| symptom.label())
            .collect::<Vec<_>>()
            .join(SYMPTOM_DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::{Severity, Symptom, SymptomDuration, SymptomQuery, SymptomQueryError};

    #[test]
    fn joins_symptoms_with_comma_and_space() {
        let query = SymptomQuery::new(
            [Symptom::Fever, Symptom::Cough],
            SymptomDuration::OneToThreeDays,
            Severity::Mild,
        )
        .expect("query should build");

        assert_eq!(query.joined_symptoms(), "Fever, Cough");
    }

    #[test]
    fn drops_repeated_symptoms_and_keeps_selection_order() {
        let query = SymptomQuery::from_labels(
            &["Headache", "fever", "Headache"],
            "3-7 days",
            "severe",
        )
        .expect("query should build");

        assert_eq!(query.symptoms(), &[Symptom::Headache, Symptom::Fever]);
        assert_eq!(query.duration(), SymptomDuration::ThreeToSevenDays);
        assert_eq!(query.severity(), Severity::Severe);
    }

    #[test]
    fn rejects_empty_selection() {
        let labels: [&str; 0] = [];
        assert_eq!(
            SymptomQuery::from_labels(&labels, "1-3 days", "Mild"),
            Err(SymptomQueryError::NoSymptoms)
        );
    }

    #[test]
    fn rejects_labels_outside_the_vocabulary() {
        assert_eq!(
            SymptomQuery::from_labels(&["Dizziness"], "1-3 days", "Mild"),
            Err(SymptomQueryError::UnknownSymptom("Dizziness".to_string()))
        );
        assert_eq!(
            SymptomQuery::from_labels(&["Cough"], "a month", "Mild"),
            Err(SymptomQueryError::UnknownDuration("a month".to_string()))
        );
        assert_eq!(
            SymptomQuery::from_labels(&["Cough"], "1-2 weeks", "Critical"),
            Err(SymptomQueryError::UnknownSeverity("Critical".to_string()))
        );
    }

    #[test]
    fn vocabulary_labels_round_trip() {
        for symptom in Symptom::ALL {
            assert_eq!(Symptom::from_label(symptom.label()), Some(symptom));
        }
        for duration in SymptomDuration::ALL {
            assert_eq!(SymptomDuration::from_label(duration.label()), Some(duration));
        }
    }
}
