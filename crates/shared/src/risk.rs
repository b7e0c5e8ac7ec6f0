use serde::{Deserialize, Serialize};

use crate::models::{Notice, NoticeLevel};

pub const AGE_RISK_THRESHOLD: u32 = 50;
pub const BMI_RISK_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
}

impl ActivityLevel {
    pub const ALL: [Self; 3] = [Self::Low, Self::Moderate, Self::High];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Inputs for one risk assessment. Ranges are enforced by whoever collects
/// the values; the scorer trusts them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthProfileInput {
    pub age: u32,
    pub bmi: f64,
    pub is_smoker: bool,
    pub activity_level: ActivityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    pub fn notice(self) -> Notice {
        match self {
            Self::Low => Notice::new(
                NoticeLevel::Success,
                "Your health risk is Low. Keep up the healthy habits!",
            ),
            Self::Moderate => Notice::new(
                NoticeLevel::Warning,
                "Moderate risk. Consider lifestyle improvements.",
            ),
            Self::High => Notice::new(
                NoticeLevel::Error,
                "High risk. Please consult a healthcare provider.",
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub raw_score: u8,
    pub tier: RiskTier,
}

pub fn score(profile: &HealthProfileInput) -> RiskScore {
    let indicators = [
        profile.age > AGE_RISK_THRESHOLD,
        profile.bmi >= BMI_RISK_THRESHOLD,
        profile.is_smoker,
        profile.activity_level == ActivityLevel::Low,
    ];
    let raw_score = indicators.into_iter().map(u8::from).sum();

    RiskScore {
        raw_score,
        tier: tier_for_raw_score(raw_score),
    }
}

pub fn tier_for_raw_score(raw_score: u8) -> RiskTier {
    match raw_score {
        0 | 1 => RiskTier::Low,
        2 => RiskTier::Moderate,
        _ => RiskTier::High,
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivityLevel, HealthProfileInput, RiskTier, score, tier_for_raw_score};

    fn profile(
        age: u32,
        bmi: f64,
        is_smoker: bool,
        activity_level: ActivityLevel,
    ) -> HealthProfileInput {
        HealthProfileInput {
            age,
            bmi,
            is_smoker,
            activity_level,
        }
    }

    #[test]
    fn all_indicators_set_scores_four_and_high() {
        for age in [51, 70, 90] {
            for bmi in [30.0, 35.5, 50.0] {
                let result = score(&profile(age, bmi, true, ActivityLevel::Low));
                assert_eq!(result.raw_score, 4);
                assert_eq!(result.tier, RiskTier::High);
            }
        }
    }

    #[test]
    fn no_indicators_set_scores_zero_and_low() {
        for age in [10, 30, 50] {
            for bmi in [10.0, 22.0, 29.9] {
                for activity in [ActivityLevel::Moderate, ActivityLevel::High] {
                    let result = score(&profile(age, bmi, false, activity));
                    assert_eq!(result.raw_score, 0);
                    assert_eq!(result.tier, RiskTier::Low);
                }
            }
        }
    }

    #[test]
    fn thresholds_are_strict_for_age_and_inclusive_for_bmi() {
        assert_eq!(score(&profile(50, 20.0, false, ActivityLevel::High)).raw_score, 0);
        assert_eq!(score(&profile(51, 20.0, false, ActivityLevel::High)).raw_score, 1);
        assert_eq!(score(&profile(30, 30.0, false, ActivityLevel::High)).raw_score, 1);
    }

    #[test]
    fn raw_score_counts_true_indicators() {
        let cases = [
            (profile(30, 22.0, false, ActivityLevel::High), 0),
            (profile(60, 22.0, false, ActivityLevel::High), 1),
            (profile(60, 31.0, false, ActivityLevel::High), 2),
            (profile(60, 31.0, true, ActivityLevel::High), 3),
            (profile(60, 31.0, true, ActivityLevel::Low), 4),
        ];

        let mut previous = 0;
        for (input, expected) in cases {
            let result = score(&input);
            assert_eq!(result.raw_score, expected);
            assert!(result.raw_score >= previous);
            previous = result.raw_score;
        }
    }

    #[test]
    fn tier_bands_match_raw_score_boundaries() {
        assert_eq!(tier_for_raw_score(0), RiskTier::Low);
        assert_eq!(tier_for_raw_score(1), RiskTier::Low);
        assert_eq!(tier_for_raw_score(2), RiskTier::Moderate);
        assert_eq!(tier_for_raw_score(3), RiskTier::High);
        assert_eq!(tier_for_raw_score(4), RiskTier::High);
    }

    #[test]
    fn activity_level_labels_parse_case_insensitively() {
        assert_eq!(ActivityLevel::from_label("low"), Some(ActivityLevel::Low));
        assert_eq!(ActivityLevel::from_label(" Moderate "), Some(ActivityLevel::Moderate));
        assert_eq!(ActivityLevel::from_label("extreme"), None);
    }
}
