use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Notice, NoticeLevel};

pub const BLOOD_PRESSURE_NORMAL_BELOW: u32 = 130;
pub const CHOLESTEROL_NORMAL_MAX: u32 = 200;
pub const HEART_RATE_NORMAL_MIN: u32 = 60;
pub const HEART_RATE_NORMAL_MAX: u32 = 100;

const NO_READINGS_MESSAGE: &str =
    "No data to display yet. Please enter your health metrics above.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalReading {
    pub date: NaiveDate,
    pub blood_pressure: u32,
    pub cholesterol: u32,
    pub heart_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalMetric {
    BloodPressure,
    Cholesterol,
    HeartRate,
}

impl VitalMetric {
    pub const ALL: [Self; 3] = [Self::BloodPressure, Self::Cholesterol, Self::HeartRate];

    pub const fn label(self) -> &'static str {
        match self {
            Self::BloodPressure => "Blood Pressure",
            Self::Cholesterol => "Cholesterol",
            Self::HeartRate => "Heart Rate",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::BloodPressure => "mm Hg",
            Self::Cholesterol => "mg/dL",
            Self::HeartRate => "bpm",
        }
    }

    fn value_of(self, reading: &VitalReading) -> u32 {
        match self {
            Self::BloodPressure => reading.blood_pressure,
            Self::Cholesterol => reading.cholesterol,
            Self::HeartRate => reading.heart_rate,
        }
    }

    fn notice(self, normal: bool) -> Notice {
        let message = match (self, normal) {
            (Self::BloodPressure, true) => "Blood Pressure is in a healthy range.",
            (Self::BloodPressure, false) => "Monitor your blood pressure.",
            (Self::Cholesterol, true) => "Cholesterol is in a healthy range.",
            (Self::Cholesterol, false) => "Cholesterol is above the recommended level.",
            (Self::HeartRate, true) => "Heart rate is normal.",
            (Self::HeartRate, false) => "Abnormal heart rate detected.",
        };
        let level = if normal {
            NoticeLevel::Success
        } else {
            NoticeLevel::Warning
        };
        Notice::new(level, message)
    }
}

/// Per-metric "normal" flags for a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricClassification {
    pub blood_pressure_normal: bool,
    pub cholesterol_normal: bool,
    pub heart_rate_normal: bool,
}

impl MetricClassification {
    pub const fn is_normal(self, metric: VitalMetric) -> bool {
        match metric {
            VitalMetric::BloodPressure => self.blood_pressure_normal,
            VitalMetric::Cholesterol => self.cholesterol_normal,
            VitalMetric::HeartRate => self.heart_rate_normal,
        }
    }
}

pub fn classify(reading: &VitalReading) -> MetricClassification {
    MetricClassification {
        blood_pressure_normal: reading.blood_pressure < BLOOD_PRESSURE_NORMAL_BELOW,
        cholesterol_normal: reading.cholesterol <= CHOLESTEROL_NORMAL_MAX,
        heart_rate_normal: (HEART_RATE_NORMAL_MIN..=HEART_RATE_NORMAL_MAX)
            .contains(&reading.heart_rate),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalSummary {
    pub reading: VitalReading,
    pub classification: MetricClassification,
    pub notices: Vec<Notice>,
}

impl VitalSummary {
    pub fn for_reading(reading: VitalReading) -> Self {
        let classification = classify(&reading);
        let notices = VitalMetric::ALL
            .into_iter()
            .map(|metric| metric.notice(classification.is_normal(metric)))
            .collect();

        Self {
            reading,
            classification,
            notices,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalTrends {
    pub blood_pressure: Vec<TrendPoint>,
    pub cholesterol: Vec<TrendPoint>,
    pub heart_rate: Vec<TrendPoint>,
}

/// Append-only sequence of readings for one session, in entry order.
#[derive(Debug, Clone, Default)]
pub struct VitalLog {
    readings: Vec<VitalReading>,
}

impl VitalLog {
    pub fn append(&mut self, reading: VitalReading) -> usize {
        self.readings.push(reading);
        self.readings.len()
    }

    pub fn readings(&self) -> &[VitalReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn latest(&self) -> Option<&VitalReading> {
        self.readings.last()
    }

    pub fn latest_summary(&self) -> Option<VitalSummary> {
        self.latest().copied().map(VitalSummary::for_reading)
    }

    pub fn empty_notice() -> Notice {
        Notice::new(NoticeLevel::Info, NO_READINGS_MESSAGE)
    }

    pub fn trends(&self) -> VitalTrends {
        let series = |metric: VitalMetric| {
            self.readings
                .iter()
                .map(|reading| TrendPoint {
                    date: reading.date,
                    value: metric.value_of(reading),
                })
                .collect::<Vec<_>>()
        };

        VitalTrends {
            blood_pressure: series(VitalMetric::BloodPressure),
            cholesterol: series(VitalMetric::Cholesterol),
            heart_rate: series(VitalMetric::HeartRate),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{MetricClassification, VitalLog, VitalReading, VitalSummary, classify};
    use crate::models::NoticeLevel;

    fn reading(day: u32, blood_pressure: u32, cholesterol: u32, heart_rate: u32) -> VitalReading {
        VitalReading {
            date: NaiveDate::from_ymd_opt(2026, 3, day).expect("valid test date"),
            blood_pressure,
            cholesterol,
            heart_rate,
        }
    }

    fn all(normal: bool) -> MetricClassification {
        MetricClassification {
            blood_pressure_normal: normal,
            cholesterol_normal: normal,
            heart_rate_normal: normal,
        }
    }

    #[test]
    fn typical_reading_is_normal_on_every_metric() {
        assert_eq!(classify(&reading(1, 125, 190, 70)), all(true));
    }

    #[test]
    fn elevated_reading_is_abnormal_on_every_metric() {
        assert_eq!(classify(&reading(1, 135, 210, 110)), all(false));
    }

    #[test]
    fn boundary_reading_is_normal_on_every_metric() {
        assert_eq!(classify(&reading(1, 129, 200, 60)), all(true));
        assert_eq!(classify(&reading(1, 129, 200, 100)), all(true));
    }

    #[test]
    fn values_just_past_each_cutoff_are_abnormal() {
        let result = classify(&reading(1, 130, 201, 59));
        assert_eq!(result, all(false));
        assert!(!classify(&reading(1, 120, 180, 101)).heart_rate_normal);
    }

    #[test]
    fn summary_uses_only_the_last_appended_reading() {
        let mut log = VitalLog::default();
        assert!(log.latest_summary().is_none());

        log.append(reading(1, 150, 250, 120));
        log.append(reading(2, 140, 230, 45));
        let count = log.append(reading(3, 118, 180, 72));
        assert_eq!(count, 3);

        let summary = log.latest_summary().expect("summary should exist");
        assert_eq!(summary.reading, reading(3, 118, 180, 72));
        assert_eq!(summary.classification, all(true));
    }

    #[test]
    fn summary_notices_follow_metric_order_and_levels() {
        let summary = VitalSummary::for_reading(reading(1, 135, 190, 110));
        let messages = summary
            .notices
            .iter()
            .map(|notice| (notice.level, notice.message.as_str()))
            .collect::<Vec<_>>();

        assert_eq!(
            messages,
            vec![
                (NoticeLevel::Warning, "Monitor your blood pressure."),
                (NoticeLevel::Success, "Cholesterol is in a healthy range."),
                (NoticeLevel::Warning, "Abnormal heart rate detected."),
            ]
        );
    }

    #[test]
    fn trends_keep_insertion_order() {
        let mut log = VitalLog::default();
        log.append(reading(5, 120, 190, 70));
        log.append(reading(2, 125, 195, 75));

        let trends = log.trends();
        let values = trends
            .blood_pressure
            .iter()
            .map(|point| point.value)
            .collect::<Vec<_>>();
        assert_eq!(values, vec![120, 125]);
        assert_eq!(trends.heart_rate[1].date, reading(2, 0, 0, 0).date);
    }
}
