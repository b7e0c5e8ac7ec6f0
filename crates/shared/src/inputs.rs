//! Declared bounds of the interactive input surface, and the checks that keep
//! out-of-range values away from the scorer and the classifier.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::risk::{ActivityLevel, HealthProfileInput};
use crate::vitals::VitalReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntegerBounds {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecimalBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

pub const BLOOD_PRESSURE_BOUNDS: IntegerBounds = IntegerBounds {
    min: 80,
    max: 200,
    default: 120,
};
pub const CHOLESTEROL_BOUNDS: IntegerBounds = IntegerBounds {
    min: 100,
    max: 400,
    default: 200,
};
pub const HEART_RATE_BOUNDS: IntegerBounds = IntegerBounds {
    min: 40,
    max: 180,
    default: 75,
};
pub const AGE_BOUNDS: IntegerBounds = IntegerBounds {
    min: 10,
    max: 90,
    default: 30,
};
pub const BMI_BOUNDS: DecimalBounds = DecimalBounds {
    min: 10.0,
    max: 50.0,
    default: 10.0,
};

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: String,
        max: String,
    },
    #[error("unknown {field} '{value}'")]
    UnknownOption { field: &'static str, value: String },
}

pub fn vital_reading(
    date: NaiveDate,
    blood_pressure: i64,
    cholesterol: i64,
    heart_rate: i64,
) -> Result<VitalReading, InputError> {
    Ok(VitalReading {
        date,
        blood_pressure: checked_integer("blood_pressure", blood_pressure, BLOOD_PRESSURE_BOUNDS)?,
        cholesterol: checked_integer("cholesterol", cholesterol, CHOLESTEROL_BOUNDS)?,
        heart_rate: checked_integer("heart_rate", heart_rate, HEART_RATE_BOUNDS)?,
    })
}

pub fn health_profile(
    age: i64,
    bmi: f64,
    is_smoker: bool,
    activity_level: &str,
) -> Result<HealthProfileInput, InputError> {
    let age = checked_integer("age", age, AGE_BOUNDS)?;
    if !bmi.is_finite() || bmi < BMI_BOUNDS.min || bmi > BMI_BOUNDS.max {
        return Err(InputError::OutOfRange {
            field: "bmi",
            min: format!("{:.1}", BMI_BOUNDS.min),
            max: format!("{:.1}", BMI_BOUNDS.max),
        });
    }
    let activity_level =
        ActivityLevel::from_label(activity_level).ok_or_else(|| InputError::UnknownOption {
            field: "activity_level",
            value: activity_level.trim().to_string(),
        })?;

    Ok(HealthProfileInput {
        age,
        bmi,
        is_smoker,
        activity_level,
    })
}

fn checked_integer(
    field: &'static str,
    value: i64,
    bounds: IntegerBounds,
) -> Result<u32, InputError> {
    if !(bounds.min..=bounds.max).contains(&value) {
        return Err(InputError::OutOfRange {
            field,
            min: bounds.min.to_string(),
            max: bounds.max.to_string(),
        });
    }

    u32::try_from(value).map_err(|_| InputError::OutOfRange {
        field,
        min: bounds.min.to_string(),
        max: bounds.max.to_string(),
    })
}
