//! Range validation
//!
//! Mirrors the input constraints of the dashboard form. The scorer never calls
//! into this module; the store checks every edit before applying it.

use crate::types::{DailyMetrics, MetricField, Profile, ProfileField};

pub const AGE_RANGE: (u32, u32) = (1, 120);
pub const HEIGHT_CM_RANGE: (f64, f64) = (50.0, 250.0);
pub const WEIGHT_KG_RANGE: (f64, f64) = (20.0, 300.0);
pub const CALORIES_RANGE: (u32, u32) = (500, 5000);
pub const EXERCISE_MINUTES_RANGE: (u32, u32) = (0, 300);
pub const SLEEP_HOURS_RANGE: (f64, f64) = (0.0, 12.0);
pub const STEPS_RANGE: (u32, u32) = (0, 50_000);

/// Validation errors for profile and metric values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be a multiple of 0.5, got {value}")]
    NotHalfStep { field: &'static str, value: f64 },

    #[error("Unknown {field}: {value}")]
    UnknownVariant { field: &'static str, value: String },
}

fn check_int(
    field: &'static str,
    value: u32,
    (min, max): (u32, u32),
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min: min as f64,
            max: max as f64,
            value: value as f64,
        });
    }
    Ok(())
}

fn check_float(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ValidationError> {
    // NaN fails both comparisons, so test the accepted interval directly
    if !(value >= min && value <= max) {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

impl ProfileField {
    /// Check the carried value against the form constraints
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            ProfileField::Age(age) => check_int("age", age, AGE_RANGE),
            ProfileField::Gender(_) => Ok(()),
            ProfileField::HeightCm(height) => check_float("height_cm", height, HEIGHT_CM_RANGE),
            ProfileField::WeightKg(weight) => check_float("weight_kg", weight, WEIGHT_KG_RANGE),
        }
    }
}

impl MetricField {
    /// Check the carried value against the form constraints
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            MetricField::Calories(calories) => check_int("calories", calories, CALORIES_RANGE),
            MetricField::ExerciseMinutes(minutes) => {
                check_int("exercise_minutes", minutes, EXERCISE_MINUTES_RANGE)
            }
            MetricField::SleepHours(hours) => {
                check_float("sleep_hours", hours, SLEEP_HOURS_RANGE)?;
                if (hours * 2.0).fract() != 0.0 {
                    return Err(ValidationError::NotHalfStep {
                        field: "sleep_hours",
                        value: hours,
                    });
                }
                Ok(())
            }
            MetricField::Steps(steps) => check_int("steps", steps, STEPS_RANGE),
        }
    }
}

impl Profile {
    /// Validate every field
    pub fn validate(&self) -> Result<(), ValidationError> {
        ProfileField::Age(self.age).validate()?;
        ProfileField::HeightCm(self.height_cm).validate()?;
        ProfileField::WeightKg(self.weight_kg).validate()
    }
}

impl DailyMetrics {
    /// Validate every field
    pub fn validate(&self) -> Result<(), ValidationError> {
        MetricField::Calories(self.calories).validate()?;
        MetricField::ExerciseMinutes(self.exercise_minutes).validate()?;
        MetricField::SleepHours(self.sleep_hours).validate()?;
        MetricField::Steps(self.steps).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Profile::default().validate().is_ok());
        assert!(DailyMetrics::default().validate().is_ok());
    }

    #[test]
    fn test_age_bounds() {
        assert!(ProfileField::Age(1).validate().is_ok());
        assert!(ProfileField::Age(120).validate().is_ok());
        assert!(matches!(
            ProfileField::Age(0).validate(),
            Err(ValidationError::OutOfRange { field: "age", .. })
        ));
        assert!(ProfileField::Age(121).validate().is_err());
    }

    #[test]
    fn test_height_rejects_nan() {
        assert!(ProfileField::HeightCm(f64::NAN).validate().is_err());
        assert!(ProfileField::HeightCm(49.9).validate().is_err());
        assert!(ProfileField::HeightCm(250.0).validate().is_ok());
    }

    #[test]
    fn test_sleep_half_hour_granularity() {
        assert!(MetricField::SleepHours(7.5).validate().is_ok());
        assert!(MetricField::SleepHours(0.0).validate().is_ok());
        assert_eq!(
            MetricField::SleepHours(7.25).validate(),
            Err(ValidationError::NotHalfStep {
                field: "sleep_hours",
                value: 7.25
            })
        );
        assert!(MetricField::SleepHours(12.5).validate().is_err());
    }

    #[test]
    fn test_metric_bounds() {
        assert!(MetricField::Calories(499).validate().is_err());
        assert!(MetricField::Calories(5000).validate().is_ok());
        assert!(MetricField::ExerciseMinutes(301).validate().is_err());
        assert!(MetricField::Steps(50_000).validate().is_ok());
        assert!(MetricField::Steps(50_001).validate().is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = ProfileField::WeightKg(10.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "weight_kg must be between 20 and 300, got 10");
    }
}
