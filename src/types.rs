//! Core types for the health dashboard
//!
//! This module defines the user profile, the daily lifestyle metrics, and the
//! risk assessment produced from them. Category labels are closed enums that
//! serialize with their display names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Self-reported gender used by the age surcharge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(ValidationError::UnknownVariant {
                field: "gender",
                value: s.to_string(),
            }),
        }
    }
}

/// User profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Age in years (1-120)
    pub age: u32,
    pub gender: Gender,
    /// Height in centimetres (50-250)
    pub height_cm: f64,
    /// Weight in kilograms (20-300)
    pub weight_kg: f64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            age: 30,
            gender: Gender::Male,
            height_cm: 175.0,
            weight_kg: 70.0,
        }
    }
}

impl Profile {
    /// Overwrite a single field
    pub fn apply(&mut self, field: ProfileField) {
        match field {
            ProfileField::Age(age) => self.age = age,
            ProfileField::Gender(gender) => self.gender = gender,
            ProfileField::HeightCm(height) => self.height_cm = height,
            ProfileField::WeightKg(weight) => self.weight_kg = weight,
        }
    }
}

/// A single profile edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileField {
    Age(u32),
    Gender(Gender),
    HeightCm(f64),
    WeightKg(f64),
}

/// Daily lifestyle metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyMetrics {
    /// Calorie intake (kcal, 500-5000)
    pub calories: u32,
    /// Exercise duration (minutes, 0-300)
    pub exercise_minutes: u32,
    /// Sleep duration (hours, 0-12 in half-hour steps)
    pub sleep_hours: f64,
    /// Step count (0-50000)
    pub steps: u32,
}

impl Default for DailyMetrics {
    fn default() -> Self {
        Self {
            calories: 2000,
            exercise_minutes: 30,
            sleep_hours: 7.5,
            steps: 8000,
        }
    }
}

impl DailyMetrics {
    /// Overwrite a single field
    pub fn apply(&mut self, field: MetricField) {
        match field {
            MetricField::Calories(calories) => self.calories = calories,
            MetricField::ExerciseMinutes(minutes) => self.exercise_minutes = minutes,
            MetricField::SleepHours(hours) => self.sleep_hours = hours,
            MetricField::Steps(steps) => self.steps = steps,
        }
    }
}

/// A single daily-metrics edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricField {
    Calories(u32),
    ExerciseMinutes(u32),
    SleepHours(f64),
    Steps(u32),
}

/// Overall risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(ValidationError::UnknownVariant {
                field: "risk_level",
                value: s.to_string(),
            }),
        }
    }
}

/// BMI classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BmiCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "underweight" => Ok(BmiCategory::Underweight),
            "normal" => Ok(BmiCategory::Normal),
            "overweight" => Ok(BmiCategory::Overweight),
            "obese" => Ok(BmiCategory::Obese),
            _ => Err(ValidationError::UnknownVariant {
                field: "bmi_category",
                value: s.to_string(),
            }),
        }
    }
}

/// Age bracket label shown next to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeFactor {
    Low,
    Medium,
    High,
}

impl AgeFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeFactor::Low => "Low",
            AgeFactor::Medium => "Medium",
            AgeFactor::High => "High",
        }
    }
}

impl fmt::Display for AgeFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeFactor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(AgeFactor::Low),
            "medium" => Ok(AgeFactor::Medium),
            "high" => Ok(AgeFactor::High),
            _ => Err(ValidationError::UnknownVariant {
                field: "age_factor",
                value: s.to_string(),
            }),
        }
    }
}

/// Result of one scoring run
///
/// Produced only by [`crate::RiskScorer`] and replaced wholesale on each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Clamped to 0.05-0.95
    pub risk_score: f64,
    /// Always `1 - risk_score`
    pub wellness_score: f64,
    pub bmi_category: BmiCategory,
    pub age_factor: AgeFactor,
    /// Ordered recommendations; the last two are always the generic tips
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    /// Recommendations joined into a single sentence-delimited string
    pub fn recommendation_text(&self) -> String {
        self.recommendations.join(". ")
    }
}
