//! Risk scoring
//!
//! Maps a profile and the day's metrics to a [`RiskAssessment`] on an additive
//! point scale:
//! - Age and BMI bands
//! - Lifestyle penalties (exercise, sleep, calories)
//! - Gender-conditioned age surcharge
//!
//! The total is clamped to `[MIN_RISK_SCORE, MAX_RISK_SCORE]`. Inputs are not
//! validated here.

use crate::types::{
    AgeFactor, BmiCategory, DailyMetrics, Gender, Profile, RiskAssessment, RiskLevel,
};

pub const MIN_RISK_SCORE: f64 = 0.05;
pub const MAX_RISK_SCORE: f64 = 0.95;

/// Daily exercise below this many minutes adds a penalty
pub const EXERCISE_TARGET_MINUTES: u32 = 150;
/// Sleep below this many hours adds a penalty
pub const SLEEP_TARGET_HOURS: f64 = 7.0;
/// Calorie intake above this adds a penalty
pub const CALORIE_LIMIT: u32 = 2500;

pub const HYDRATION_TIP: &str = "Stay hydrated with 8+ glasses of water daily";
pub const NUTRITION_TIP: &str = "Include fruits and vegetables in your daily diet";

/// Stateless scorer
pub struct RiskScorer;

impl RiskScorer {
    /// Body mass index rounded to one decimal place
    pub fn bmi(profile: &Profile) -> f64 {
        let height_m = profile.height_cm / 100.0;
        let raw = profile.weight_kg / (height_m * height_m);
        round_tenths(raw)
    }

    /// Score a profile and its daily metrics
    pub fn assess(profile: &Profile, metrics: &DailyMetrics) -> RiskAssessment {
        let bmi = Self::bmi(profile);
        let age = profile.age;

        let mut score = age_points(age);
        score += bmi_points(bmi);

        if metrics.exercise_minutes < EXERCISE_TARGET_MINUTES {
            score += 0.15;
        }
        if metrics.sleep_hours < SLEEP_TARGET_HOURS {
            score += 0.10;
        }
        if metrics.calories > CALORIE_LIMIT {
            score += 0.10;
        }

        score += gender_points(profile.gender, age);

        let risk_score = score.clamp(MIN_RISK_SCORE, MAX_RISK_SCORE);
        let risk_level = risk_level(risk_score);

        RiskAssessment {
            risk_level,
            risk_score,
            wellness_score: 1.0 - risk_score,
            bmi_category: bmi_category(bmi),
            age_factor: age_factor(age),
            recommendations: recommendations(bmi, age, metrics, risk_level),
        }
    }
}

/// Round to one decimal using the exact binary value, ties toward the larger value
///
/// Scaling by ten first would turn 24.9499... into 250.0 and round up.
fn round_tenths(value: f64) -> f64 {
    if !value.is_finite() || !(0.0..1e15).contains(&value) {
        return (value * 10.0).round() / 10.0;
    }

    // Rust prints the exact decimal expansion of the stored value
    let exact = format!("{value:.60}");
    let (whole, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut digits = frac.bytes().map(|b| u64::from(b - b'0'));
    let first = digits.next().unwrap_or(0);
    let second = digits.next().unwrap_or(0);

    let mut tenths = whole.parse::<u64>().unwrap_or(0) * 10 + first;
    if second >= 5 {
        tenths += 1;
    }
    tenths as f64 / 10.0
}

fn age_points(age: u32) -> f64 {
    match age {
        0..=24 => 0.10,
        25..=39 => 0.20,
        40..=54 => 0.35,
        55..=69 => 0.50,
        _ => 0.70,
    }
}

fn bmi_points(bmi: f64) -> f64 {
    if bmi < 18.5 {
        0.15
    } else if bmi < 25.0 {
        0.05
    } else if bmi < 30.0 {
        0.20
    } else {
        0.35
    }
}

fn gender_points(gender: Gender, age: u32) -> f64 {
    match gender {
        Gender::Male if age > 45 => 0.05,
        Gender::Female if age > 55 => 0.05,
        _ => 0.0,
    }
}

/// Classify a clamped risk score
pub fn risk_level(risk_score: f64) -> RiskLevel {
    if risk_score > 0.6 {
        RiskLevel::High
    } else if risk_score > 0.3 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Classify a (rounded) BMI value
pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

pub fn age_factor(age: u32) -> AgeFactor {
    if age < 30 {
        AgeFactor::Low
    } else if age < 50 {
        AgeFactor::Medium
    } else {
        AgeFactor::High
    }
}

fn recommendations(bmi: f64, age: u32, metrics: &DailyMetrics, level: RiskLevel) -> Vec<String> {
    let mut out = Vec::new();

    if bmi > 25.0 {
        out.push("Consider a balanced diet with reduced calorie intake");
    }
    if bmi < 18.5 {
        out.push("Focus on healthy weight gain with nutritious foods");
    }
    if metrics.exercise_minutes < EXERCISE_TARGET_MINUTES {
        out.push("Increase physical activity to 150+ minutes per week");
    }
    if metrics.sleep_hours < SLEEP_TARGET_HOURS {
        out.push("Prioritize 7-9 hours of quality sleep nightly");
    }
    if age > 40 {
        out.push("Regular health check-ups become increasingly important");
    }
    if level == RiskLevel::High {
        out.push("Consult with healthcare professionals for personalized guidance");
    }

    out.push(HYDRATION_TIP);
    out.push(NUTRITION_TIP);

    out.into_iter().map(String::from).collect()
}
