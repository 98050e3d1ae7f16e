//! Calculation results
//!
//! Structured output of the calculators, serializable for the caller.

use serde::Serialize;

use crate::models::measurement::{BodyShape, DisplayMeasurements, NormalizedMeasurement};

/// Label reported when no confident answer exists
pub const NOT_AVAILABLE: &str = "N/A";

/// Outcome of body-shape classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeClassification {
    pub shape: Option<BodyShape>,
    pub label: String,
    /// Points of the winning profile (10 per matched ratio)
    pub score: u32,
}

impl ShapeClassification {
    pub fn matched(shape: BodyShape, score: u32) -> Self {
        Self {
            shape: Some(shape),
            label: shape.as_str().to_string(),
            score,
        }
    }

    pub fn not_available() -> Self {
        Self {
            shape: None,
            label: NOT_AVAILABLE.to_string(),
            score: 0,
        }
    }
}

/// Outcome of standard-size matching
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeMatch {
    pub size: String,
    pub exact: bool,
    pub message: String,
    /// Summed distance from range midpoints, when a size was chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl SizeMatch {
    /// Size whose ranges contain every compared measurement
    pub fn exact(size: &str, distance: f64) -> Self {
        Self {
            size: size.to_string(),
            exact: true,
            message: format!("You are a {} size!", size),
            distance: Some(distance),
        }
    }

    pub fn closest(size: &str, distance: f64) -> Self {
        Self {
            size: size.to_string(),
            exact: false,
            message: format!(
                "Closest match: {}. Your measurements are slightly outside the exact range.",
                size
            ),
            distance: Some(distance),
        }
    }

    pub fn not_available(message: impl Into<String>) -> Self {
        Self {
            size: NOT_AVAILABLE.to_string(),
            exact: false,
            message: message.into(),
            distance: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.size != NOT_AVAILABLE
    }
}

/// Hips used for matching, and whether they were estimated
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HipsMeasurement {
    pub value: f64,
    pub estimated: bool,
}

/// Proportional secondary measurements, in the circumference unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SecondaryMeasurements {
    pub shoulder_width: f64,
    pub upper_arm: f64,
    pub thigh: f64,
    pub inseam: f64,
}

/// BMI, weight category and ideal weight range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiReport {
    pub bmi: f64,
    pub category: &'static str,
    pub ideal_weight_min_kg: f64,
    pub ideal_weight_max_kg: f64,
    /// Ideal range in the caller's weight unit
    pub ideal_weight_min: f64,
    pub ideal_weight_max: f64,
    pub weight_unit: &'static str,
}

/// Observed body ratios and proportion warnings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionReport {
    pub bust_to_waist: f64,
    pub hips_to_waist: f64,
    /// True when hips/waist comes from the fixed proxy, not a measurement
    pub hips_proxy: bool,
    pub height_to_waist: f64,
    pub warnings: Vec<String>,
}

/// Qualitative confidence band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Good,
    Moderate,
    Low,
}

impl ConfidenceLevel {
    /// Band for a 0-100 score
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => ConfidenceLevel::High,
            75..=89 => ConfidenceLevel::Good,
            60..=74 => ConfidenceLevel::Moderate,
            _ => ConfidenceLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High Confidence",
            ConfidenceLevel::Good => "Good Confidence",
            ConfidenceLevel::Moderate => "Moderate Confidence",
            ConfidenceLevel::Low => "Low Confidence",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "All key measurements provided with consistent proportions.",
            ConfidenceLevel::Good => "Most measurements provided with reasonable proportions.",
            ConfidenceLevel::Moderate => {
                "Basic measurements provided. Add weight/height for better accuracy."
            }
            ConfidenceLevel::Low => "Limited or inconsistent measurements. Please verify inputs.",
        }
    }
}

/// Independently capped scoring categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Measurements,
    Proportions,
    BmiCorrelation,
    ExtraMeasurements,
    ShapeSpecificity,
    AdditionalFactors,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: ScoreCategory,
    pub earned: f64,
    pub possible: f64,
}

/// Per-category points behind a confidence score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub categories: Vec<CategoryScore>,
    /// Capped deductions, subtracted after summing the categories
    pub deductions: f64,
}

impl ScoreBreakdown {
    /// Points earned before deductions
    pub fn total_earned(&self) -> f64 {
        self.categories.iter().map(|c| c.earned).sum()
    }

    /// Sum of every category maximum, whether or not its inputs were present
    pub fn total_possible(&self) -> f64 {
        self.categories.iter().map(|c| c.possible).sum()
    }

    pub fn earned(&self, category: ScoreCategory) -> f64 {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0.0, |c| c.earned)
    }
}

/// Confidence score with its band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceResult {
    pub score: u8,
    pub level: ConfidenceLevel,
    pub label: &'static str,
    pub description: &'static str,
    pub breakdown: ScoreBreakdown,
}

impl ConfidenceResult {
    pub fn new(score: u8, breakdown: ScoreBreakdown) -> Self {
        let level = ConfidenceLevel::from_score(score);
        Self {
            score,
            level,
            label: level.label(),
            description: level.description(),
            breakdown,
        }
    }
}

/// Everything one calculation produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationReport {
    pub measurements: NormalizedMeasurement,
    pub display: DisplayMeasurements,
    pub bmi: BmiReport,
    pub classified_shape: ShapeClassification,
    /// Declared shape if given, otherwise the classified one
    pub effective_shape: Option<BodyShape>,
    pub hips: HipsMeasurement,
    pub size: SizeMatch,
    pub proportions: ProportionReport,
    pub secondary: SecondaryMeasurements,
    /// Secondary measurements after shape and age adjustments
    pub adjusted: SecondaryMeasurements,
    pub confidence: ConfidenceResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ConfidenceLevel::from_score(100), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(90), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(89), ConfidenceLevel::Good);
        assert_eq!(ConfidenceLevel::from_score(75), ConfidenceLevel::Good);
        assert_eq!(ConfidenceLevel::from_score(74), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_score(60), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_score(59), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0), ConfidenceLevel::Low);
    }

    #[test]
    fn test_size_match_messages() {
        assert_eq!(SizeMatch::exact("M", 0.0).message, "You are a M size!");
        assert!(SizeMatch::closest("L", 2.5).message.starts_with("Closest match: L."));
        let none = SizeMatch::not_available("No size chart configured.");
        assert!(!none.is_available());
        assert_eq!(none.size, "N/A");
    }

    #[test]
    fn test_shape_classification_label() {
        assert_eq!(ShapeClassification::matched(BodyShape::Pear, 20).label, "pear");
        assert_eq!(ShapeClassification::not_available().label, "N/A");
    }
}
