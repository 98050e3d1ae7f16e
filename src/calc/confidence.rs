//! Confidence scoring
//!
//! Additive point model over independently capped categories, minus capped
//! deductions, expressed as a percentage of the sum of every category's
//! maximum. Categories whose inputs are missing still count toward that
//! maximum, so incomplete records score lower rather than being rejected.

use crate::calc::shape::shape_is_consistent;
use crate::models::{
    BodyShape, CategoryScore, ConfidenceResult, MeasurementInput, ReferenceTables,
    ScoreBreakdown, ScoreCategory,
};
use crate::units::{normalize_lenient, PartialMeasurement};

/// Inclusive acceptable band for a checked ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    /// Band from inclusive bounds
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether a value lies inside the band, bounds included
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const BUST_WAIST_BAND: Band = Band::new(1.1, 1.5);
pub const HIPS_WAIST_BAND: Band = Band::new(1.1, 1.6);
pub const WAIST_HEIGHT_BAND: Band = Band::new(0.3, 0.5);
pub const BMI_BAND: Band = Band::new(16.0, 35.0);

/// BMI band earning full correlation points
pub const HEALTHY_BMI_BAND: Band = Band::new(18.5, 25.0);
/// Half points: `[17, 30)` outside the healthy band
pub const FAIR_BMI_MIN: f64 = 17.0;
pub const FAIR_BMI_MAX_EXCLUSIVE: f64 = 30.0;

pub const POINTS_PER_MEASUREMENT: f64 = 15.0;
pub const MEASUREMENTS_MAX: f64 = 60.0;
pub const PROPORTIONS_MAX: f64 = 20.0;
pub const PROPORTION_PENALTY: f64 = 3.0;
pub const BMI_CORRELATION_MAX: f64 = 10.0;
pub const BMI_CORRELATION_FAIR: f64 = 5.0;
pub const EXTRA_MEASUREMENTS_MAX: f64 = 5.0;
pub const POINTS_PER_EXTRA: f64 = 5.0 / 3.0;
pub const SHAPE_MAX: f64 = 5.0;
pub const SHAPE_UNVERIFIED: f64 = 2.0;
pub const FACTORS_MAX: f64 = 5.0;
pub const AGE_POINTS: f64 = 1.5;
pub const BODY_TYPE_POINTS: f64 = 2.0;
pub const HEIGHT_CATEGORY_POINTS: f64 = 1.5;

pub const DEDUCTION: f64 = 10.0;
pub const DEDUCTIONS_MAX: f64 = 20.0;
/// Waist at or above this share of height is implausible
pub const WAIST_HEIGHT_LIMIT: f64 = 0.5;
pub const BMI_PLAUSIBLE_MIN: f64 = 16.0;
pub const BMI_PLAUSIBLE_MAX: f64 = 40.0;

fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    Some(numerator? / denominator?)
}

fn measurement_points(p: &PartialMeasurement) -> f64 {
    let present = [
        p.height_present,
        p.weight_present,
        p.waist.is_some(),
        p.bust.is_some(),
    ];
    let points = present.iter().filter(|&&is_present| is_present).count() as f64 * POINTS_PER_MEASUREMENT;
    points.min(MEASUREMENTS_MAX)
}

/// Start at the maximum and lose a fixed penalty per checked ratio out of band
fn proportion_points(p: &PartialMeasurement) -> f64 {
    let checks = [
        (ratio(p.bust, p.waist), BUST_WAIST_BAND),
        (ratio(p.hips, p.waist), HIPS_WAIST_BAND),
        (ratio(p.waist, p.height_in_unit()), WAIST_HEIGHT_BAND),
        (p.bmi(), BMI_BAND),
    ];
    let failures = checks
        .iter()
        .filter(|(value, band)| value.is_some_and(|v| !band.contains(v)))
        .count() as f64;
    (PROPORTIONS_MAX - failures * PROPORTION_PENALTY).max(0.0)
}

fn bmi_correlation_points(p: &PartialMeasurement) -> f64 {
    match p.bmi() {
        Some(bmi) if HEALTHY_BMI_BAND.contains(bmi) => BMI_CORRELATION_MAX,
        Some(bmi) if bmi >= FAIR_BMI_MIN && bmi < FAIR_BMI_MAX_EXCLUSIVE => BMI_CORRELATION_FAIR,
        _ => 0.0,
    }
}

fn extra_measurement_points(p: &PartialMeasurement) -> f64 {
    let extras = [p.underbust, p.high_hip, p.neck];
    let count = extras.iter().flatten().count() as f64;
    (count * POINTS_PER_EXTRA).min(EXTRA_MEASUREMENTS_MAX)
}

fn declared_specific_shape(p: &PartialMeasurement) -> Option<BodyShape> {
    p.body_shape.filter(|s| *s != BodyShape::Average)
}

fn shape_points(p: &PartialMeasurement) -> f64 {
    let Some(shape) = declared_specific_shape(p) else {
        return 0.0;
    };
    let consistent = match (p.unit, p.bust, p.waist, p.hips) {
        (Some(unit), Some(bust), Some(waist), Some(hips)) => {
            shape_is_consistent(shape, unit, bust, waist, hips)
        }
        _ => false,
    };
    if consistent {
        SHAPE_MAX
    } else {
        SHAPE_UNVERIFIED
    }
}

fn additional_factor_points(p: &PartialMeasurement, tables: &ReferenceTables) -> f64 {
    let mut points = 0.0;
    if let Some(group) = p.age_group {
        points += AGE_POINTS;
        points += tables.age_factor(group).map_or(0.0, |f| f.confidence_bonus);
    }
    if declared_specific_shape(p).is_some() {
        points += BODY_TYPE_POINTS;
    }
    if p.height_category.is_some() {
        points += HEIGHT_CATEGORY_POINTS;
    }
    f64::min(points, FACTORS_MAX)
}

/// Capped deductions for implausible combinations
pub fn deductions(p: &PartialMeasurement) -> f64 {
    let mut total = 0.0;
    if let (Some(bust), Some(waist)) = (p.bust, p.waist) {
        if bust <= waist {
            total += DEDUCTION;
        }
    }
    if let (Some(hips), Some(waist)) = (p.hips, p.waist) {
        if hips <= waist {
            total += DEDUCTION;
        }
    }
    if let (Some(height), Some(waist)) = (p.height_in_unit(), p.waist) {
        if waist >= height * WAIST_HEIGHT_LIMIT {
            total += DEDUCTION;
        }
    }
    if let Some(bmi) = p.bmi() {
        if !(BMI_PLAUSIBLE_MIN..=BMI_PLAUSIBLE_MAX).contains(&bmi) {
            total += DEDUCTION;
        }
    }
    f64::min(total, DEDUCTIONS_MAX)
}

/// Per-category points for a (possibly partial) record
pub fn score_breakdown(p: &PartialMeasurement, tables: &ReferenceTables) -> ScoreBreakdown {
    let category = |category, earned, possible| CategoryScore {
        category,
        earned,
        possible,
    };
    ScoreBreakdown {
        categories: vec![
            category(ScoreCategory::Measurements, measurement_points(p), MEASUREMENTS_MAX),
            category(ScoreCategory::Proportions, proportion_points(p), PROPORTIONS_MAX),
            category(ScoreCategory::BmiCorrelation, bmi_correlation_points(p), BMI_CORRELATION_MAX),
            category(
                ScoreCategory::ExtraMeasurements,
                extra_measurement_points(p),
                EXTRA_MEASUREMENTS_MAX,
            ),
            category(ScoreCategory::ShapeSpecificity, shape_points(p), SHAPE_MAX),
            category(
                ScoreCategory::AdditionalFactors,
                additional_factor_points(p, tables),
                FACTORS_MAX,
            ),
        ],
        deductions: deductions(p),
    }
}

/// Score a record from 0 to 100
pub fn score_confidence(p: &PartialMeasurement, tables: &ReferenceTables) -> ConfidenceResult {
    let breakdown = score_breakdown(p, tables);
    let earned = (breakdown.total_earned() - breakdown.deductions).max(0.0);
    let possible = breakdown.total_possible();
    let percent = if possible > 0.0 {
        (100.0 * earned / possible).round()
    } else {
        0.0
    };
    let score = percent.clamp(0.0, 100.0) as u8;

    tracing::debug!(
        "Confidence {}: earned {} minus {} deductions of {} possible",
        score,
        breakdown.total_earned(),
        breakdown.deductions,
        possible
    );

    ConfidenceResult::new(score, breakdown)
}

/// Score a raw record, tolerating missing or invalid fields
pub fn score_input(input: &MeasurementInput, tables: &ReferenceTables) -> ConfidenceResult {
    score_confidence(&normalize_lenient(input), tables)
}
