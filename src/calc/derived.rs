//! Derived measurements
//!
//! Hip estimation for records without hips, proportional secondary
//! measurements, and their shape/age adjustments.

use crate::models::{
    BodyShape, DerivedFactors, HipsMeasurement, NormalizedMeasurement, ReferenceTables,
    SecondaryMeasurements, ShapeProfile,
};
use crate::units::round1;

/// Hips multiple of waist when no shape is known
pub const DEFAULT_HIP_FACTOR: f64 = 1.1;

/// Proportions of the secondary measurements
pub const SHOULDER_PER_WAIST: f64 = 0.8;
pub const UPPER_ARM_PER_BUST: f64 = 0.16;
pub const THIGH_PER_WAIST: f64 = 0.27;
pub const INSEAM_PER_HEIGHT: f64 = 0.45;

/// Hips multiple of waist for a shape, falling back to the default
pub fn hip_factor(shape: Option<BodyShape>, profiles: &[ShapeProfile]) -> f64 {
    shape
        .and_then(|s| profiles.iter().find(|p| p.shape == s))
        .map_or(DEFAULT_HIP_FACTOR, |p| p.hip_factor)
}

/// Measured hips, or waist × the shape's hip factor
///
/// Must run after classification, since the factor depends on the shape.
pub fn estimate_hips(
    m: &NormalizedMeasurement,
    shape: Option<BodyShape>,
    profiles: &[ShapeProfile],
) -> HipsMeasurement {
    match m.hips {
        Some(value) => HipsMeasurement {
            value,
            estimated: false,
        },
        None => {
            let factor = hip_factor(shape, profiles);
            let value = round1(m.waist * factor);
            tracing::debug!("Hips estimated as {} from waist factor {}", value, factor);
            HipsMeasurement {
                value,
                estimated: true,
            }
        }
    }
}

fn proportional(m: &NormalizedMeasurement) -> SecondaryMeasurements {
    SecondaryMeasurements {
        shoulder_width: m.waist * SHOULDER_PER_WAIST,
        upper_arm: m.bust * UPPER_ARM_PER_BUST,
        thigh: m.waist * THIGH_PER_WAIST,
        inseam: m.height_in_unit() * INSEAM_PER_HEIGHT,
    }
}

fn scale(values: SecondaryMeasurements, factors: &DerivedFactors) -> SecondaryMeasurements {
    SecondaryMeasurements {
        shoulder_width: values.shoulder_width * factors.shoulder_width,
        upper_arm: values.upper_arm * factors.upper_arm,
        thigh: values.thigh * factors.thigh,
        inseam: values.inseam * factors.inseam,
    }
}

fn rounded(values: SecondaryMeasurements) -> SecondaryMeasurements {
    SecondaryMeasurements {
        shoulder_width: round1(values.shoulder_width),
        upper_arm: round1(values.upper_arm),
        thigh: round1(values.thigh),
        inseam: round1(values.inseam),
    }
}

/// Proportional estimates in the circumference unit, one decimal
pub fn secondary_measurements(m: &NormalizedMeasurement) -> SecondaryMeasurements {
    rounded(proportional(m))
}

/// Secondary measurements after shape, then age, adjustments
///
/// Rounded once at the end, never between steps.
pub fn adjusted_measurements(
    m: &NormalizedMeasurement,
    shape: Option<BodyShape>,
    tables: &ReferenceTables,
) -> SecondaryMeasurements {
    let shape_factors = shape
        .and_then(|s| tables.shape_profile(s))
        .map_or(DerivedFactors::NEUTRAL, |p| p.adjustments);
    let age_factors = m
        .age_group
        .and_then(|g| tables.age_factor(g))
        .map_or(DerivedFactors::NEUTRAL, |f| f.adjustments);

    rounded(scale(scale(proportional(m), &shape_factors), &age_factors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeGroup, MeasurementInput};
    use crate::units::normalize;

    fn scenario() -> NormalizedMeasurement {
        normalize(&MeasurementInput::with_base("inches", 65.0, 130.0, 30.0, 36.0)).unwrap()
    }

    #[test]
    fn test_hip_factors_per_shape() {
        let tables = ReferenceTables::default();
        let profiles = &tables.shapes;
        assert_eq!(hip_factor(Some(BodyShape::Hourglass), profiles), 1.2);
        assert_eq!(hip_factor(Some(BodyShape::Pear), profiles), 1.3);
        assert_eq!(hip_factor(Some(BodyShape::Apple), profiles), 0.9);
        assert_eq!(hip_factor(Some(BodyShape::Rectangle), profiles), 1.0);
        assert_eq!(hip_factor(Some(BodyShape::Average), profiles), 1.1);
        assert_eq!(hip_factor(None, profiles), DEFAULT_HIP_FACTOR);
        assert_eq!(hip_factor(Some(BodyShape::Pear), &[]), DEFAULT_HIP_FACTOR);
    }

    #[test]
    fn test_estimate_hips() {
        let tables = ReferenceTables::default();
        let m = scenario();

        let hips = estimate_hips(&m, Some(BodyShape::Average), &tables.shapes);
        assert_eq!(hips.value, 33.0);
        assert!(hips.estimated);

        let hips = estimate_hips(&m, Some(BodyShape::Pear), &tables.shapes);
        assert_eq!(hips.value, 39.0);

        let measured = estimate_hips(&m.with_hips(41.0), Some(BodyShape::Pear), &tables.shapes);
        assert_eq!(measured.value, 41.0);
        assert!(!measured.estimated);
    }

    #[test]
    fn test_secondary_measurements() {
        let secondary = secondary_measurements(&scenario());
        assert_eq!(secondary.shoulder_width, 24.0);
        assert_eq!(secondary.upper_arm, 5.8);
        assert_eq!(secondary.thigh, 8.1);
        assert!((secondary.inseam - 29.25).abs() < 0.051);
    }

    #[test]
    fn test_neutral_adjustments_match_raw() {
        let tables = ReferenceTables::default();
        let mut m = scenario();
        m.age_group = Some(AgeGroup::From18To24);
        let adjusted = adjusted_measurements(&m, Some(BodyShape::Average), &tables);
        assert_eq!(adjusted, secondary_measurements(&m));
    }

    #[test]
    fn test_shape_then_age_adjustments_round_once() {
        let tables = ReferenceTables::default();
        let mut m = scenario();
        m.age_group = Some(AgeGroup::Over55);
        let adjusted = adjusted_measurements(&m, Some(BodyShape::Apple), &tables);

        // 30 × 0.8 × 1.05 × 0.98 = 24.696
        assert_eq!(adjusted.shoulder_width, 24.7);
        // 36 × 0.16 × 1.08 × 1.05 = 6.53184
        assert_eq!(adjusted.upper_arm, 6.5);
        // 30 × 0.27 × 0.95 × 1.04 = 8.0028
        assert_eq!(adjusted.thigh, 8.0);
    }

    #[test]
    fn test_unknown_shape_leaves_shape_factors_neutral() {
        let tables = ReferenceTables::default();
        let m = scenario();
        let adjusted = adjusted_measurements(&m, None, &tables);
        assert_eq!(adjusted, secondary_measurements(&m));
    }
}
