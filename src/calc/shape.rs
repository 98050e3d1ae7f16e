//! Body-shape classification
//!
//! Nearest-profile match with a fixed tolerance band: every observed ratio
//! within `RATIO_TOLERANCE` of a profile's target earns `POINTS_PER_RATIO`.
//! The strictly highest score wins; ties keep the earlier profile.

use crate::models::{BodyShape, NormalizedMeasurement, ShapeClassification, ShapeProfile};
use crate::units::{round2, UnitSystem};

/// Allowed distance between observed and target ratio
pub const RATIO_TOLERANCE: f64 = 0.1;
/// Points per ratio inside the tolerance band
pub const POINTS_PER_RATIO: u32 = 10;
/// Hips stand-in (× waist) when hips were not measured
pub const HIPS_PROXY_FACTOR: f64 = 1.25;

/// Difference thresholds for shape consistency, in inches
const STRONG_CURVE_IN: f64 = 7.0;
const BALANCED_IN: f64 = 5.0;
const APPLE_BUST_IN: f64 = 4.0;

/// Ratios observed on one record, rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedRatios {
    pub bust_to_waist: f64,
    pub hips_to_waist: f64,
    pub height_to_waist: f64,
    /// Hips ratio comes from `HIPS_PROXY_FACTOR`
    pub hips_proxy: bool,
}

/// Ratios of a record, two decimals, with the hips proxy when unmeasured
pub fn observed_ratios(m: &NormalizedMeasurement) -> ObservedRatios {
    let (hips, hips_proxy) = match m.hips {
        Some(hips) => (hips, false),
        None => (HIPS_PROXY_FACTOR * m.waist, true),
    };
    ObservedRatios {
        bust_to_waist: round2(m.bust / m.waist),
        hips_to_waist: round2(hips / m.waist),
        height_to_waist: round2(m.height_in_unit() / m.waist),
        hips_proxy,
    }
}

fn within_tolerance(observed: f64, target: f64) -> bool {
    observed >= target - RATIO_TOLERANCE && observed <= target + RATIO_TOLERANCE
}

/// Score of one profile against observed ratios
pub fn profile_score(ratios: &ObservedRatios, profile: &ShapeProfile) -> u32 {
    [
        (ratios.bust_to_waist, profile.ratios.bust_to_waist),
        (ratios.hips_to_waist, profile.ratios.hips_to_waist),
        (ratios.height_to_waist, profile.ratios.height_to_waist),
    ]
    .into_iter()
    .filter(|(observed, target)| within_tolerance(*observed, *target))
    .count() as u32
        * POINTS_PER_RATIO
}

/// Classify a record against the shape profiles
///
/// Returns "N/A" when no profile scores above zero or the table is empty.
pub fn classify_shape(m: &NormalizedMeasurement, profiles: &[ShapeProfile]) -> ShapeClassification {
    let ratios = observed_ratios(m);

    let mut best: Option<(BodyShape, u32)> = None;
    for profile in profiles {
        let score = profile_score(&ratios, profile);
        tracing::debug!("Shape {} scored {}", profile.shape.as_str(), score);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((profile.shape, score));
        }
    }

    match best {
        Some((shape, score)) => ShapeClassification::matched(shape, score),
        None => {
            tracing::warn!(
                "No shape profile matched ratios {:.2}/{:.2}/{:.2}",
                ratios.bust_to_waist,
                ratios.hips_to_waist,
                ratios.height_to_waist
            );
            ShapeClassification::not_available()
        }
    }
}

/// Whether measured bust, waist and hips agree with a declared shape
///
/// Thresholds are defined in inches and scaled for centimeter records.
pub fn shape_is_consistent(
    shape: BodyShape,
    unit: UnitSystem,
    bust: f64,
    waist: f64,
    hips: f64,
) -> bool {
    let scale = UnitSystem::Inches.circumference_factor(unit);
    let strong = STRONG_CURVE_IN * scale;
    let balanced = BALANCED_IN * scale;

    let bust_waist = bust - waist;
    let hips_waist = hips - waist;
    let bust_hips = (bust - hips).abs();

    match shape {
        BodyShape::Hourglass => bust_waist >= strong && hips_waist >= strong && bust_hips <= balanced,
        BodyShape::Pear => hips > bust && hips_waist >= strong,
        BodyShape::Apple => bust > hips && bust_waist >= APPLE_BUST_IN * scale,
        BodyShape::Rectangle => bust_hips <= balanced && bust_waist < strong && hips_waist < strong,
        BodyShape::Average => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MeasurementInput, ReferenceTables, ShapeRatios};
    use crate::units::normalize;

    fn measure(unit: &str, height: f64, weight: f64, waist: f64, bust: f64) -> NormalizedMeasurement {
        normalize(&MeasurementInput::with_base(unit, height, weight, waist, bust)).unwrap()
    }

    #[test]
    fn test_observed_ratios_use_hips_proxy() {
        let m = measure("inches", 65.0, 130.0, 30.0, 36.0);
        let ratios = observed_ratios(&m);
        assert_eq!(ratios.bust_to_waist, 1.2);
        assert_eq!(ratios.hips_to_waist, 1.25);
        assert_eq!(ratios.height_to_waist, 2.17);
        assert!(ratios.hips_proxy);

        let measured = observed_ratios(&m.with_hips(39.0));
        assert_eq!(measured.hips_to_waist, 1.3);
        assert!(!measured.hips_proxy);
    }

    #[test]
    fn test_default_profiles_classify_average() {
        let tables = ReferenceTables::default();
        let m = measure("inches", 65.0, 130.0, 30.0, 36.0);
        let result = classify_shape(&m, &tables.shapes);
        assert_eq!(result.shape, Some(BodyShape::Average));
        assert_eq!(result.score, 20);
    }

    #[test]
    fn test_equal_bust_and_waist_leans_rectangle() {
        let tables = ReferenceTables::default();
        let m = measure("inches", 65.0, 130.0, 30.0, 30.0);
        let result = classify_shape(&m, &tables.shapes);
        assert_eq!(result.shape, Some(BodyShape::Rectangle));
        assert_eq!(result.score, 20);
    }

    #[test]
    fn test_centimeter_record_gives_same_shape() {
        let tables = ReferenceTables::default();
        let m = measure("cm", 165.1, 59.0, 76.2, 91.44);
        assert_eq!(classify_shape(&m, &tables.shapes).shape, Some(BodyShape::Average));
    }

    #[test]
    fn test_no_match_is_not_available() {
        let tables = ReferenceTables::default();
        // bust/waist 2.0, hips/waist 4.0, height/waist 6.5: far from every profile
        let m = measure("inches", 65.0, 130.0, 10.0, 20.0).with_hips(40.0);
        let result = classify_shape(&m, &tables.shapes);
        assert_eq!(result.shape, None);
        assert_eq!(result.label, "N/A");

        assert_eq!(classify_shape(&m, &[]).label, "N/A");
    }

    #[test]
    fn test_tie_keeps_first_profile() {
        let tables = ReferenceTables::default();
        let mut first = tables.shape_profile(BodyShape::Pear).unwrap().clone();
        let mut second = tables.shape_profile(BodyShape::Apple).unwrap().clone();
        let ratios = ShapeRatios {
            bust_to_waist: 1.2,
            hips_to_waist: 1.25,
            height_to_waist: 2.17,
        };
        first.ratios = ratios;
        second.ratios = ratios;

        let m = measure("inches", 65.0, 130.0, 30.0, 36.0);
        let result = classify_shape(&m, &[first, second]);
        assert_eq!(result.shape, Some(BodyShape::Pear));
        assert_eq!(result.score, 30);
    }

    #[test]
    fn test_tolerance_band() {
        assert!(within_tolerance(1.2, 1.15));
        assert!(within_tolerance(1.05, 1.15));
        assert!(!within_tolerance(1.0, 1.15));
        assert!(!within_tolerance(1.3, 1.15));
    }

    #[test]
    fn test_shape_consistency_rules() {
        let inches = UnitSystem::Inches;
        assert!(shape_is_consistent(BodyShape::Hourglass, inches, 38.0, 28.0, 40.0));
        assert!(!shape_is_consistent(BodyShape::Hourglass, inches, 38.0, 34.0, 40.0));
        assert!(shape_is_consistent(BodyShape::Pear, inches, 34.0, 28.0, 40.0));
        assert!(!shape_is_consistent(BodyShape::Pear, inches, 40.0, 28.0, 38.0));
        assert!(shape_is_consistent(BodyShape::Apple, inches, 40.0, 35.0, 38.0));
        assert!(shape_is_consistent(BodyShape::Rectangle, inches, 36.0, 32.0, 37.0));
        assert!(shape_is_consistent(BodyShape::Average, inches, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_shape_consistency_scales_for_centimeters() {
        let cm = UnitSystem::Centimeters;
        // 8 cm of curve is about 3 inches: not an hourglass
        assert!(!shape_is_consistent(BodyShape::Hourglass, cm, 96.0, 88.0, 97.0));
        assert!(shape_is_consistent(BodyShape::Hourglass, cm, 96.0, 71.0, 99.0));
    }
}
