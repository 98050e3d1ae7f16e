//! Reference tables
//!
//! Shape profiles, size charts and age factors. The tables are static
//! configuration: built once (defaults or a JSON file), validated, then shared
//! read-only by every calculation.

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};
use crate::models::measurement::{AgeGroup, BodyShape};
use crate::units::UnitSystem;

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Range from inclusive bounds
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Center of the range, used for closest-size distance
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Inclusive containment, widened by `margin` on both sides
    pub fn contains(&self, value: f64, margin: f64) -> bool {
        value >= self.min - margin && value <= self.max + margin
    }

    /// Both bounds multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }

    /// What is wrong with the bounds, if anything
    fn problem(&self) -> Option<&'static str> {
        if !self.min.is_finite() || !self.max.is_finite() {
            Some("a non-finite bound")
        } else if self.min < 0.0 {
            Some("a negative minimum")
        } else if self.min > self.max {
            Some("min greater than max")
        } else {
            None
        }
    }
}

/// Measurement ranges for one standard size
///
/// Circumferences are in the owning chart's unit; weight and height ranges
/// are always kilograms and meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub label: String,
    pub bust: Range,
    pub waist: Range,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_m: Option<Range>,
}

/// Ordered list of sizes calibrated in one unit system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeChart {
    pub unit: UnitSystem,
    pub sizes: Vec<SizeRange>,
}

impl SizeChart {
    /// Same chart with circumferences converted into `target`
    pub fn converted_to(&self, target: UnitSystem) -> SizeChart {
        let factor = self.unit.circumference_factor(target);
        let sizes = self
            .sizes
            .iter()
            .map(|size| SizeRange {
                label: size.label.clone(),
                bust: size.bust.scaled(factor),
                waist: size.waist.scaled(factor),
                hips: size.hips.map(|r| r.scaled(factor)),
                weight_kg: size.weight_kg,
                height_m: size.height_m,
            })
            .collect();
        SizeChart { unit: target, sizes }
    }
}

/// Target ratios a shape is recognized by
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRatios {
    pub bust_to_waist: f64,
    pub hips_to_waist: f64,
    pub height_to_waist: f64,
}

/// Multiplicative factors applied to the secondary measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFactors {
    pub shoulder_width: f64,
    pub upper_arm: f64,
    pub thigh: f64,
    pub inseam: f64,
}

impl DerivedFactors {
    pub const NEUTRAL: DerivedFactors = DerivedFactors {
        shoulder_width: 1.0,
        upper_arm: 1.0,
        thigh: 1.0,
        inseam: 1.0,
    };

    fn values(&self) -> [f64; 4] {
        [self.shoulder_width, self.upper_arm, self.thigh, self.inseam]
    }
}

impl Default for DerivedFactors {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Reference profile of one body shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeProfile {
    pub shape: BodyShape,
    pub ratios: ShapeRatios,
    /// Hips estimate as a multiple of waist when hips were not measured
    pub hip_factor: f64,
    #[serde(default)]
    pub adjustments: DerivedFactors,
}

/// Age-band adjustments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeFactor {
    pub age_group: AgeGroup,
    #[serde(default)]
    pub adjustments: DerivedFactors,
    /// Extra points in the additional-factors confidence category
    #[serde(default)]
    pub confidence_bonus: f64,
}

/// All reference data a calculation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    /// Iterated in order; ties in classification go to the earlier entry
    pub shapes: Vec<ShapeProfile>,
    pub size_charts: Vec<SizeChart>,
    #[serde(default)]
    pub age_factors: Vec<AgeFactor>,
}

impl ReferenceTables {
    /// Parse and validate tables from JSON text
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let tables: ReferenceTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Load and validate tables from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> CalcResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject tables that would make a calculation meaningless
    pub fn validate(&self) -> CalcResult<()> {
        let mut seen_shapes = HashSet::new();
        for profile in &self.shapes {
            if !seen_shapes.insert(profile.shape) {
                return Err(CalcError::ReferenceData(format!(
                    "duplicate shape profile '{}'",
                    profile.shape.as_str()
                )));
            }
            let ratios = &profile.ratios;
            let all_positive = [ratios.bust_to_waist, ratios.hips_to_waist, ratios.height_to_waist]
                .into_iter()
                .chain(std::iter::once(profile.hip_factor))
                .chain(profile.adjustments.values())
                .all(|v| v.is_finite() && v > 0.0);
            if !all_positive {
                return Err(CalcError::ReferenceData(format!(
                    "shape profile '{}' has a non-positive ratio or factor",
                    profile.shape.as_str()
                )));
            }
        }

        let mut seen_units = HashSet::new();
        for chart in &self.size_charts {
            if !seen_units.insert(chart.unit) {
                return Err(CalcError::ReferenceData(format!(
                    "more than one size chart in {}",
                    chart.unit.as_str()
                )));
            }
            for size in &chart.sizes {
                let ranges = [Some(size.bust), Some(size.waist), size.hips, size.weight_kg, size.height_m];
                if let Some(problem) = ranges.iter().flatten().find_map(Range::problem) {
                    return Err(CalcError::ReferenceData(format!(
                        "size '{}' has a range with {}",
                        size.label, problem
                    )));
                }
            }
        }

        let mut seen_ages = HashSet::new();
        for factor in &self.age_factors {
            if !seen_ages.insert(factor.age_group) {
                return Err(CalcError::ReferenceData(format!(
                    "duplicate age factor '{}'",
                    factor.age_group.as_str()
                )));
            }
            if factor.adjustments.values().iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err(CalcError::ReferenceData(format!(
                    "age factor '{}' has a non-positive adjustment",
                    factor.age_group.as_str()
                )));
            }
        }

        Ok(())
    }

    /// Profile for a shape, if the tables define one
    pub fn shape_profile(&self, shape: BodyShape) -> Option<&ShapeProfile> {
        self.shapes.iter().find(|p| p.shape == shape)
    }

    /// Adjustment factors for an age band
    pub fn age_factor(&self, group: AgeGroup) -> Option<&AgeFactor> {
        self.age_factors.iter().find(|f| f.age_group == group)
    }

    /// Size chart calibrated in `unit`, converting another chart if needed
    pub fn size_chart(&self, unit: UnitSystem) -> Option<Cow<'_, SizeChart>> {
        if let Some(chart) = self.size_charts.iter().find(|c| c.unit == unit) {
            return Some(Cow::Borrowed(chart));
        }
        let other = self.size_charts.first()?;
        tracing::warn!(
            "No size chart in {}; converting the {} chart",
            unit.as_str(),
            other.unit.as_str()
        );
        Some(Cow::Owned(other.converted_to(unit)))
    }
}

// ============================================================================
// Built-in Tables
// ============================================================================

fn shape(
    shape: BodyShape,
    ratios: (f64, f64, f64),
    hip_factor: f64,
    adjustments: DerivedFactors,
) -> ShapeProfile {
    ShapeProfile {
        shape,
        ratios: ShapeRatios {
            bust_to_waist: ratios.0,
            hips_to_waist: ratios.1,
            height_to_waist: ratios.2,
        },
        hip_factor,
        adjustments,
    }
}

fn size(label: &str, bust: (f64, f64), waist: (f64, f64), hips: (f64, f64)) -> SizeRange {
    SizeRange {
        label: label.to_string(),
        bust: Range::new(bust.0, bust.1),
        waist: Range::new(waist.0, waist.1),
        hips: Some(Range::new(hips.0, hips.1)),
        weight_kg: None,
        height_m: None,
    }
}

fn age(group: AgeGroup, adjustments: DerivedFactors, confidence_bonus: f64) -> AgeFactor {
    AgeFactor {
        age_group: group,
        adjustments,
        confidence_bonus,
    }
}

fn default_shapes() -> Vec<ShapeProfile> {
    vec![
        shape(BodyShape::Average, (1.15, 1.20, 2.30), 1.1, DerivedFactors::NEUTRAL),
        shape(
            BodyShape::Hourglass,
            (1.35, 1.40, 2.60),
            1.2,
            DerivedFactors { thigh: 1.05, ..DerivedFactors::NEUTRAL },
        ),
        shape(
            BodyShape::Pear,
            (1.05, 1.45, 2.45),
            1.3,
            DerivedFactors { shoulder_width: 0.95, thigh: 1.1, ..DerivedFactors::NEUTRAL },
        ),
        shape(
            BodyShape::Apple,
            (0.95, 0.95, 1.90),
            0.9,
            DerivedFactors {
                shoulder_width: 1.05,
                upper_arm: 1.08,
                thigh: 0.95,
                ..DerivedFactors::NEUTRAL
            },
        ),
        shape(
            BodyShape::Rectangle,
            (1.00, 1.05, 2.15),
            1.0,
            DerivedFactors { shoulder_width: 1.02, thigh: 0.98, ..DerivedFactors::NEUTRAL },
        ),
    ]
}

fn default_inch_chart() -> SizeChart {
    SizeChart {
        unit: UnitSystem::Inches,
        sizes: vec![
            size("XS", (31.0, 33.0), (23.0, 25.0), (33.0, 35.0)),
            size("S", (33.0, 35.0), (25.0, 27.0), (35.0, 37.0)),
            size("M", (35.0, 37.0), (27.0, 29.0), (37.0, 39.0)),
            size("L", (37.0, 40.0), (29.0, 32.0), (39.0, 42.0)),
            size("XL", (40.0, 43.0), (32.0, 35.0), (42.0, 45.0)),
            size("XXL", (43.0, 46.0), (35.0, 38.0), (45.0, 48.0)),
        ],
    }
}

fn default_age_factors() -> Vec<AgeFactor> {
    vec![
        age(AgeGroup::From18To24, DerivedFactors::NEUTRAL, 0.0),
        age(AgeGroup::From25To34, DerivedFactors::NEUTRAL, 0.5),
        age(
            AgeGroup::From35To44,
            DerivedFactors { upper_arm: 1.02, thigh: 1.02, ..DerivedFactors::NEUTRAL },
            0.5,
        ),
        age(
            AgeGroup::From45To54,
            DerivedFactors {
                shoulder_width: 0.99,
                upper_arm: 1.04,
                thigh: 1.03,
                ..DerivedFactors::NEUTRAL
            },
            0.5,
        ),
        age(
            AgeGroup::Over55,
            DerivedFactors {
                shoulder_width: 0.98,
                upper_arm: 1.05,
                thigh: 1.04,
                inseam: 0.99,
            },
            0.0,
        ),
    ]
}

impl Default for ReferenceTables {
    fn default() -> Self {
        let inches = default_inch_chart();
        let centimeters = inches.converted_to(UnitSystem::Centimeters);
        Self {
            shapes: default_shapes(),
            size_charts: vec![inches, centimeters],
            age_factors: default_age_factors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tables = ReferenceTables::default();
        assert!(tables.validate().is_ok());
        assert_eq!(tables.shapes.len(), 5);
        assert_eq!(tables.age_factors.len(), 5);
        assert_eq!(tables.size_charts.len(), 2);
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = Range::new(27.0, 29.0);
        assert!(range.contains(27.0, 0.0));
        assert!(range.contains(29.0, 0.0));
        assert!(!range.contains(29.01, 0.0));
        assert!(range.contains(31.5, 3.0));
        assert_eq!(range.midpoint(), 28.0);
    }

    #[test]
    fn test_centimeter_chart_is_converted() {
        let tables = ReferenceTables::default();
        let chart = tables.size_chart(UnitSystem::Centimeters).unwrap();
        let medium = chart.sizes.iter().find(|s| s.label == "M").unwrap();
        assert!((medium.bust.min - 35.0 * 2.54).abs() < 1e-9);
        assert!((medium.waist.max - 29.0 * 2.54).abs() < 1e-9);
    }

    #[test]
    fn test_missing_chart_falls_back_to_conversion() {
        let tables = ReferenceTables {
            size_charts: vec![default_inch_chart()],
            ..ReferenceTables::default()
        };
        let chart = tables.size_chart(UnitSystem::Centimeters).unwrap();
        assert!(matches!(chart, Cow::Owned(_)));
        assert_eq!(chart.unit, UnitSystem::Centimeters);
    }

    #[test]
    fn test_no_chart_at_all() {
        let tables = ReferenceTables {
            size_charts: Vec::new(),
            ..ReferenceTables::default()
        };
        assert!(tables.size_chart(UnitSystem::Inches).is_none());
    }

    #[test]
    fn test_json_round_trip_and_validation() {
        let json = serde_json::to_string(&ReferenceTables::default()).unwrap();
        let tables = ReferenceTables::from_json_str(&json).unwrap();
        assert_eq!(tables, ReferenceTables::default());

        let mut broken = ReferenceTables::default();
        broken.size_charts[0].sizes[0].bust = Range::new(40.0, 30.0);
        let json = serde_json::to_string(&broken).unwrap();
        let err = ReferenceTables::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CalcError::ReferenceData(_)));
    }

    #[test]
    fn test_range_errors_name_the_cause() {
        let cases = [
            (Range::new(40.0, 30.0), "min greater than max"),
            (Range::new(-1.0, 30.0), "a negative minimum"),
            (Range::new(f64::NAN, 30.0), "a non-finite bound"),
        ];
        for (range, expected) in cases {
            let mut tables = ReferenceTables::default();
            tables.size_charts[0].sizes[1].waist = range;
            match tables.validate() {
                Err(CalcError::ReferenceData(message)) => {
                    assert_eq!(message, format!("size 'S' has a range with {}", expected));
                }
                other => panic!("expected reference data error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_duplicate_shape_rejected() {
        let mut tables = ReferenceTables::default();
        let first = tables.shapes[0].clone();
        tables.shapes.push(first);
        assert!(matches!(tables.validate(), Err(CalcError::ReferenceData(_))));
    }

    #[test]
    fn test_minimal_json_uses_serde_defaults() {
        let json = r#"{
            "shapes": [{
                "shape": "pear",
                "ratios": {"bustToWaist": 1.05, "hipsToWaist": 1.45, "heightToWaist": 2.45},
                "hip_factor": 1.3
            }],
            "size_charts": []
        }"#;
        let tables = ReferenceTables::from_json_str(json).unwrap();
        assert!(tables.age_factors.is_empty());
        let pear = tables.shape_profile(BodyShape::Pear).unwrap();
        assert_eq!(pear.adjustments, DerivedFactors::NEUTRAL);
    }
}
