//! Measurement normalization
//!
//! Converts a raw form record into canonical units (meters, kilograms,
//! circumferences in the declared unit) and back again for redisplay.

use crate::error::{FieldIssue, FieldProblem, ValidationError};
use crate::models::{
    read_field, AgeGroup, BodyShape, DisplayMeasurements, FieldReading, FieldValue,
    HeightCategory, MeasurementInput, NormalizedMeasurement,
};
use crate::units::system::round1;
use crate::units::UnitSystem;

/// Whatever could be read from a record, without rejecting anything
///
/// Used by the confidence scorer, which scores partial input lower instead
/// of refusing it. Height and weight are canonical only when a unit is known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialMeasurement {
    pub unit: Option<UnitSystem>,
    pub height_present: bool,
    pub weight_present: bool,
    pub height: Option<f64>,
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
    pub waist: Option<f64>,
    pub bust: Option<f64>,
    pub hips: Option<f64>,
    pub underbust: Option<f64>,
    pub high_hip: Option<f64>,
    pub neck: Option<f64>,
    pub age_group: Option<AgeGroup>,
    pub body_shape: Option<BodyShape>,
    pub height_category: Option<HeightCategory>,
}

impl PartialMeasurement {
    /// Entered height, only usable for ratios once the unit is known
    pub fn height_in_unit(&self) -> Option<f64> {
        self.unit.and(self.height)
    }

    /// Body-mass index, when height and weight are both canonical
    pub fn bmi(&self) -> Option<f64> {
        let height = self.height_m?;
        Some(self.weight_kg? / (height * height))
    }
}

impl From<&NormalizedMeasurement> for PartialMeasurement {
    fn from(m: &NormalizedMeasurement) -> Self {
        Self {
            unit: Some(m.unit),
            height_present: true,
            weight_present: true,
            height: Some(m.height),
            height_m: Some(m.height_m),
            weight_kg: Some(m.weight_kg),
            waist: Some(m.waist),
            bust: Some(m.bust),
            hips: m.hips,
            underbust: m.underbust,
            high_hip: m.high_hip,
            neck: m.neck,
            age_group: m.age_group,
            body_shape: m.body_shape,
            height_category: m.height_category,
        }
    }
}

/// Collects field issues while reading one record
struct FieldReader {
    issues: Vec<FieldIssue>,
}

impl FieldReader {
    fn new() -> Self {
        Self { issues: Vec::new() }
    }

    fn required(&mut self, field: &'static str, value: Option<&FieldValue>) -> Option<f64> {
        let value = self.optional(field, value);
        if value.is_none() && !self.issues.iter().any(|i| i.field == field) {
            self.issues.push(FieldIssue::new(field, FieldProblem::Missing));
        }
        value
    }

    fn optional(&mut self, field: &'static str, value: Option<&FieldValue>) -> Option<f64> {
        match read_field(value) {
            FieldReading::Absent => None,
            FieldReading::NotNumeric => {
                self.issues.push(FieldIssue::new(field, FieldProblem::NotNumeric));
                None
            }
            FieldReading::Number(n) if !n.is_finite() || n <= 0.0 => {
                self.issues.push(FieldIssue::new(field, FieldProblem::NotPositive));
                None
            }
            FieldReading::Number(n) => Some(n),
        }
    }

    fn age_group(&mut self, value: Option<&str>) -> Option<AgeGroup> {
        let value = value.filter(|s| !AgeGroup::is_unspecified(s));
        self.label("ageGroup", value, false, AgeGroup::from_str)
    }

    fn label<T>(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        required: bool,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        match value.map(str::trim).filter(|s| !s.is_empty()) {
            None => {
                if required {
                    self.issues.push(FieldIssue::new(field, FieldProblem::Missing));
                }
                None
            }
            Some(text) => {
                let parsed = parse(text);
                if parsed.is_none() {
                    self.issues.push(FieldIssue::new(field, FieldProblem::Unrecognized));
                }
                parsed
            }
        }
    }
}

/// Validate a raw record and convert it into canonical units
///
/// Every offending field is reported, not just the first.
pub fn normalize(input: &MeasurementInput) -> Result<NormalizedMeasurement, ValidationError> {
    let mut reader = FieldReader::new();

    let height = reader.required("height", input.height.as_ref());
    let weight = reader.required("weight", input.weight.as_ref());
    let waist = reader.required("waist", input.waist.as_ref());
    let bust = reader.required("bust", input.bust.as_ref());
    let hips = reader.optional("hips", input.hips.as_ref());
    let underbust = reader.optional("underbust", input.underbust.as_ref());
    let high_hip = reader.optional("highHip", input.high_hip.as_ref());
    let neck = reader.optional("neck", input.neck.as_ref());
    let unit = reader.label("unit", input.unit.as_deref(), true, UnitSystem::from_str);
    let age_group = reader.age_group(input.age_group.as_deref());
    let body_shape = reader.label("bodyShape", input.body_shape.as_deref(), false, BodyShape::from_str);
    let height_category = reader.label(
        "heightCategory",
        input.height_category.as_deref(),
        false,
        HeightCategory::from_str,
    );

    match (height, weight, waist, bust, unit) {
        (Some(height), Some(weight), Some(waist), Some(bust), Some(unit)) if reader.issues.is_empty() => {
            Ok(NormalizedMeasurement {
                unit,
                height,
                height_m: height / unit.lengths_per_meter(),
                weight_kg: weight / unit.weights_per_kg(),
                waist,
                bust,
                hips,
                underbust,
                high_hip,
                neck,
                age_group,
                body_shape,
                height_category,
            })
        }
        _ => Err(ValidationError {
            issues: reader.issues,
        }),
    }
}

/// Read everything usable from a record, dropping invalid fields silently
pub fn normalize_lenient(input: &MeasurementInput) -> PartialMeasurement {
    let mut reader = FieldReader::new();

    let unit = reader.label("unit", input.unit.as_deref(), false, UnitSystem::from_str);
    let height = reader.optional("height", input.height.as_ref());
    let weight = reader.optional("weight", input.weight.as_ref());

    let partial = PartialMeasurement {
        unit,
        height_present: height.is_some(),
        weight_present: weight.is_some(),
        height,
        height_m: unit.zip(height).map(|(u, h)| h / u.lengths_per_meter()),
        weight_kg: unit.zip(weight).map(|(u, w)| w / u.weights_per_kg()),
        waist: reader.optional("waist", input.waist.as_ref()),
        bust: reader.optional("bust", input.bust.as_ref()),
        hips: reader.optional("hips", input.hips.as_ref()),
        underbust: reader.optional("underbust", input.underbust.as_ref()),
        high_hip: reader.optional("highHip", input.high_hip.as_ref()),
        neck: reader.optional("neck", input.neck.as_ref()),
        age_group: reader.age_group(input.age_group.as_deref()),
        body_shape: reader.label("bodyShape", input.body_shape.as_deref(), false, BodyShape::from_str),
        height_category: reader.label(
            "heightCategory",
            input.height_category.as_deref(),
            false,
            HeightCategory::from_str,
        ),
    };

    if !reader.issues.is_empty() {
        tracing::debug!(
            "Ignoring {} unusable field(s) for confidence scoring: {:?}",
            reader.issues.len(),
            reader.issues
        );
    }
    partial
}

/// Convert a normalized record back into its declared unit for display
///
/// `hips` is the value to show (measured or estimated); pass `hips_estimated`
/// when it was derived rather than entered.
pub fn to_display(
    m: &NormalizedMeasurement,
    hips: Option<f64>,
    hips_estimated: bool,
) -> DisplayMeasurements {
    DisplayMeasurements {
        unit: m.unit,
        length_unit: m.unit.length_label(),
        weight_unit: m.unit.weight_label(),
        height: round1(m.height),
        weight: round1(m.weight_kg * m.unit.weights_per_kg()),
        waist: round1(m.waist),
        bust: round1(m.bust),
        hips: hips.map(round1),
        hips_estimated,
    }
}

/// Rebuild a raw record from a normalized one, in the given unit system
pub fn denormalize(m: &NormalizedMeasurement, unit: UnitSystem) -> MeasurementInput {
    let factor = m.unit.circumference_factor(unit);
    let scale = |v: Option<f64>| v.map(|x| FieldValue::Number(x * factor));
    let height = if unit == m.unit {
        m.height
    } else {
        m.height_m * unit.lengths_per_meter()
    };
    MeasurementInput {
        height: Some(FieldValue::Number(height)),
        weight: Some(FieldValue::Number(m.weight_kg * unit.weights_per_kg())),
        waist: Some(FieldValue::Number(m.waist * factor)),
        bust: Some(FieldValue::Number(m.bust * factor)),
        hips: scale(m.hips),
        underbust: scale(m.underbust),
        high_hip: scale(m.high_hip),
        neck: scale(m.neck),
        unit: Some(unit.as_str().to_string()),
        age_group: m.age_group.map(|g| g.as_str().to_string()),
        body_shape: m.body_shape.map(|s| s.as_str().to_string()),
        height_category: m.height_category.map(|c| {
            match c {
                HeightCategory::Petite => "petite",
                HeightCategory::Regular => "regular",
                HeightCategory::Tall => "tall",
            }
            .to_string()
        }),
    }
}
