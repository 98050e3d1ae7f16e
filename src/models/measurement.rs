//! Measurement models
//!
//! The raw record a form submits, the enumerated labels it may carry, and the
//! validated record every calculator works on.

use serde::{Deserialize, Serialize};

use crate::units::UnitSystem;

/// A single form value: a JSON number or a (possibly numeric) string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

/// How a raw field value reads once parsed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldReading {
    Absent,
    NotNumeric,
    Number(f64),
}

impl FieldValue {
    /// Parse the value; empty text counts as absent, never as zero
    pub fn read(&self) -> FieldReading {
        match self {
            FieldValue::Number(n) => FieldReading::Number(*n),
            FieldValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return FieldReading::Absent;
                }
                match trimmed.parse::<f64>() {
                    Ok(n) => FieldReading::Number(n),
                    Err(_) => FieldReading::NotNumeric,
                }
            }
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Read an optional raw value
pub fn read_field(value: Option<&FieldValue>) -> FieldReading {
    value.map_or(FieldReading::Absent, FieldValue::read)
}

/// Age band selected on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "18-24")]
    From18To24,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45-54")]
    From45To54,
    #[serde(rename = "55+")]
    Over55,
}

impl AgeGroup {
    /// Form value for "no age given"
    pub const UNSPECIFIED: &'static str = "unspecified";

    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::From18To24,
        AgeGroup::From25To34,
        AgeGroup::From35To44,
        AgeGroup::From45To54,
        AgeGroup::Over55,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::From18To24 => "18-24",
            AgeGroup::From25To34 => "25-34",
            AgeGroup::From35To44 => "35-44",
            AgeGroup::From45To54 => "45-54",
            AgeGroup::Over55 => "55+",
        }
    }

    /// Whether a form value means no age was given
    pub fn is_unspecified(s: &str) -> bool {
        s.trim().eq_ignore_ascii_case(Self::UNSPECIFIED)
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL.into_iter().find(|group| group.as_str() == trimmed)
    }
}

/// Body shape, either declared by the user or classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyShape {
    Average,
    Hourglass,
    Pear,
    Apple,
    Rectangle,
}

impl BodyShape {
    /// Lowercase form value
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyShape::Average => "average",
            BodyShape::Hourglass => "hourglass",
            BodyShape::Pear => "pear",
            BodyShape::Apple => "apple",
            BodyShape::Rectangle => "rectangle",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "average" => Some(BodyShape::Average),
            "hourglass" => Some(BodyShape::Hourglass),
            "pear" => Some(BodyShape::Pear),
            "apple" => Some(BodyShape::Apple),
            "rectangle" => Some(BodyShape::Rectangle),
            _ => None,
        }
    }

    /// Capitalized name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            BodyShape::Average => "Average",
            BodyShape::Hourglass => "Hourglass",
            BodyShape::Pear => "Pear",
            BodyShape::Apple => "Apple",
            BodyShape::Rectangle => "Rectangle",
        }
    }
}

/// Coarse height bucket the user may pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightCategory {
    Petite,
    Regular,
    Tall,
}

impl HeightCategory {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "petite" => Some(HeightCategory::Petite),
            "regular" => Some(HeightCategory::Regular),
            "tall" => Some(HeightCategory::Tall),
            _ => None,
        }
    }
}

/// Raw measurement record as submitted by the form
///
/// Structurally well-formed but not yet range-checked. Every numeric field may
/// be a number, a numeric string, an empty string or absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementInput {
    #[serde(default)]
    pub height: Option<FieldValue>,
    #[serde(default)]
    pub weight: Option<FieldValue>,
    #[serde(default)]
    pub waist: Option<FieldValue>,
    #[serde(default)]
    pub bust: Option<FieldValue>,
    #[serde(default)]
    pub hips: Option<FieldValue>,
    #[serde(default)]
    pub underbust: Option<FieldValue>,
    #[serde(default)]
    pub high_hip: Option<FieldValue>,
    #[serde(default)]
    pub neck: Option<FieldValue>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub body_shape: Option<String>,
    #[serde(default)]
    pub height_category: Option<String>,
}

impl MeasurementInput {
    /// Record with the four base measurements in the given unit tag
    pub fn with_base(unit: &str, height: f64, weight: f64, waist: f64, bust: f64) -> Self {
        Self {
            height: Some(height.into()),
            weight: Some(weight.into()),
            waist: Some(waist.into()),
            bust: Some(bust.into()),
            unit: Some(unit.to_string()),
            ..Default::default()
        }
    }
}

/// Validated record in canonical units
///
/// Height is in meters and weight in kilograms. Circumferences stay in the
/// declared unit system, which the reference tables are calibrated against.
/// `height` keeps the entered value so ratio checks see it unconverted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMeasurement {
    pub unit: UnitSystem,
    pub height: f64,
    pub height_m: f64,
    pub weight_kg: f64,
    pub waist: f64,
    pub bust: f64,
    pub hips: Option<f64>,
    pub underbust: Option<f64>,
    pub high_hip: Option<f64>,
    pub neck: Option<f64>,
    pub age_group: Option<AgeGroup>,
    pub body_shape: Option<BodyShape>,
    pub height_category: Option<HeightCategory>,
}

impl NormalizedMeasurement {
    /// Height expressed in the circumference unit, for ratio math
    pub fn height_in_unit(&self) -> f64 {
        self.height
    }

    /// Body-mass index, kg / m²
    pub fn bmi(&self) -> f64 {
        self.weight_kg / (self.height_m * self.height_m)
    }

    /// Copy with hips filled in
    pub fn with_hips(&self, hips: f64) -> Self {
        Self {
            hips: Some(hips),
            ..self.clone()
        }
    }
}

/// Measurements converted back to the declared unit for redisplay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayMeasurements {
    pub unit: UnitSystem,
    pub length_unit: &'static str,
    pub weight_unit: &'static str,
    pub height: f64,
    pub weight: f64,
    pub waist: f64,
    pub bust: f64,
    pub hips: Option<f64>,
    pub hips_estimated: bool,
}
