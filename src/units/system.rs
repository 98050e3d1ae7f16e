//! Unit types and conversion constants
//!
//! A record declares one unit system. It decides how height and weight are
//! converted and which unit circumferences stay in.

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Inches per meter, as used by the height conversion
pub const INCHES_PER_METER: f64 = 39.37;
/// Centimeters per meter
pub const CM_PER_METER: f64 = 100.0;
/// Pounds per kilogram, as used by the weight conversion
pub const LB_PER_KG: f64 = 2.205;
/// Centimeters per inch, for converting circumference tables
pub const CM_PER_INCH: f64 = 2.54;

/// Declared unit system of a measurement record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Height and circumferences in inches, weight in pounds
    #[serde(rename = "inches")]
    Inches,
    /// Height and circumferences in centimeters, weight in kilograms
    #[serde(rename = "cm")]
    Centimeters,
}

impl UnitSystem {
    /// Parse a unit tag as submitted by a form
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inches" | "inch" | "in" => Some(UnitSystem::Inches),
            "cm" | "centimeters" | "centimetres" => Some(UnitSystem::Centimeters),
            _ => None,
        }
    }

    /// Canonical tag
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Inches => "inches",
            UnitSystem::Centimeters => "cm",
        }
    }

    /// Short label for lengths and circumferences
    pub fn length_label(&self) -> &'static str {
        match self {
            UnitSystem::Inches => "in",
            UnitSystem::Centimeters => "cm",
        }
    }

    /// Short label for body weight
    pub fn weight_label(&self) -> &'static str {
        match self {
            UnitSystem::Inches => "lb",
            UnitSystem::Centimeters => "kg",
        }
    }

    /// How many of this system's length units make up one meter
    pub fn lengths_per_meter(&self) -> f64 {
        match self {
            UnitSystem::Inches => INCHES_PER_METER,
            UnitSystem::Centimeters => CM_PER_METER,
        }
    }

    /// How many of this system's weight units make up one kilogram
    pub fn weights_per_kg(&self) -> f64 {
        match self {
            UnitSystem::Inches => LB_PER_KG,
            UnitSystem::Centimeters => 1.0,
        }
    }

    /// Factor that converts a circumference in `self` into `target`
    pub fn circumference_factor(&self, target: UnitSystem) -> f64 {
        match (self, target) {
            (UnitSystem::Inches, UnitSystem::Centimeters) => CM_PER_INCH,
            (UnitSystem::Centimeters, UnitSystem::Inches) => 1.0 / CM_PER_INCH,
            _ => 1.0,
        }
    }
}

/// Round to one decimal place, the precision used for every reported value
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places, the precision of reported ratios
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!(UnitSystem::from_str("inches"), Some(UnitSystem::Inches));
        assert_eq!(UnitSystem::from_str(" In "), Some(UnitSystem::Inches));
        assert_eq!(UnitSystem::from_str("cm"), Some(UnitSystem::Centimeters));
        assert_eq!(UnitSystem::from_str("Centimeters"), Some(UnitSystem::Centimeters));
        assert_eq!(UnitSystem::from_str("mm"), None);
        assert_eq!(UnitSystem::from_str(""), None);
    }

    #[test]
    fn test_circumference_factor() {
        let to_cm = UnitSystem::Inches.circumference_factor(UnitSystem::Centimeters);
        let to_in = UnitSystem::Centimeters.circumference_factor(UnitSystem::Inches);
        assert_eq!(to_cm, CM_PER_INCH);
        assert!((to_cm * to_in - 1.0).abs() < 1e-12);
        assert_eq!(UnitSystem::Inches.circumference_factor(UnitSystem::Inches), 1.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round1(29.25), 29.3);
        assert_eq!(round1(24.0), 24.0);
        assert_eq!(round2(65.0 / 30.0), 2.17);
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&UnitSystem::Inches).unwrap(), "\"inches\"");
        let unit: UnitSystem = serde_json::from_str("\"cm\"").unwrap();
        assert_eq!(unit, UnitSystem::Centimeters);
    }
}
