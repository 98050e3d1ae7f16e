//! BMI and weight category

use crate::models::{BmiReport, NormalizedMeasurement};
use crate::units::round1;

/// BMI bounds of the "healthy" range used for the ideal weight
pub const IDEAL_BMI_MIN: f64 = 18.5;
pub const IDEAL_BMI_MAX: f64 = 24.9;

/// Weight category for a BMI value; lower bounds are inclusive
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 16.0 {
        "Severely Underweight"
    } else if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal"
    } else if bmi < 30.0 {
        "Overweight"
    } else if bmi < 35.0 {
        "Obese (Class I)"
    } else if bmi < 40.0 {
        "Obese (Class II)"
    } else {
        "Obese (Class III)"
    }
}

/// BMI, category and ideal weight range for a normalized record
///
/// The category is taken from the rounded BMI, so the displayed value and
/// its label always agree.
pub fn bmi_report(m: &NormalizedMeasurement) -> BmiReport {
    let bmi = round1(m.bmi());
    let height_sq = m.height_m * m.height_m;
    let min_kg = IDEAL_BMI_MIN * height_sq;
    let max_kg = IDEAL_BMI_MAX * height_sq;
    let per_kg = m.unit.weights_per_kg();

    BmiReport {
        bmi,
        category: bmi_category(bmi),
        ideal_weight_min_kg: round1(min_kg),
        ideal_weight_max_kg: round1(max_kg),
        ideal_weight_min: round1(min_kg * per_kg),
        ideal_weight_max: round1(max_kg * per_kg),
        weight_unit: m.unit.weight_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeasurementInput;
    use crate::units::normalize;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(bmi_category(15.9), "Severely Underweight");
        assert_eq!(bmi_category(16.0), "Underweight");
        assert_eq!(bmi_category(18.5), "Normal");
        assert_eq!(bmi_category(24.9), "Normal");
        assert_eq!(bmi_category(25.0), "Overweight");
        assert_eq!(bmi_category(30.0), "Obese (Class I)");
        assert_eq!(bmi_category(35.0), "Obese (Class II)");
        assert_eq!(bmi_category(40.0), "Obese (Class III)");
    }

    #[test]
    fn test_report_metric() {
        let m = normalize(&MeasurementInput::with_base("cm", 165.0, 60.0, 70.0, 90.0)).unwrap();
        let report = bmi_report(&m);
        // 60 / 1.65² = 22.04
        assert_eq!(report.bmi, 22.0);
        assert_eq!(report.category, "Normal");
        assert_eq!(report.ideal_weight_min_kg, 50.4);
        assert_eq!(report.ideal_weight_max_kg, 67.8);
        assert_eq!(report.weight_unit, "kg");
        assert_eq!(report.ideal_weight_min, report.ideal_weight_min_kg);
    }

    #[test]
    fn test_report_imperial_redisplays_pounds() {
        let m = normalize(&MeasurementInput::with_base("inches", 65.0, 130.0, 30.0, 36.0)).unwrap();
        let report = bmi_report(&m);
        assert_eq!(report.bmi, 21.6);
        assert_eq!(report.weight_unit, "lb");
        assert!(report.ideal_weight_min > report.ideal_weight_min_kg * 2.0);
    }
}
