//! Proportion report
//!
//! Observed body ratios plus a warning for every ratio outside the band the
//! confidence scorer checks.

use crate::calc::confidence::{Band, BMI_BAND, BUST_WAIST_BAND, HIPS_WAIST_BAND, WAIST_HEIGHT_BAND};
use crate::calc::shape::observed_ratios;
use crate::models::{NormalizedMeasurement, ProportionReport};

fn check(warnings: &mut Vec<String>, name: &str, value: f64, band: Band) {
    if !band.contains(value) {
        warnings.push(format!(
            "{} of {:.2} is outside the expected range {:.1}-{:.1}",
            name, value, band.min, band.max
        ));
    }
}

/// Observed ratios plus a warning per out-of-band check
pub fn proportion_report(m: &NormalizedMeasurement) -> ProportionReport {
    let ratios = observed_ratios(m);
    let mut warnings = Vec::new();

    check(&mut warnings, "Bust-to-waist ratio", m.bust / m.waist, BUST_WAIST_BAND);
    // The proxy is a constant, so only measured hips are worth a warning
    if let Some(hips) = m.hips {
        check(&mut warnings, "Hips-to-waist ratio", hips / m.waist, HIPS_WAIST_BAND);
    }
    check(
        &mut warnings,
        "Waist-to-height ratio",
        m.waist / m.height_in_unit(),
        WAIST_HEIGHT_BAND,
    );
    check(&mut warnings, "BMI", m.bmi(), BMI_BAND);

    ProportionReport {
        bust_to_waist: ratios.bust_to_waist,
        hips_to_waist: ratios.hips_to_waist,
        hips_proxy: ratios.hips_proxy,
        height_to_waist: ratios.height_to_waist,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeasurementInput;
    use crate::units::normalize;

    #[test]
    fn test_typical_record_has_no_warnings() {
        let m = normalize(&MeasurementInput::with_base("inches", 65.0, 130.0, 30.0, 36.0)).unwrap();
        let report = proportion_report(&m);
        assert_eq!(report.bust_to_waist, 1.2);
        assert_eq!(report.hips_to_waist, 1.25);
        assert!(report.hips_proxy);
        assert_eq!(report.height_to_waist, 2.17);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_out_of_band_ratios_warn() {
        let m = normalize(&MeasurementInput::with_base("inches", 65.0, 130.0, 30.0, 30.0))
            .unwrap()
            .with_hips(31.0);
        let report = proportion_report(&m);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].starts_with("Bust-to-waist ratio of 1.00"));
        assert!(report.warnings[1].starts_with("Hips-to-waist ratio of 1.03"));
        assert!(!report.hips_proxy);
    }
}
