//! Calculator tools
//!
//! Caller-facing entry points: run a calculation or score confidence for a
//! partial form, and shape the result into flat, display-ready responses.

use serde::Serialize;

use crate::build_info::BuildInfo;
use crate::calc::{score_input, MatchOptions, SizeCalculator};
use crate::error::CalcError;
use crate::models::{
    BmiReport, CalculationReport, ConfidenceResult, DisplayMeasurements, MeasurementInput,
    ProportionReport, ReferenceTables, ScoreBreakdown, SecondaryMeasurements,
};

/// Confidence summary for display
#[derive(Debug, Serialize)]
pub struct ConfidenceSummary {
    pub score: u8,
    pub level: &'static str,
    pub description: &'static str,
}

impl From<&ConfidenceResult> for ConfidenceSummary {
    fn from(result: &ConfidenceResult) -> Self {
        Self {
            score: result.score,
            level: result.label,
            description: result.description,
        }
    }
}

/// Response for calculate
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub calculated_at: String,
    pub build: BuildInfo,
    pub measurements: DisplayMeasurements,
    pub bmi: BmiReport,
    pub body_shape: String,
    pub body_shape_display: String,
    pub body_shape_declared: bool,
    pub standard_size: String,
    pub exact_match: bool,
    pub size_message: String,
    pub proportions: ProportionReport,
    pub secondary_measurements: SecondaryMeasurements,
    pub adjusted_measurements: SecondaryMeasurements,
    pub confidence: ConfidenceSummary,
}

impl From<CalculationReport> for CalculateResponse {
    fn from(report: CalculationReport) -> Self {
        let body_shape_declared = report.measurements.body_shape.is_some();
        let (body_shape, body_shape_display) = match report.effective_shape {
            Some(shape) => (shape.as_str().to_string(), shape.display_name().to_string()),
            None => (
                report.classified_shape.label.clone(),
                report.classified_shape.label.clone(),
            ),
        };
        let confidence = ConfidenceSummary::from(&report.confidence);

        Self {
            calculated_at: timestamp(),
            build: BuildInfo::current(),
            measurements: report.display,
            bmi: report.bmi,
            body_shape,
            body_shape_display,
            body_shape_declared,
            standard_size: report.size.size,
            exact_match: report.size.exact,
            size_message: report.size.message,
            proportions: report.proportions,
            secondary_measurements: report.secondary,
            adjusted_measurements: report.adjusted,
            confidence,
        }
    }
}

/// Response for check_confidence
#[derive(Debug, Serialize)]
pub struct ConfidenceResponse {
    pub calculated_at: String,
    pub confidence: ConfidenceSummary,
    pub breakdown: ScoreBreakdown,
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

// ============================================================================
// Tool Functions
// ============================================================================

/// Run a full calculation for one record
pub fn calculate(
    tables: &ReferenceTables,
    input: &MeasurementInput,
    relaxed: bool,
) -> Result<CalculateResponse, String> {
    let options = if relaxed {
        MatchOptions::relaxed()
    } else {
        MatchOptions::strict()
    };

    let report = SizeCalculator::new(tables)
        .with_options(options)
        .calculate(input)
        .map_err(|e| match e {
            CalcError::Validation(v) => v.to_string(),
            other => format!("Calculation failed: {}", other),
        })?;

    Ok(CalculateResponse::from(report))
}

/// Score confidence for a record that may be incomplete
pub fn check_confidence(tables: &ReferenceTables, input: &MeasurementInput) -> ConfidenceResponse {
    let result = score_input(input, tables);
    ConfidenceResponse {
        calculated_at: timestamp(),
        confidence: ConfidenceSummary::from(&result),
        breakdown: result.breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_response() {
        let tables = ReferenceTables::default();
        let input = MeasurementInput::with_base("inches", 65.0, 130.0, 30.0, 36.0);
        let response = calculate(&tables, &input, false).unwrap();
        assert_eq!(response.body_shape, "average");
        assert_eq!(response.body_shape_display, "Average");
        assert!(!response.body_shape_declared);
        assert_eq!(response.standard_size, "M");
        assert!(!response.exact_match);
        assert_eq!(response.confidence.level, "Good Confidence");
        assert_eq!(response.measurements.weight_unit, "lb");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["measurements"]["unit"], "inches");
        assert_eq!(json["confidence"]["score"], 86);
    }

    #[test]
    fn test_calculate_reports_validation_message() {
        let tables = ReferenceTables::default();
        let input = MeasurementInput {
            height: Some("0".into()),
            unit: Some("cm".to_string()),
            ..Default::default()
        };
        let err = calculate(&tables, &input, false).unwrap_err();
        assert!(err.starts_with("Invalid measurements:"));
        for field in ["height", "weight", "waist", "bust"] {
            assert!(err.contains(field), "missing {field} in {err}");
        }
    }

    #[test]
    fn test_calculate_accepts_unspecified_age() {
        let tables = ReferenceTables::default();
        let mut input = MeasurementInput::with_base("inches", 65.0, 130.0, 30.0, 36.0);
        input.age_group = Some("unspecified".to_string());
        let response = calculate(&tables, &input, false).unwrap();
        assert_eq!(response.standard_size, "M");
        assert_eq!(response.confidence.score, 86);
    }

    #[test]
    fn test_check_confidence_tolerates_missing_fields() {
        let tables = ReferenceTables::default();
        let input = MeasurementInput::default();
        let response = check_confidence(&tables, &input);
        assert_eq!(response.confidence.level, "Low Confidence");
        assert_eq!(response.breakdown.total_possible(), 105.0);
    }
}
