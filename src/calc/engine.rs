//! Calculation engine
//!
//! Runs the calculators over one record in a fixed order:
//! normalize, BMI, classify, hips, size, proportions, secondary
//! measurements, confidence.

use crate::calc::bmi::bmi_report;
use crate::calc::confidence::score_confidence;
use crate::calc::derived::{adjusted_measurements, estimate_hips, secondary_measurements};
use crate::calc::proportions::proportion_report;
use crate::calc::shape::classify_shape;
use crate::calc::size::{match_size, MatchOptions};
use crate::error::CalcResult;
use crate::models::{CalculationReport, MeasurementInput, ReferenceTables};
use crate::units::{normalize, to_display, PartialMeasurement};

/// Stateless calculator over borrowed reference tables
#[derive(Debug, Clone, Copy)]
pub struct SizeCalculator<'a> {
    tables: &'a ReferenceTables,
    options: MatchOptions,
}

impl<'a> SizeCalculator<'a> {
    /// Calculator with strict size matching
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self {
            tables,
            options: MatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn tables(&self) -> &'a ReferenceTables {
        self.tables
    }

    /// Validate a record and derive every output
    ///
    /// Any invalid field fails the whole calculation; no partial report is
    /// produced.
    pub fn calculate(&self, input: &MeasurementInput) -> CalcResult<CalculationReport> {
        let measurements = normalize(input)?;
        tracing::debug!("Measurements normalized ({})", measurements.unit.as_str());

        let bmi = bmi_report(&measurements);
        let classified_shape = classify_shape(&measurements, &self.tables.shapes);
        let effective_shape = measurements.body_shape.or(classified_shape.shape);

        let hips = estimate_hips(&measurements, effective_shape, &self.tables.shapes);
        let size = match_size(&measurements.with_hips(hips.value), self.tables, &self.options);

        let proportions = proportion_report(&measurements);
        let secondary = secondary_measurements(&measurements);
        let adjusted = adjusted_measurements(&measurements, effective_shape, self.tables);

        // Estimated hips are kept out of the confidence checks
        let confidence = score_confidence(&PartialMeasurement::from(&measurements), self.tables);
        let display = to_display(&measurements, Some(hips.value), hips.estimated);

        tracing::info!(
            "Calculated shape {}, size {} (exact: {}), confidence {}",
            classified_shape.label,
            size.size,
            size.exact,
            confidence.score
        );

        Ok(CalculationReport {
            measurements,
            display,
            bmi,
            classified_shape,
            effective_shape,
            hips,
            size,
            proportions,
            secondary,
            adjusted,
            confidence,
        })
    }
}
