//! Data models
//!
//! Input records, reference tables and calculation results.

mod measurement;
mod reference;
mod report;

pub use measurement::{
    read_field, AgeGroup, BodyShape, DisplayMeasurements, FieldReading, FieldValue,
    HeightCategory, MeasurementInput, NormalizedMeasurement,
};
pub use reference::{
    AgeFactor, DerivedFactors, Range, ReferenceTables, ShapeProfile, ShapeRatios, SizeChart,
    SizeRange,
};
pub use report::{
    BmiReport, CalculationReport, CategoryScore, ConfidenceLevel, ConfidenceResult,
    HipsMeasurement, ProportionReport, ScoreBreakdown, ScoreCategory, SecondaryMeasurements,
    ShapeClassification, SizeMatch, NOT_AVAILABLE,
};
