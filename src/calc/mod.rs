//! Calculation module
//!
//! Shape classification, size matching, derived measurements and
//! confidence scoring over one measurement record.

pub mod bmi;
pub mod confidence;
pub mod derived;
pub mod engine;
pub mod proportions;
pub mod shape;
pub mod size;

pub use bmi::{bmi_category, bmi_report};
pub use confidence::{score_confidence, score_input};
pub use derived::{adjusted_measurements, estimate_hips, secondary_measurements};
pub use engine::SizeCalculator;
pub use proportions::proportion_report;
pub use shape::{classify_shape, shape_is_consistent};
pub use size::{match_size, MatchOptions, RELAXED_MARGIN};
