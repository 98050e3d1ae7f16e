//! Size Calculator Library
//!
//! Derives body shape, standard size, secondary measurements and a
//! confidence score from one set of body measurements.

pub mod build_info;
pub mod calc;
pub mod error;
pub mod models;
pub mod tools;
pub mod units;

pub use calc::SizeCalculator;
pub use error::{CalcError, CalcResult, ValidationError};
pub use models::{MeasurementInput, ReferenceTables};
