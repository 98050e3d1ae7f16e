//! Units module
//!
//! Unit systems, conversion constants and record normalization.

pub mod normalizer;
pub mod system;

pub use normalizer::{denormalize, normalize, normalize_lenient, to_display, PartialMeasurement};
pub use system::{
    round1, round2, UnitSystem, CM_PER_INCH, CM_PER_METER, INCHES_PER_METER, LB_PER_KG,
};
