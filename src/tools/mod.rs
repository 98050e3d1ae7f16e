//! Calculator tools
//!
//! Response shaping for callers of the engine.

pub mod calculate;
