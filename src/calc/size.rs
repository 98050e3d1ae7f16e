//! Standard-size matching
//!
//! A size matches exactly when every dimension present in both the record
//! and the size's ranges lies inside its inclusive range. Alongside, the size
//! with the smallest summed distance from range midpoints is tracked as the
//! fallback "closest match".

use crate::models::{NormalizedMeasurement, Range, ReferenceTables, SizeChart, SizeMatch, SizeRange};

/// Margin of the relaxed matching variant, in the chart's unit
pub const RELAXED_MARGIN: f64 = 3.0;

/// Size-matching options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Widening applied to each circumference range on both sides
    pub margin: f64,
}

impl MatchOptions {
    /// Exact ranges, no margin
    pub fn strict() -> Self {
        Self { margin: 0.0 }
    }

    /// Ranges widened by `RELAXED_MARGIN`
    pub fn relaxed() -> Self {
        Self {
            margin: RELAXED_MARGIN,
        }
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// (observed, range, margin) for every dimension both sides have
fn comparable_dimensions(
    m: &NormalizedMeasurement,
    size: &SizeRange,
    margin: f64,
) -> Vec<(f64, Range, f64)> {
    let mut dims = vec![(m.bust, size.bust, margin), (m.waist, size.waist, margin)];
    if let (Some(hips), Some(range)) = (m.hips, size.hips) {
        dims.push((hips, range, margin));
    }
    // Weight and height ranges are canonical units; the margin is a
    // circumference allowance and does not apply to them.
    if let Some(range) = size.weight_kg {
        dims.push((m.weight_kg, range, 0.0));
    }
    if let Some(range) = size.height_m {
        dims.push((m.height_m, range, 0.0));
    }
    dims
}

/// Match a record against one size chart
pub fn match_in_chart(m: &NormalizedMeasurement, chart: &SizeChart, options: &MatchOptions) -> SizeMatch {
    let mut closest: Option<(&str, f64)> = None;

    for size in &chart.sizes {
        let dims = comparable_dimensions(m, size, options.margin);
        let distance: f64 = dims.iter().map(|(value, range, _)| (value - range.midpoint()).abs()).sum();
        let within = dims.iter().all(|(value, range, margin)| range.contains(*value, *margin));

        tracing::debug!(
            "Size {}: distance {:.2}, within range: {}",
            size.label,
            distance,
            within
        );

        if within {
            return SizeMatch::exact(&size.label, distance);
        }
        if closest.map_or(true, |(_, best)| distance < best) {
            closest = Some((&size.label, distance));
        }
    }

    match closest {
        Some((label, distance)) => SizeMatch::closest(label, distance),
        None => {
            tracing::warn!("Size chart in {} has no sizes", chart.unit.as_str());
            SizeMatch::not_available("Measurements do not match any standard size.")
        }
    }
}

/// Match a record against the chart for its unit
///
/// Hips should already be measured or estimated; without them only bust,
/// waist and any weight/height ranges are compared.
pub fn match_size(m: &NormalizedMeasurement, tables: &ReferenceTables, options: &MatchOptions) -> SizeMatch {
    if m.hips.is_none() {
        tracing::warn!("Matching size without hips; estimate hips before matching");
    }
    match tables.size_chart(m.unit) {
        Some(chart) => match_in_chart(m, &chart, options),
        None => {
            tracing::warn!("No size chart configured");
            SizeMatch::not_available("No size chart is configured.")
        }
    }
}
