use crate::domain::brand::{SizeChart, SizeEntry};
use crate::domain::measurement::{Dimension, Measurements};
use crate::domain::recommendation::SizeMatch;

/// `(exclusive upper error bound, confidence)`, checked in order.
pub const CONFIDENCE_STEPS: [(f64, u8); 4] = [(0.05, 95), (0.10, 85), (0.15, 75), (0.20, 65)];

pub const MIN_CONFIDENCE: u8 = 50;

pub fn confidence_for_error(error: f64) -> u8 {
    CONFIDENCE_STEPS
        .iter()
        .find(|(bound, _)| error < *bound)
        .map(|(_, confidence)| *confidence)
        .unwrap_or(MIN_CONFIDENCE)
}

/// Unweighted sum of the per-dimension relative errors.
pub fn total_fit_error(measurements: &Measurements, entry: &SizeEntry) -> f64 {
    Dimension::SIZED
        .iter()
        .map(|dimension| entry.range(*dimension).relative_error(measurements.get(*dimension)))
        .sum()
}

pub trait SizeMatcher: Send + Sync {
    fn find_best_size(&self, measurements: &Measurements, chart: &SizeChart) -> SizeMatch;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RangeDistanceMatcher;

impl SizeMatcher for RangeDistanceMatcher {
    fn find_best_size(&self, measurements: &Measurements, chart: &SizeChart) -> SizeMatch {
        let mut best: Option<(&SizeEntry, f64)> = None;

        for entry in chart.entries() {
            let error = total_fit_error(measurements, entry);
            // Strict comparison keeps the first of equally good sizes.
            if best.map_or(true, |(_, lowest)| error < lowest) {
                best = Some((entry, error));
            }
        }

        match best {
            Some((entry, error)) => SizeMatch {
                size: Some(entry.label),
                confidence: Some(confidence_for_error(error)),
                total_error: Some(error),
            },
            None => SizeMatch::NONE,
        }
    }
}
