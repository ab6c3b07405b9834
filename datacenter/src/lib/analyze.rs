//! Statistics and sanity checks over [`Processor`]s and [`Placement`]s.
use crate::utils::*;

/// Arithmetic mean of `values`, 0 for an empty slice.
pub fn mean(values: &[Units]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let total = values
        .iter()
        .fold(0 as WideUnits, |acc, &v| acc + v as WideUnits);

    total as f64 / values.len() as f64
}

/// Median of `values`, 0 for an empty slice.
///
/// For an even number of values, the mean of the two middle ones
/// (after sorting in ascending order) is returned.
pub fn median(values: &[Units]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted = values
        .iter()
        .copied()
        .sorted_unstable()
        .collect_vec();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        // Added as f64 so that the sum can't overflow `Units`.
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Re-checks a processor's invariants from scratch: the schedule fits
/// within the time limit and the tracked peak matches the jobs held.
pub fn processor_is_valid(p: &Processor) -> bool {
    let total = p.schedule()
        .iter()
        .try_fold(0 as Units, |acc, j| acc.checked_add(j.execution_time()));
    let peak = p.schedule()
        .iter()
        .map(|j| j.memory_usage())
        .max()
        .unwrap_or(0);

    p.time_limit() > 0
        && total.is_some_and(|t| t <= p.time_limit())
        && peak == p.peak_memory_usage()
}

pub fn placement_is_valid(p: &Placement) -> bool {
    p.processors()
        .iter()
        .all(processor_is_valid)
}

/// A snapshot of the quantities used to compare placements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    pub cost:               WideUnits,
    pub make_span:          Units,
    pub mean_flow_time:     f64,
    pub median_flow_time:   f64,
}

impl Metrics {
    pub fn of(placement: &Placement) -> Self {
        // Pooled once, shared by both statistics.
        let flows = placement.flow_times();

        Self {
            cost:               placement.cost(),
            make_span:          placement.make_span(),
            mean_flow_time:     mean(&flows),
            median_flow_time:   median(&flows),
        }
    }
}
