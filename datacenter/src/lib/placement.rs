use crate::utils::*;
use crate::analyze::{mean, median};

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a processor. No feasibility check happens at this
    /// level; every processor already enforces its own capacity.
    pub fn add_processor(&mut self, processor: Processor) {
        debug!(
            index = self.processors.len(),
            time_limit = processor.time_limit(),
            jobs = processor.len(),
            "processor added"
        );
        self.processors.push(processor);
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Number of jobs across all processors.
    pub fn job_count(&self) -> usize {
        self.processors
            .iter()
            .map(|p| p.len())
            .sum()
    }

    /// Sum of every processor's *peak* memory usage. This is not the
    /// sum of all jobs' memory usages.
    ///
    /// Widened to [`WideUnits`]: every peak may legally be as large as
    /// `Units::MAX`.
    pub fn cost(&self) -> WideUnits {
        self.processors
            .iter()
            .map(|p| p.peak_memory_usage() as WideUnits)
            .sum()
    }

    /// Completion time of the last-finishing processor, 0 if there's no work.
    pub fn make_span(&self) -> Units {
        self.processors
            .iter()
            .map(|p| p.total_computation_time())
            .max()
            .unwrap_or(0)
    }

    /// Every job's flow time, pooled across processors (processor order,
    /// then schedule order).
    pub fn flow_times(&self) -> Vec<Units> {
        self.processors
            .iter()
            .flat_map(|p| p.flow_times())
            .collect()
    }

    /// Mean flow time over all jobs; 0 if there's no work.
    pub fn mean_flow_time(&self) -> f64 {
        mean(&self.flow_times())
    }

    /// Median flow time over all jobs; 0 if there's no work.
    pub fn median_flow_time(&self) -> f64 {
        median(&self.flow_times())
    }
}

impl Extend<Processor> for Placement {
    fn extend<T: IntoIterator<Item = Processor>>(&mut self, iter: T) {
        for p in iter {
            self.add_processor(p);
        }
    }
}

impl FromIterator<Processor> for Placement {
    fn from_iter<T: IntoIterator<Item = Processor>>(iter: T) -> Self {
        let mut res = Placement::new();
        res.extend(iter);

        res
    }
}
