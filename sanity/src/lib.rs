//! Utilities for loading, scoring and comparing candidate placements.
//!
//! Candidates are described in JSON (see [`PlacementSpec`]). Loading replays
//! every job into its processor through [`Processor::try_add_job`], so a file
//! can never smuggle an over-capacity schedule past the model: whatever the
//! processor refuses is collected as a [`Rejection`].
pub use std::path::{Path, PathBuf};
pub use std::fmt;
pub use std::cmp::Ordering;
pub use clap::{Parser, ValueEnum};
pub use rayon::prelude::*;
pub use thiserror::Error;
pub use datacenter::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    pub execution_time: Units,
    pub memory_usage:   Units,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorSpec {
    pub time_limit: Units,
    #[serde(default)]
    pub jobs:       Vec<JobSpec>,
}

/// One candidate assignment: processors in order, each with its jobs
/// in schedule order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSpec {
    pub processors: Vec<ProcessorSpec>,
}

#[derive(Error, Debug)]
pub enum SanityError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },
    #[error("malformed placement in {}: {source}", .path.display())]
    Json {
        path:   PathBuf,
        source: serde_json::Error,
    },
    #[error("processor #{processor}: {source}")]
    Model {
        processor:  usize,
        source:     ModelError,
    },
    #[error("{count} job(s) rejected in {}", .path.display())]
    Rejected {
        path:   PathBuf,
        count:  usize,
    },
}

/// A job that its processor refused to take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub processor:  usize,
    // Index within the processor's job list in the input.
    pub position:   usize,
    pub job:        JobSpec,
}

/// The outcome of replaying a [`PlacementSpec`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loaded {
    pub placement:  Placement,
    pub rejected:   Vec<Rejection>,
}

impl PlacementSpec {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Builds the placement, offering each job to its processor in order.
    ///
    /// Invalid values (zero time limits, zero execution times) fail the
    /// whole build; capacity rejections don't.
    pub fn build(&self) -> Result<Loaded, SanityError> {
        let mut placement = Placement::new();
        let mut rejected = vec![];
        for (idx, ps) in self.processors.iter().enumerate() {
            let model_err = |source: ModelError| SanityError::Model { processor: idx, source };
            let mut proc = Processor::new(ps.time_limit).map_err(model_err)?;
            for (position, js) in ps.jobs.iter().enumerate() {
                let job = Job::new(js.execution_time, js.memory_usage).map_err(model_err)?;
                if let Err(job) = proc.try_add_job(job) {
                    warn!(
                        processor = idx,
                        position,
                        execution_time = job.execution_time(),
                        "job does not fit on its processor"
                    );
                    rejected.push(Rejection {
                        processor:  idx,
                        position,
                        job:        *js,
                    });
                }
            }
            placement.add_processor(proc);
        }

        Ok(Loaded {
            placement,
            rejected,
        })
    }
}

impl From<&Processor> for ProcessorSpec {
    fn from(p: &Processor) -> Self {
        Self {
            time_limit: p.time_limit(),
            jobs:       p.schedule()
                .iter()
                .map(|j| JobSpec {
                    execution_time: j.execution_time(),
                    memory_usage:   j.memory_usage(),
                })
                .collect(),
        }
    }
}

impl From<&Placement> for PlacementSpec {
    fn from(p: &Placement) -> Self {
        Self {
            processors: p.processors()
                .iter()
                .map(ProcessorSpec::from)
                .collect(),
        }
    }
}

/// Defines the interface for reading candidate placements.
///
/// We ship a JSON reader; anything else that can produce a
/// [`PlacementSpec`] can be plugged in by implementing this trait.
pub trait PlacementGen {
    fn new(path: PathBuf) -> Self;
    fn path(&self) -> &Path;
    fn read_placement(&self) -> Result<PlacementSpec, SanityError>;
}

pub struct JsonParser {
    pub path: PathBuf,
}

impl PlacementGen for JsonParser {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read_placement(&self) -> Result<PlacementSpec, SanityError> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|source| SanityError::Io { path: self.path.clone(), source })?;

        PlacementSpec::from_json(&raw)
            .map_err(|source| SanityError::Json { path: self.path.clone(), source })
    }
}

/// The metric to minimize when ranking candidates.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum Objective {
    /// Sum of per-processor peak memory usage
    Cost,
    /// Completion time of the last-finishing processor
    MakeSpan,
    /// Mean job flow time
    MeanFlow,
    /// Median job flow time
    MedianFlow,
}

impl Objective {
    /// Orders two reports under this objective. Integer metrics are
    /// compared exactly; only the flow statistics go through `f64`.
    pub fn compare(&self, a: &Report, b: &Report) -> Ordering {
        match self {
            Objective::Cost         => a.cost.cmp(&b.cost),
            Objective::MakeSpan     => a.make_span.cmp(&b.make_span),
            Objective::MeanFlow     => a.mean_flow_time.total_cmp(&b.mean_flow_time),
            Objective::MedianFlow   => a.median_flow_time.total_cmp(&b.median_flow_time),
        }
    }

    /// The objective's value as a float, for display.
    pub fn score(&self, r: &Report) -> f64 {
        match self {
            Objective::Cost         => r.cost as f64,
            Objective::MakeSpan     => r.make_span as f64,
            Objective::MeanFlow     => r.mean_flow_time,
            Objective::MedianFlow   => r.median_flow_time,
        }
    }
}

/// Everything worth knowing about one scored candidate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub source:             PathBuf,
    pub processors:         usize,
    pub jobs:               usize,
    pub rejected:           Vec<Rejection>,
    pub cost:               WideUnits,
    pub make_span:          Units,
    pub mean_flow_time:     f64,
    pub median_flow_time:   f64,
}

impl Report {
    pub fn new(source: PathBuf, loaded: &Loaded) -> Self {
        let m = Metrics::of(&loaded.placement);
        debug!(source = %source.display(), ?m, "placement scored");

        Self {
            source,
            processors:         loaded.placement.len(),
            jobs:               loaded.placement.job_count(),
            rejected:           loaded.rejected.clone(),
            cost:               m.cost,
            make_span:          m.make_span,
            mean_flow_time:     m.mean_flow_time,
            median_flow_time:   m.median_flow_time,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.source.display())?;
        writeln!(f, "Processors:\t{}\nJobs:\t\t{}\nRejected:\t{}", self.processors, self.jobs, self.rejected.len())?;
        writeln!(f, "Cost:\t\t{}\nMakespan:\t{}", self.cost, self.make_span)?;
        write!(f, "Flow time:\t{:.2} (mean), {:.2} (median)", self.mean_flow_time, self.median_flow_time)
    }
}

/// Reads and scores the placement stored at `path`.
pub fn evaluate<T: PlacementGen>(path: PathBuf) -> Result<Report, SanityError> {
    let parser = T::new(path);
    let loaded = parser.read_placement()?.build()?;

    Ok(Report::new(parser.path().to_path_buf(), &loaded))
}

/// Scores every file in parallel. Results keep the input order.
pub fn evaluate_all<T: PlacementGen>(paths: &[PathBuf]) -> Vec<Result<Report, SanityError>> {
    paths.par_iter()
        .map(|p| evaluate::<T>(p.clone()))
        .collect()
}

/// Index of the best report under `objective`. Ties go to the
/// earliest report.
pub fn best(reports: &[Report], objective: Objective) -> Option<usize> {
    reports.iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| objective.compare(a, b))
        .map(|(idx, _)| idx)
}
