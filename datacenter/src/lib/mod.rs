//! Welcome to `datacenter`!
//!
//! A small model of list scheduling: [`Job`]s are appended to capacity-bounded
//! [`Processor`]s, processors are grouped into a [`Placement`], and the placement
//! is scored by cost, makespan and flow-time statistics. Deciding *which* job goes
//! where is left to the caller.

mod job;
mod processor;
mod placement;
pub mod analyze;
pub mod utils;

pub use crate::utils::{ModelError, Units, WideUnits};
pub use crate::analyze::Metrics;

/// Our fundamental unit of work. A [`Job`] runs for
/// [`execution_time`](Job::execution_time) units of logical time and needs
/// [`memory_usage`](Job::memory_usage) units of memory while it does so.
///
/// Jobs are plain values: two jobs are equal iff both fields match, and a job
/// belongs to whichever [`Processor`] it was moved into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Job {
    execution_time: Units,
    memory_usage:   Units,
}

/// A compute unit with a fixed time budget.
///
/// Jobs run back-to-back, non-preemptively, in the order they were accepted,
/// starting at time 0. The processor never holds more work than its
/// [`time_limit`](Processor::time_limit), and its peak memory usage only ever
/// grows.
///
/// Equality is structural: same schedule (same jobs, same order), same time
/// limit, same peak memory usage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Processor {
    jobs:               Vec<Job>,
    time_limit:         Units,
    // Kept in sync by `add_job`, never recomputed downwards.
    peak_memory_usage:  Units,
}

/// An ordered group of [`Processor`]s, i.e., one complete assignment of jobs.
///
/// Processors are independent capacity pools; nothing relates one to another.
/// Order matters for equality but not for any of the metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    processors: Vec<Processor>,
}
