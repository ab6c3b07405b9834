use crate::utils::*;

impl Processor {
    /// Creates an empty processor. A zero time limit is rejected, since
    /// such a processor could never accept any [`Job`].
    pub fn new(time_limit: Units) -> Result<Self, ModelError> {
        if time_limit == 0 {
            return Err(ModelError::ZeroTimeLimit);
        }

        Ok(Self {
            jobs:               vec![],
            time_limit,
            peak_memory_usage:  0,
        })
    }

    /// Returns `true` if appending `job` keeps the schedule within the
    /// time limit. Has no side effects.
    pub fn can_fit_job(&self, job: &Job) -> bool {
        // An addition that overflows certainly doesn't fit.
        self.total_computation_time()
            .checked_add(job.execution_time())
            .is_some_and(|t| t <= self.time_limit)
    }

    /// Appends `job` at the end of the schedule if it fits.
    ///
    /// Returns `false`, leaving the processor untouched, if it doesn't.
    /// Callers must check the result: a rejected job is dropped. Use
    /// [`try_add_job`](Processor::try_add_job) to get it back instead.
    pub fn add_job(&mut self, job: Job) -> bool {
        self.try_add_job(job).is_ok()
    }

    /// Same rule as [`add_job`](Processor::add_job), but hands a rejected
    /// job back so that it may be offered elsewhere.
    pub fn try_add_job(&mut self, job: Job) -> Result<(), Job> {
        if !self.can_fit_job(&job) {
            debug!(
                execution_time = job.execution_time(),
                remaining = self.remaining_time(),
                "job rejected: time limit exceeded"
            );
            return Err(job);
        }

        self.peak_memory_usage = self.peak_memory_usage.max(job.memory_usage());
        self.jobs.push(job);
        trace!(
            jobs = self.jobs.len(),
            peak_memory_usage = self.peak_memory_usage,
            "job accepted"
        );

        Ok(())
    }

    /// The highest memory usage among assigned jobs, 0 if there are none.
    pub fn peak_memory_usage(&self) -> Units {
        self.peak_memory_usage
    }

    /// Total execution time of the assigned jobs. Recomputed on every call.
    pub fn total_computation_time(&self) -> Units {
        self.jobs
            .iter()
            .map(|j| j.execution_time())
            .sum()
    }

    pub fn time_limit(&self) -> Units {
        self.time_limit
    }

    /// How much of the time limit is still unused.
    pub fn remaining_time(&self) -> Units {
        self.time_limit - self.total_computation_time()
    }

    /// A copy of the schedule, in assignment order. Changing it does
    /// not affect the processor.
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.clone()
    }

    /// Borrowed, read-only view of the schedule.
    pub fn schedule(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Completion timestamp of every job, in schedule order.
    ///
    /// The processor starts idle at time 0 and runs its jobs back-to-back,
    /// so each job's flow time is the running sum of execution times up to
    /// and including itself.
    pub fn flow_times(&self) -> Vec<Units> {
        self.jobs
            .iter()
            .scan(0, |clock: &mut Units, j| {
                *clock += j.execution_time();
                Some(*clock)
            })
            .collect()
    }
}
