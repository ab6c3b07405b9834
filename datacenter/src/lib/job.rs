use crate::utils::*;

impl Job {
    /// Creates a job. A job that takes no time is rejected, since
    /// it could never occupy a processor.
    pub fn new(execution_time: Units, memory_usage: Units) -> Result<Self, ModelError> {
        if execution_time == 0 {
            return Err(ModelError::ZeroExecutionTime);
        }

        Ok(Self {
            execution_time,
            memory_usage,
        })
    }

    pub fn execution_time(&self) -> Units {
        self.execution_time
    }

    pub fn memory_usage(&self) -> Units {
        self.memory_usage
    }
}
