pub use thiserror::Error;
pub use itertools::Itertools;
pub use tracing::{debug, trace};

pub use crate::{Job, Placement, Processor};

/// The unit for measuring both logical time and memory. The model does
/// not care about semantics, as long as the capacity invariant (see
/// [`Processor`]) is preserved.
pub type Units = u64;

/// Holds sums across processors or jobs, which may exceed [`Units`]
/// even when every summand is valid.
pub type WideUnits = u128;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Appears while constructing the model's building blocks. Capacity
/// violations are *not* errors: see [`Processor::add_job`].
pub enum ModelError {
    #[error("processor time limit must be positive")]
    ZeroTimeLimit,
    #[error("job execution time must be positive")]
    ZeroExecutionTime,
}
