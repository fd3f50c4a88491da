//! Per-run performance metrics for the solvers.
//!
//! [`RunMetrics`] captures timing and problem-size data for a single
//! solver run, enabling profiling and method comparison.

/// Timing and size metrics collected during one solver run.
///
/// Durations are in microseconds. The solver populates these fields as
/// it returns its result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Wall-clock time for the whole run, in microseconds.
    pub total_us: u64,
    /// Propagation steps taken. Zero for the exact solver.
    pub steps: u64,
    /// Number of transient states (locations) in the chain.
    pub states: usize,
}
