//! Progress reporting hooks for the iterative estimator.
//!
//! Reporting is observational only: results do not depend on which
//! observer is attached.

use crate::iterative::{IterativeEstimate, StepReport};

/// Receives progress from [`IterativeEstimator::run`](crate::IterativeEstimator::run).
///
/// `on_progress` fires at every power-of-two step (1, 2, 4, 8, ...);
/// `on_finish` fires once after convergence. Both default to no-ops.
pub trait ProgressObserver {
    /// Called at power-of-two steps.
    fn on_progress(&mut self, _report: &StepReport) {}

    /// Called once with the converged estimate.
    fn on_finish(&mut self, _estimate: &IterativeEstimate) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl ProgressObserver for Silent {}

/// Observer that prints human-readable progress lines to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrProgress;

impl ProgressObserver for StderrProgress {
    fn on_progress(&mut self, report: &StepReport) {
        eprintln!(
            "At step {} there is probability {:.10} of having escaped.",
            report.step, report.escaped
        );
    }

    fn on_finish(&mut self, estimate: &IterativeEstimate) {
        eprintln!("Total steps run: {}", estimate.steps);
        eprintln!("Expected steps to escape: {}", estimate.expected_steps);
    }
}
