//! Test utilities for Absorb development.
//!
//! Provides a [`RecordingObserver`] that captures iterative progress for
//! assertions, float comparison helpers, and the region fixtures in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use absorb_solve::{IterativeEstimate, ProgressObserver, StepReport};

pub use fixtures::{locs_p1, random_polyomino, LOCS_P1};

/// Observer that stores every report it receives.
///
/// Attach to [`IterativeEstimator::run`](absorb_solve::IterativeEstimator::run)
/// and inspect `reports` / `finished` afterwards.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub reports: Vec<StepReport>,
    pub finished: Option<IterativeEstimate>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps at which progress was reported.
    pub fn steps(&self) -> Vec<u64> {
        self.reports.iter().map(|r| r.step).collect()
    }
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&mut self, report: &StepReport) {
        self.reports.push(*report);
    }

    fn on_finish(&mut self, estimate: &IterativeEstimate) {
        self.finished = Some(estimate.clone());
    }
}

/// Assert `|a - b| <= tol`, with both values in the failure message.
#[track_caller]
pub fn assert_close(a: f64, b: f64, tol: f64) {
    assert!(
        (a - b).abs() <= tol,
        "expected {a} and {b} to agree within {tol}, differ by {}",
        (a - b).abs()
    );
}
