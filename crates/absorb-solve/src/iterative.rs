//! Expected escape time by forward probability propagation.
//!
//! Starting from all mass at one location, the distribution is advanced
//! synchronously. At step `k` the mass newly absorbed is exactly
//! `P(escape time = k)`, so `Σ k · newly_escaped(k)` converges to the
//! expected escape time as the escaped mass approaches 1.

use crate::config::{ConfigError, IterativeConfig};
use crate::distribution::StateDistribution;
use crate::metrics::RunMetrics;
use crate::observer::ProgressObserver;
use absorb_core::{Coord, SolveError};
use absorb_space::Adjacency;
use std::time::Instant;

/// State of the propagation after one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// 1-based step number.
    pub step: u64,
    /// Mass absorbed during this step.
    pub newly_escaped: f64,
    /// Cumulative escaped mass after this step.
    pub escaped: f64,
    /// Running `Σ step · newly_escaped` up to this step.
    pub expected_steps: f64,
}

/// Result of a converged iterative run.
#[derive(Clone, Debug, PartialEq)]
pub struct IterativeEstimate {
    /// Expected number of steps to escape.
    pub expected_steps: f64,
    /// Propagation steps taken until convergence.
    pub steps: u64,
    /// Escaped mass at convergence (at least `1 - tolerance`).
    pub escaped: f64,
    /// Timing and size data for the run.
    pub metrics: RunMetrics,
}

/// Step-by-step propagation, exposed as an iterator of [`StepReport`]s.
///
/// The iterator ends when the escaped mass reaches the configured
/// threshold or when `max_steps` steps have been taken, whichever comes
/// first. Check [`is_converged`](Self::is_converged) afterwards to tell
/// the two apart.
#[derive(Debug)]
pub struct Walk<'a> {
    adjacency: &'a Adjacency,
    current: StateDistribution,
    scratch: StateDistribution,
    step: u64,
    expected_steps: f64,
    threshold: f64,
    max_steps: u64,
}

impl Walk<'_> {
    /// Steps taken so far.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Running expected-steps accumulator.
    pub fn expected_steps(&self) -> f64 {
        self.expected_steps
    }

    /// Distribution after the latest step.
    pub fn distribution(&self) -> &StateDistribution {
        &self.current
    }

    /// `true` once the escaped mass has reached the threshold.
    pub fn is_converged(&self) -> bool {
        self.current.escaped() >= self.threshold
    }
}

impl Iterator for Walk<'_> {
    type Item = StepReport;

    fn next(&mut self) -> Option<StepReport> {
        if self.is_converged() || self.step >= self.max_steps {
            return None;
        }
        let newly_escaped = self.current.step_into(self.adjacency, &mut self.scratch);
        std::mem::swap(&mut self.current, &mut self.scratch);
        self.step += 1;
        self.expected_steps += self.step as f64 * newly_escaped;
        Some(StepReport {
            step: self.step,
            newly_escaped,
            escaped: self.current.escaped(),
            expected_steps: self.expected_steps,
        })
    }
}

/// Estimates expected escape time by propagating the state distribution.
///
/// # Examples
///
/// ```
/// use absorb_solve::{IterativeConfig, IterativeEstimator, Silent};
/// use absorb_space::{Adjacency, Region};
///
/// let adj = Adjacency::new(Region::from_extents(&[3]).unwrap());
/// let est = IterativeEstimator::new(&adj, IterativeConfig::default()).unwrap();
/// let result = est.run(&mut Silent).unwrap();
/// assert!((result.expected_steps - 4.0).abs() < 1e-6);
/// ```
#[derive(Clone, Debug)]
pub struct IterativeEstimator<'a> {
    adjacency: &'a Adjacency,
    config: IterativeConfig,
}

impl<'a> IterativeEstimator<'a> {
    /// Create an estimator over `adjacency`.
    ///
    /// Returns `Err` if the config fails validation.
    pub fn new(adjacency: &'a Adjacency, config: IterativeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { adjacency, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &IterativeConfig {
        &self.config
    }

    /// Begin a propagation from `start`.
    ///
    /// Returns `Err(SolveError::InvalidStart)` if `start` is not a
    /// location; no step is taken in that case.
    pub fn walk(&self, start: &Coord) -> Result<Walk<'a>, SolveError> {
        let current = StateDistribution::point_mass(self.adjacency, start)?;
        Ok(Walk {
            adjacency: self.adjacency,
            scratch: StateDistribution::zeroed(current.len()),
            current,
            step: 0,
            expected_steps: 0.0,
            threshold: self.config.threshold(),
            max_steps: self.config.max_steps,
        })
    }

    /// Run to convergence from the region's origin.
    pub fn run(&self, observer: &mut dyn ProgressObserver) -> Result<IterativeEstimate, SolveError> {
        let origin = self.adjacency.region().origin();
        self.run_from(&origin, observer)
    }

    /// Run to convergence from `start`.
    ///
    /// Returns `Err(SolveError::NonConvergence)` if `max_steps` is
    /// exhausted first.
    pub fn run_from(
        &self,
        start: &Coord,
        observer: &mut dyn ProgressObserver,
    ) -> Result<IterativeEstimate, SolveError> {
        let started = Instant::now();
        let mut walk = self.walk(start)?;

        for report in walk.by_ref() {
            if report.step.is_power_of_two() {
                observer.on_progress(&report);
            }
        }

        if !walk.is_converged() {
            return Err(SolveError::NonConvergence {
                steps: walk.step(),
                escaped: walk.distribution().escaped(),
            });
        }

        let estimate = IterativeEstimate {
            expected_steps: walk.expected_steps(),
            steps: walk.step(),
            escaped: walk.distribution().escaped(),
            metrics: RunMetrics {
                total_us: started.elapsed().as_micros() as u64,
                steps: walk.step(),
                states: self.adjacency.len(),
            },
        };
        observer.on_finish(&estimate);
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::Silent;
    use absorb_space::Region;

    #[derive(Default)]
    struct Recorder {
        reports: Vec<StepReport>,
        finished: Option<IterativeEstimate>,
    }

    impl ProgressObserver for Recorder {
        fn on_progress(&mut self, report: &StepReport) {
            self.reports.push(*report);
        }

        fn on_finish(&mut self, estimate: &IterativeEstimate) {
            self.finished = Some(estimate.clone());
        }
    }

    fn adjacency(dims: &[u32]) -> Adjacency {
        Adjacency::new(Region::from_extents(dims).unwrap())
    }

    #[test]
    fn single_cell_escapes_in_exactly_one_step() {
        let adj = adjacency(&[1, 1]);
        let est = IterativeEstimator::new(&adj, IterativeConfig::default()).unwrap();
        let r = est.run(&mut Silent).unwrap();
        assert_eq!(r.expected_steps, 1.0);
        assert_eq!(r.steps, 1);
        assert_eq!(r.escaped, 1.0);
        assert_eq!(r.metrics.states, 1);
    }

    #[test]
    fn line_of_three_converges_to_four() {
        let adj = adjacency(&[3]);
        let est = IterativeEstimator::new(&adj, IterativeConfig::default()).unwrap();
        let r = est.run(&mut Silent).unwrap();
        assert!((r.expected_steps - 4.0).abs() < 1e-6, "{}", r.expected_steps);
        assert!(r.escaped >= 1.0 - 1e-12);
        assert!((75..=85).contains(&r.steps), "steps = {}", r.steps);
    }

    #[test]
    fn box_5x5_matches_known_value() {
        // Expected escape time from the centre of a 5x5 box is 135/13.
        let adj = adjacency(&[5, 5]);
        let est = IterativeEstimator::new(&adj, IterativeConfig::default()).unwrap();
        let r = est.run(&mut Silent).unwrap();
        assert!((r.expected_steps - 135.0 / 13.0).abs() < 1e-6);
    }

    #[test]
    fn start_outside_region_fails_before_stepping() {
        let adj = adjacency(&[3]);
        let est = IterativeEstimator::new(&adj, IterativeConfig::default()).unwrap();
        let mut rec = Recorder::default();
        let err = est.run_from(&Coord::from([4]), &mut rec).unwrap_err();
        assert_eq!(
            err,
            SolveError::InvalidStart {
                start: Coord::from([4])
            }
        );
        assert!(rec.reports.is_empty());
        assert!(rec.finished.is_none());
    }

    #[test]
    fn shape_without_origin_is_invalid_start() {
        let region = Region::from_shape(vec![Coord::from([1, 1]), Coord::from([1, 2])]).unwrap();
        let adj = Adjacency::new(region);
        let est = IterativeEstimator::new(&adj, IterativeConfig::default()).unwrap();
        assert!(matches!(
            est.run(&mut Silent),
            Err(SolveError::InvalidStart { .. })
        ));
    }

    #[test]
    fn step_bound_reports_non_convergence() {
        let adj = adjacency(&[5, 5]);
        let config = IterativeConfig {
            max_steps: 10,
            ..Default::default()
        };
        let est = IterativeEstimator::new(&adj, config).unwrap();
        match est.run(&mut Silent) {
            Err(SolveError::NonConvergence { steps, escaped }) => {
                assert_eq!(steps, 10);
                assert!(escaped > 0.0 && escaped < 1.0);
            }
            other => panic!("expected NonConvergence, got {other:?}"),
        }
    }

    #[test]
    fn progress_fires_at_powers_of_two() {
        let adj = adjacency(&[3]);
        let est = IterativeEstimator::new(&adj, IterativeConfig::default()).unwrap();
        let mut rec = Recorder::default();
        let r = est.run(&mut rec).unwrap();
        let steps: Vec<u64> = rec.reports.iter().map(|s| s.step).collect();
        let expected: Vec<u64> = (0..)
            .map(|k| 1u64 << k)
            .take_while(|&s| s <= r.steps)
            .collect();
        assert_eq!(steps, expected);
        assert_eq!(rec.finished.as_ref(), Some(&r));
    }

    #[test]
    fn walk_escaped_mass_never_decreases() {
        let adj = adjacency(&[4, 3]);
        let est = IterativeEstimator::new(&adj, IterativeConfig::default()).unwrap();
        let walk = est.walk(&Coord::from([0, 0])).unwrap();
        let mut last = 0.0;
        for report in walk {
            assert!(report.escaped >= last);
            assert!(report.newly_escaped >= 0.0);
            last = report.escaped;
        }
        assert!(last >= 1.0 - 1e-12);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let adj = adjacency(&[3]);
        let config = IterativeConfig {
            tolerance: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            IterativeEstimator::new(&adj, config),
            Err(ConfigError::InvalidTolerance { .. })
        ));
    }

    #[test]
    fn looser_tolerance_stops_earlier() {
        let adj = adjacency(&[5]);
        let tight = IterativeEstimator::new(&adj, IterativeConfig::default())
            .unwrap()
            .run(&mut Silent)
            .unwrap();
        let loose = IterativeEstimator::new(
            &adj,
            IterativeConfig {
                tolerance: 1e-3,
                ..Default::default()
            },
        )
        .unwrap()
        .run(&mut Silent)
        .unwrap();
        assert!(loose.steps < tight.steps);
        assert!(loose.expected_steps <= tight.expected_steps);
        assert!((tight.expected_steps - 9.0).abs() < 1e-6);
    }
}
