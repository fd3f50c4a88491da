//! Expected escape times for a box and an irregular region.
//!
//! Runs the iterative estimator on a 5x5 box with progress printed to
//! stderr, then solves the 25-cell `LOCS_P1` region exactly and prints
//! the expected escape time from every cell.

use absorb_solve::{
    EscapeProblem, ExactConfig, IterativeConfig, ProblemError, Silent, StderrProgress,
};
use absorb_test_utils::locs_p1;

fn main() -> Result<(), ProblemError> {
    println!("=== Iterative estimate: 5x5 box ===\n");
    let boxed = EscapeProblem::from_extents(&[5, 5])?;
    let est = boxed.iterate(IterativeConfig::default(), &mut StderrProgress)?;
    println!(
        "{} cells, {} steps, E[T] from origin = {:.10} ({} us)",
        est.metrics.states, est.steps, est.expected_steps, est.metrics.total_us
    );

    println!("\n=== Exact solve: LOCS_P1 ===\n");
    let shaped = EscapeProblem::from_shape(locs_p1())?;
    let sol = shaped.solve_exact(ExactConfig::default())?;
    let variances = sol.variances();
    for (i, (coord, expected)) in sol.iter().enumerate() {
        println!("{coord} {expected:.6}  (var {:.4})", variances[i]);
    }
    println!("\nE[T] from origin = {:.10}", sol.at_origin()?);

    let iterative = shaped.iterate(IterativeConfig::default(), &mut Silent)?;
    println!(
        "iterative cross-check = {:.10} after {} steps",
        iterative.expected_steps, iterative.steps
    );
    Ok(())
}
