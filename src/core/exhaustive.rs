use crate::core::permutation::{factorial, next_permutation};
use crate::domain::model::{DrawProblem, Solution};
use crate::domain::ports::{ProgressObserver, SolutionSearch};
use crate::utils::error::{DrawError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::ControlFlow;

const PROGRESS_INTERVAL: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustiveMode {
    /// Stop at the first valid permutation in lexicographic order.
    First,
    /// Visit every permutation and pick one valid draw uniformly at random.
    UniformRandom,
}

/// Walks every permutation of the participants in lexicographic order.
///
/// Bounded by n!, so only practical up to about ten participants.
/// A random source is only held in uniform mode.
#[derive(Debug, Clone)]
pub struct ExhaustiveSearch {
    rng: Option<StdRng>,
}

impl ExhaustiveSearch {
    pub fn first() -> Self {
        Self { rng: None }
    }

    pub fn uniform(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn mode(&self) -> ExhaustiveMode {
        match self.rng {
            Some(_) => ExhaustiveMode::UniformRandom,
            None => ExhaustiveMode::First,
        }
    }

    /// Every valid draw, in lexicographic order of receivers.
    pub fn collect_all(
        problem: &DrawProblem,
        progress: &mut dyn ProgressObserver,
    ) -> Vec<Solution> {
        let mut solutions = Vec::new();
        scan(problem, progress, |receivers| {
            solutions.push(problem.solution_from_indices(receivers));
            ControlFlow::Continue(())
        });
        solutions
    }

    /// Number of valid draws.
    pub fn count(problem: &DrawProblem, progress: &mut dyn ProgressObserver) -> u64 {
        scan(problem, progress, |_| ControlFlow::Continue(())).valid
    }
}

/// Totals from one pass over the permutations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ScanStats {
    checked: u64,
    valid: u64,
}

fn is_valid(problem: &DrawProblem, receivers: &[usize]) -> bool {
    receivers
        .iter()
        .enumerate()
        .all(|(giver, &receiver)| problem.allows(giver, receiver))
}

/// Feed every valid permutation to `visit` until it breaks.
fn scan<F>(problem: &DrawProblem, progress: &mut dyn ProgressObserver, mut visit: F) -> ScanStats
where
    F: FnMut(&[usize]) -> ControlFlow<()>,
{
    let mut stats = ScanStats::default();
    let mut receivers: Vec<usize> = (0..problem.len()).collect();

    progress.on_start(factorial(problem.len()));

    if !problem.is_empty() {
        loop {
            stats.checked += 1;
            if stats.checked % PROGRESS_INTERVAL == 0 {
                progress.on_progress(stats.checked);
            }

            if is_valid(problem, &receivers) {
                stats.valid += 1;
                if visit(&receivers).is_break() {
                    break;
                }
            }

            if !next_permutation(&mut receivers) {
                break;
            }
        }
    }

    progress.on_finish(stats.checked, stats.valid);
    stats
}

impl SolutionSearch for ExhaustiveSearch {
    fn name(&self) -> &'static str {
        match self.mode() {
            ExhaustiveMode::First => "exhaustive-first",
            ExhaustiveMode::UniformRandom => "exhaustive-uniform",
        }
    }

    fn search(
        &mut self,
        problem: &DrawProblem,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Solution> {
        let mode = self.mode();
        let mut rng = self.rng.as_mut();
        let mut chosen: Option<Vec<usize>> = None;
        let mut seen: u64 = 0;

        let stats = scan(problem, progress, |receivers| match rng.as_mut() {
            None => {
                chosen = Some(receivers.to_vec());
                ControlFlow::Break(())
            }
            Some(rng) => {
                // Reservoir of size one: the k-th valid draw replaces the
                // current pick with probability 1/k.
                seen += 1;
                if rng.gen_range(0..seen) == 0 {
                    chosen = Some(receivers.to_vec());
                }
                ControlFlow::Continue(())
            }
        });

        tracing::debug!(
            "Exhaustive search checked {} permutations, {} valid",
            stats.checked,
            stats.valid
        );

        match chosen {
            Some(receivers) => {
                if mode == ExhaustiveMode::UniformRandom {
                    tracing::info!("Picked one draw among {} valid draws", stats.valid);
                }
                Ok(problem.solution_from_indices(&receivers))
            }
            None => Err(DrawError::NoSolutionError {
                participants: problem.len(),
                checked: stats.checked,
            }),
        }
    }
}
