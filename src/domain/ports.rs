use crate::domain::model::{DrawProblem, Solution};
use crate::utils::error::Result;

/// A strategy that produces one valid draw for a problem.
///
/// Implementations fail with `NoSolutionError` when they can prove no draw
/// exists, or `RetriesExhaustedError` when they give up without proof.
pub trait SolutionSearch {
    fn name(&self) -> &'static str;

    fn search(
        &mut self,
        problem: &DrawProblem,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Solution>;
}

/// Receives progress from long-running searches.
pub trait ProgressObserver {
    /// `total` is the number of candidates the search will examine, when known.
    fn on_start(&mut self, total: Option<u64>);

    fn on_progress(&mut self, checked: u64);

    fn on_finish(&mut self, checked: u64, valid: u64);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_start(&mut self, _total: Option<u64>) {}

    fn on_progress(&mut self, _checked: u64) {}

    fn on_finish(&mut self, _checked: u64, _valid: u64) {}
}

impl<S: SolutionSearch + ?Sized> SolutionSearch for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn search(
        &mut self,
        problem: &DrawProblem,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Solution> {
        (**self).search(problem, progress)
    }
}
