use crate::domain::model::{DrawProblem, Solution};
use crate::domain::ports::{ProgressObserver, SolutionSearch};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a search strategy against a problem and logs the outcome.
pub struct SolutionFinder<S: SolutionSearch> {
    search: S,
    monitor: SystemMonitor,
}

impl<S: SolutionSearch> SolutionFinder<S> {
    pub fn new(search: S) -> Self {
        Self::new_with_monitoring(search, false)
    }

    pub fn new_with_monitoring(search: S, monitor_enabled: bool) -> Self {
        Self {
            search,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn strategy(&self) -> &'static str {
        self.search.name()
    }

    pub fn run(
        &mut self,
        problem: &DrawProblem,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Solution> {
        tracing::info!(
            "Searching a draw for {} participants ({} forbidden groups, {} forbidden transactions) with {}",
            problem.len(),
            problem.forbidden_groups().len(),
            problem.forbidden_transactions().len(),
            self.search.name()
        );
        self.monitor.log_stats("Search start");

        let result = self.search.search(problem, progress);

        self.monitor.log_final_stats();

        let solution = result?;
        debug_assert!(solution.satisfies(problem));
        tracing::info!("Found a valid draw with {} transactions", solution.len());
        Ok(solution)
    }
}
