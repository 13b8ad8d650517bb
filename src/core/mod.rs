pub mod exhaustive;
pub mod finder;
pub mod permutation;
pub mod random_retry;

pub use crate::domain::model::{DrawProblem, Solution, Transaction};
pub use crate::domain::ports::{NoProgress, ProgressObserver, SolutionSearch};
pub use crate::utils::error::Result;

use exhaustive::ExhaustiveSearch;
use random_retry::RandomRetrySearch;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Retry random derangements until one fits.
    #[default]
    Random,
    /// Enumerate every permutation.
    Exhaustive,
}

/// Build the strategy selected on the command line.
///
/// `first` only affects the exhaustive strategy and `max_attempts` only the
/// random one.
pub fn build_search(
    kind: StrategyKind,
    seed: u64,
    first: bool,
    max_attempts: Option<u64>,
) -> Box<dyn SolutionSearch> {
    match kind {
        StrategyKind::Random => {
            Box::new(RandomRetrySearch::new(seed).with_max_attempts(max_attempts))
        }
        StrategyKind::Exhaustive if first => Box::new(ExhaustiveSearch::first()),
        StrategyKind::Exhaustive => Box::new(ExhaustiveSearch::uniform(seed)),
    }
}
