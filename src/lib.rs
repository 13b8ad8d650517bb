pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::DrawConfig;
pub use core::{
    build_search, exhaustive::ExhaustiveSearch, finder::SolutionFinder,
    random_retry::RandomRetrySearch, StrategyKind,
};
pub use domain::model::{DrawProblem, Solution, Transaction};
pub use domain::ports::{NoProgress, ProgressObserver, SolutionSearch};
pub use utils::error::{DrawError, Result};
