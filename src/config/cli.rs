use crate::core::StrategyKind;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_positive_number, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const CONFIG_EXTENSIONS: [&str; 3] = ["yml", "yaml", "toml"];

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "gift-draw")]
#[command(about = "Draw who gives a gift to whom, honouring forbidden pairs and groups")]
pub struct CliConfig {
    /// Path to the YAML or TOML configuration file
    #[arg(short, long, default_value = "config.yml")]
    pub config: String,

    /// Seed for the random source; defaults to the current time
    #[arg(long)]
    pub seed: Option<u64>,

    /// Search strategy
    #[arg(long, value_enum, default_value_t = StrategyKind::Random)]
    pub strategy: StrategyKind,

    /// Exhaustive strategy: take the first valid draw instead of a random one
    #[arg(long)]
    pub first: bool,

    /// Random strategy: give up after this many attempts
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// Print the draw as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory use around the search")]
    pub monitor: bool,
}

impl CliConfig {
    /// The explicit seed, or one derived from the wall clock.
    pub fn resolve_seed(&self) -> u64 {
        self.seed
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().unsigned_abs())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config)?;
        validate_file_extension("config", &self.config, &CONFIG_EXTENSIONS)?;

        if let Some(max_attempts) = self.max_attempts {
            validate_positive_number(
                "max_attempts",
                usize::try_from(max_attempts).unwrap_or(usize::MAX),
                1,
            )?;
        }

        Ok(())
    }
}
