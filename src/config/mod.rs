#[cfg(feature = "cli")]
pub mod cli;
pub mod draw_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use draw_config::{ConfigFormat, DrawConfig};
