//! Shared configuration for the reelpulse workspace.

mod app_config;
mod config;
pub mod wire;

pub use app_config::{AppConfig, Environment, OpenAiSettings, PollIntervals};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
