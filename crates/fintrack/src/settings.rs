//! Handles settings for the application.
//!
//! Sources, lowest priority first: built-in defaults, the TOML file
//! (`config/fintrack.toml` unless `--config` says otherwise, optional),
//! `FINTRACK_*` environment variables, command line flags.

use config::{Config, ConfigBuilder, builder::DefaultState};
use ledger::{Currency, InvalidRecordPolicy};
use serde::Deserialize;

use crate::{
    cli::Cli,
    error::{AppError, Result},
};

const DEFAULT_CONFIG_PATH: &str = "config/fintrack";
const ENV_PREFIX: &str = "FINTRACK";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for the fintrack and ledger targets.
    pub level: String,
    pub policy: InvalidRecordPolicy,
    pub currency: Currency,
    /// Days before today covered by the default dashboard window.
    pub window_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            policy: InvalidRecordPolicy::Reject,
            currency: Currency::Usd,
            window_days: 30,
        }
    }
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self> {
        let path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let builder = Config::builder()
            .add_source(config::File::with_name(path).required(cli.config.is_some()))
            .add_source(environment());
        let mut settings = Self::from_builder(builder)?;
        settings.apply_overrides(cli.policy.as_deref(), cli.currency.as_deref())?;
        Ok(settings)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }

    fn apply_overrides(&mut self, policy: Option<&str>, currency: Option<&str>) -> Result<()> {
        if let Some(policy) = policy {
            self.policy = InvalidRecordPolicy::try_from(policy).map_err(AppError::Setting)?;
        }
        if let Some(currency) = currency {
            self.currency =
                Currency::try_from(currency).map_err(|err| AppError::Setting(err.to_string()))?;
        }
        Ok(())
    }
}

/// `FINTRACK_POLICY`, `FINTRACK_WINDOW_DAYS`, ...
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
}
