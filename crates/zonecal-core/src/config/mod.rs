use std::path::PathBuf;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_PRODID_COMPANY, DEFAULT_PRODID_LANGUAGE, DEFAULT_PRODID_PRODUCT};
use crate::error::{CoreError, CoreResult};


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub prodid: ProdIdConfig,
    #[serde(default)]
    pub timezones: TimezonesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Product identifier written into the `PRODID` line of rendered calendars.
#[derive(Debug, Clone, Deserialize)]
pub struct ProdIdConfig {
    pub company: String,
    pub product: String,
    pub language: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimezonesConfig {
    /// Directory holding one pre-rendered `<Zone>.ics` VTIMEZONE block per zone.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Destination file; rendered calendars go to stdout when unset.
    pub path: Option<PathBuf>,
}

impl TimezonesConfig {
    /// ## Summary
    /// Returns the file expected to hold the VTIMEZONE block for `tzid`.
    ///
    /// Zone names such as `America/Los_Angeles` map onto nested paths.
    #[must_use]
    pub fn zone_file(&self, tzid: &str) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{tzid}.ics")))
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the result fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("prodid.company", DEFAULT_PRODID_COMPANY)?
            .set_default("prodid.product", DEFAULT_PRODID_PRODUCT)?
            .set_default("prodid.language", DEFAULT_PRODID_LANGUAGE)?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        tracing::debug!(level = %settings.logging.level, "Settings loaded");
        Ok(settings)
    }

    /// ## Summary
    /// Checks values that deserialize fine but cannot produce a valid calendar.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if a product identifier part is blank.
    pub fn validate(&self) -> CoreResult<()> {
        let parts = [
            ("prodid.company", &self.prodid.company),
            ("prodid.product", &self.prodid.product),
            ("prodid.language", &self.prodid.language),
        ];

        for (key, value) in parts {
            if value.trim().is_empty() {
                return Err(CoreError::ConfigError(format!("`{key}` must not be empty")));
            }
        }

        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
