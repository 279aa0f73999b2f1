use std::path::Path;

use catalog_core::DEFAULT_PAGE_SIZE;
use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "CATALOG_";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub page_size: u32,
    pub log_level: String,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: Self::API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: Self::LOG_LEVEL.to_string(),
            color: true,
        }
    }
}

impl Config {
    const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    const LOG_LEVEL: &str = "warn";
    const API_URL: &str = "http://127.0.0.1:3000";

    /// Defaults, overridden by the JSON file at `path` (if it exists), then
    /// by `CATALOG_*` environment variables.
    ///
    /// Returns the config together with warnings about values that were
    /// replaced by defaults; logging is not up yet when this runs.
    pub fn load(path: &Path) -> Result<(Self, Vec<String>), figment::Error> {
        let mut config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Json::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        let warnings = config.ensure_valid();
        Ok((config, warnings))
    }

    fn ensure_valid(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        let original = self.log_level.clone();
        self.log_level = self.log_level.trim().to_ascii_lowercase();
        if !Self::LOG_LEVELS.contains(&self.log_level.as_str()) {
            warnings.push(format!(
                "log level '{original}' is invalid - using default of '{}'",
                Self::LOG_LEVEL
            ));
            self.log_level = Self::LOG_LEVEL.to_owned();
        }

        if self.page_size == 0 {
            warnings.push(format!(
                "page size 0 is invalid - using default of {DEFAULT_PAGE_SIZE}"
            ));
            self.page_size = DEFAULT_PAGE_SIZE;
        }

        let trimmed = self.api_url.trim();
        if trimmed.is_empty() {
            warnings.push(format!(
                "api url is empty - using default of '{}'",
                Self::API_URL
            ));
            self.api_url = Self::API_URL.to_owned();
        } else if trimmed.len() != self.api_url.len() {
            self.api_url = trimmed.to_owned();
        }

        warnings
    }
}
