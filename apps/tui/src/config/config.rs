use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::predicthq::DEFAULT_BASE_URL;

pub const API_TOKEN_VAR: &str = "PREDICTHQ_API_TOKEN";
const API_URL_VAR: &str = "PREDICTHQ_API_URL";
const CODE_EXAMPLES_DIR_VAR: &str = "CODE_EXAMPLES_DIR";
const LOG_DIR_VAR: &str = "LOG_DIR";
const DEBUG_VAR: &str = "DEBUG";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` disables the interactive controls.
    pub api_token: Option<String>,
    pub api_base_url: String,
    pub code_examples_dir: PathBuf,
    pub log_dir: PathBuf,
    pub debug: bool,
}

impl AppConfig {
    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> color_eyre::eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup(API_TOKEN_VAR).filter(|token| !token.trim().is_empty());

        let api_base_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(eyre!(
                "{API_URL_VAR} must be an HTTP or HTTPS URL, got '{api_base_url}'"
            ));
        }

        let code_examples_dir = lookup(CODE_EXAMPLES_DIR_VAR).map_or_else(
            || PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/docs/code_examples")),
            PathBuf::from,
        );

        let log_dir = lookup(LOG_DIR_VAR).map_or_else(|| PathBuf::from("./logs"), PathBuf::from);

        let debug = lookup(DEBUG_VAR).is_some_and(|value| {
            matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
        });

        Ok(Self {
            api_token,
            api_base_url,
            code_examples_dir,
            log_dir,
            debug,
        })
    }

    pub const fn has_credential(&self) -> bool {
        self.api_token.is_some()
    }
}

/// Initializes the application configuration from `.env` and the environment
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_lookup(|key| env::var(key).ok())
}
