#[allow(clippy::module_inception)]
mod config;

pub use config::{init_app_config, AppConfig, API_TOKEN_VAR};
