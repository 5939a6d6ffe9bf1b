use clap::Parser;
use hotel_demand::config::API_TOKEN_VAR;

#[derive(Debug, Parser)]
#[command(
    name = "hotel-demand",
    version,
    about = "Event-driven hotel demand dashboard"
)]
pub struct CliArgs {
    /// Print the current selection and demand signals, then exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// PredictHQ API access token
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Override the PredictHQ API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the code example directory
    #[arg(long = "docs-dir", value_name = "PATH")]
    pub docs_dir: Option<String>,

    /// Override the log directory
    #[arg(long = "log-dir", value_name = "PATH")]
    pub log_dir: Option<String>,

    /// Hotel id to select (e.g. "paris")
    #[arg(long, value_name = "ID")]
    pub location: Option<String>,

    /// Date range id to select (e.g. "next_30_days")
    #[arg(long = "date-range", value_name = "ID")]
    pub date_range: Option<String>,

    /// Manual radius, clamped to 0.0..=10.0
    #[arg(long, value_name = "RADIUS")]
    pub radius: Option<f64>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(token) = &self.token {
            std::env::set_var(API_TOKEN_VAR, token);
        }
        if let Some(url) = &self.api_url {
            std::env::set_var("PREDICTHQ_API_URL", url);
        }
        if let Some(dir) = &self.docs_dir {
            std::env::set_var("CODE_EXAMPLES_DIR", dir);
        }
        if let Some(dir) = &self.log_dir {
            std::env::set_var("LOG_DIR", dir);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
