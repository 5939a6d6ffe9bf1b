mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use hotel_demand::config::init_app_config;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    args.apply_env_overrides();

    // Setup error handling
    color_eyre::install()?;

    let config = init_app_config()?;
    let _log_guard = logging::init_logging(&config.log_dir, config.debug)?;
    info!(
        base_url = %config.api_base_url,
        credential = config.has_credential(),
        docs = %config.code_examples_dir.display(),
        "starting"
    );

    let mut app = App::new(config)?;
    apply_selection_args(&mut app, &args);

    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json).await;
    }

    if !app.controls_enabled() {
        warn!("no API token, controls disabled");
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

/// Seeds the session selection from `--location`, `--date-range` and `--radius`.
/// Unknown ids are kept and fall back to the defaults on the first render pass.
fn apply_selection_args(app: &mut App, args: &CliArgs) {
    if let Some(location) = &args.location {
        app.selection.select_location(location);
    }
    if let Some(range) = &args.date_range {
        app.selection.select_date_range(range);
    }
    if let Some(radius) = args.radius {
        app.selection.set_radius(radius);
    }
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
