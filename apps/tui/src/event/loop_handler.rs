use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use hotel_demand::radius::RadiusOutcome;
use hotel_demand::signals::SignalsOutcome;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;
use tracing::warn;

use crate::app::{handle_input, App};
use crate::ui;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RefreshState {
    Idle,
    Fetching,
    Ready,
    Failed,
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Fetching => write!(f, "Fetching"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Clone, Debug)]
enum RefreshEvent {
    Start,
    Loaded(String),
    Failed(String),
    Reset,
}

impl RefreshEvent {
    /// Event describing how the last refresh ended. A failed radius lookup
    /// fails the refresh even when the signals loaded at the default radius.
    fn from_outcome(signals: Option<&SignalsOutcome>, radius: Option<&RadiusOutcome>) -> Self {
        let summary = match signals {
            Some(SignalsOutcome::Loaded(signals)) => format!(
                "{} events, {} surge days",
                signals.event_count.count,
                signals.surges.len()
            ),
            Some(SignalsOutcome::Unavailable(message)) => return Self::Failed(message.clone()),
            Some(SignalsOutcome::NoArea) => "No area selected (radius is 0)".to_string(),
            Some(SignalsOutcome::Disabled) | None => "Showing defaults (no API token)".to_string(),
        };

        match radius.and_then(RadiusOutcome::notice) {
            Some(notice) => Self::Failed(format!("{notice} ({summary})")),
            None => Self::Loaded(summary),
        }
    }
}

impl fmt::Display for RefreshEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Loaded(summary) => write!(f, "Loaded({summary})"),
            Self::Failed(msg) => write!(f, "Failed({msg})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: RefreshState,
    event: RefreshEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

/// Tracks one refresh from key press to status line.
struct RefreshMachine {
    state: RefreshState,
}

impl RefreshMachine {
    const fn new(initial_state: RefreshState) -> Self {
        Self {
            state: initial_state,
        }
    }

    const fn state(&self) -> RefreshState {
        self.state
    }

    fn process_event(
        &mut self,
        event: &RefreshEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        self.state = next_state.0;
        Ok(())
    }
}

struct NextState(RefreshState);

impl TryFrom<(RefreshState, &RefreshEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (RefreshState, &RefreshEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (RefreshState::Idle, RefreshEvent::Start) => {
                app.status_message = "Fetching demand data...".to_string();
                Ok(Self(RefreshState::Fetching))
            }
            (RefreshState::Fetching, RefreshEvent::Loaded(summary)) => {
                let location = app
                    .sidebar
                    .as_ref()
                    .map_or("", |model| model.location.name);
                app.status_message = format!("{location}: {summary}");
                Ok(Self(RefreshState::Ready))
            }
            (RefreshState::Fetching, RefreshEvent::Failed(message)) => {
                app.status_message = format!("Error: {message}");
                Ok(Self(RefreshState::Failed))
            }
            (RefreshState::Ready | RefreshState::Failed, RefreshEvent::Reset) => {
                Ok(Self(RefreshState::Idle))
            }
            _ => Err(StateTransitionError {
                from: current_state,
                event: event.clone(),
            }),
        }
    }
}

/// Run one render pass for the configured selection and print it (no UI)
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.refresh().await;

    let report = build_headless_report(app)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_headless_report(&report);
    }

    Ok(())
}

fn print_headless_report(report: &HeadlessReport) {
    println!("\nHotel Demand");
    println!("============");
    println!("Hotel: {} ({})", report.location.name, report.location.id);
    println!("Address: {}", report.location.address);
    println!("Coordinates: {}", report.location.coordinates);
    println!(
        "Date range: {} ({} → {})",
        report.date_range.name, report.date_range.date_from, report.date_range.date_to
    );
    println!("Radius: {:.1} {}", report.radius.value, report.radius.unit);

    match report.radius.suggested {
        Some(suggested) if report.radius.clamped => {
            println!("Suggested radius: {suggested:.2} (outside slider range, clamped)");
        }
        Some(suggested) => println!("Suggested radius: {suggested:.2}"),
        None => println!("Suggested radius: unavailable"),
    }

    if let Some(notice) = &report.notice {
        println!("Notice: {notice}");
    }

    println!();
    match &report.signals {
        SignalsOutcome::Loaded(signals) => {
            println!("Events: {}", signals.event_count.count);
            for (category, count) in &signals.event_count.categories {
                println!("- {category}: {count}");
            }
            println!(
                "Predicted attendance: {:.0}",
                signals.total_attendance()
            );
            if let Some(peak) = signals.peak_day() {
                println!("Peak day: {} ({:.0})", peak.date, peak.total);
            }
            println!("Surge days: {}", signals.surges.len());
            for surge in &signals.surges {
                println!("- {}", surge.date);
            }
        }
        SignalsOutcome::Unavailable(message) => println!("Demand signals unavailable: {message}"),
        SignalsOutcome::NoArea => println!("Demand signals: no area selected (radius is 0)"),
        SignalsOutcome::Disabled => println!("Demand signals disabled"),
    }
}

fn build_headless_report(app: &App) -> Result<HeadlessReport> {
    let model = app
        .sidebar
        .as_ref()
        .ok_or_else(|| color_eyre::eyre::eyre!("Sidebar was not composed"))?;
    let range = model.date_range();

    Ok(HeadlessReport {
        controls_enabled: model.enabled,
        location: HeadlessLocation {
            id: model.location.id,
            name: model.location.name,
            address: model.location.address,
            coordinates: model.location.format_coordinates(),
            timezone: model.location.timezone.name(),
        },
        date_range: HeadlessDateRange {
            id: range.id,
            name: range.name,
            date_from: range.date_from.to_string(),
            date_to: range.date_to.to_string(),
        },
        radius: HeadlessRadius {
            value: model.slider.value,
            unit: model.radius_unit.as_str(),
            suggested: model.slider.suggested,
            clamped: model.slider.is_suggestion_clamped(),
        },
        notice: model.notice.clone(),
        signals: app.signals.clone().unwrap_or(SignalsOutcome::Disabled),
    })
}

#[derive(Serialize)]
struct HeadlessReport {
    controls_enabled: bool,
    location: HeadlessLocation,
    date_range: HeadlessDateRange,
    radius: HeadlessRadius,
    notice: Option<String>,
    signals: SignalsOutcome,
}

#[derive(Serialize)]
struct HeadlessLocation {
    id: &'static str,
    name: &'static str,
    address: &'static str,
    coordinates: String,
    timezone: &'static str,
}

#[derive(Serialize)]
struct HeadlessDateRange {
    id: &'static str,
    name: &'static str,
    date_from: String,
    date_to: String,
}

#[derive(Serialize)]
struct HeadlessRadius {
    value: f64,
    unit: &'static str,
    suggested: Option<f64>,
    clamped: bool,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut refresh_machine = RefreshMachine::new(RefreshState::Idle);

    loop {
        if app.refresh_pending && refresh_machine.state() == RefreshState::Idle {
            if let Err(e) = refresh_machine.process_event(&RefreshEvent::Start, app) {
                warn!(error = %e, "refresh not started");
                app.refresh_pending = false;
                continue;
            }

            // Show the fetching status before the lookups block the loop
            if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
                return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
            }

            app.refresh().await;

            let finished = RefreshEvent::from_outcome(
                app.signals.as_ref(),
                app.selection.suggested_radius.as_ref(),
            );
            if let Err(e) = refresh_machine.process_event(&finished, app) {
                warn!(error = %e, "refresh outcome dropped");
            }
            if let Err(e) = refresh_machine.process_event(&RefreshEvent::Reset, app) {
                warn!(error = %e, "refresh machine not reset");
            }
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Redrawn on the next iteration
                }
                Ok(_) | Err(_) => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::disabled_config;
    use hotel_demand::predicthq::{DemandSignals, EventCount};

    fn loaded(count: u64) -> SignalsOutcome {
        SignalsOutcome::Loaded(DemandSignals {
            event_count: EventCount {
                count,
                ..EventCount::default()
            },
            attendance: Vec::new(),
            surges: Vec::new(),
        })
    }

    #[tokio::test]
    async fn headless_report_without_token() -> Result<()> {
        let mut app = App::new(disabled_config())?;
        app.selection.select_location("paris");
        app.selection.set_radius(3.0);
        app.refresh().await;

        let report = build_headless_report(&app)?;
        assert!(!report.controls_enabled);
        assert_eq!(report.location.id, "paris");
        assert_eq!(report.location.timezone, "Europe/Paris");
        assert_eq!(report.radius.unit, "km");
        assert!((report.radius.value - 3.0).abs() < f64::EPSILON);
        assert_eq!(report.date_range.id, "next_90_days");

        let json = serde_json::to_value(&report)?;
        assert_eq!(json["signals"]["status"], "disabled");
        Ok(())
    }

    #[test]
    fn headless_report_needs_a_render_pass() -> Result<()> {
        let app = App::new(disabled_config())?;
        assert!(build_headless_report(&app).is_err());
        Ok(())
    }

    #[test]
    fn refresh_machine_walks_through_states() -> Result<()> {
        let mut app = App::new(disabled_config())?;
        let mut machine = RefreshMachine::new(RefreshState::Idle);

        machine.process_event(&RefreshEvent::Start, &mut app)?;
        assert_eq!(machine.state(), RefreshState::Fetching);
        assert!(app.status_message.contains("Fetching"));

        machine.process_event(&RefreshEvent::Failed("HTTP 503".to_string()), &mut app)?;
        assert_eq!(machine.state(), RefreshState::Failed);
        assert_eq!(app.status_message, "Error: HTTP 503");

        machine.process_event(&RefreshEvent::Reset, &mut app)?;
        assert_eq!(machine.state(), RefreshState::Idle);
        Ok(())
    }

    #[test]
    fn failed_radius_lookup_fails_the_refresh() -> Result<()> {
        let signals = loaded(12);
        let radius = RadiusOutcome::Unavailable("PredictHQ request failed (HTTP 503).".to_string());

        let event = RefreshEvent::from_outcome(Some(&signals), Some(&radius));
        let RefreshEvent::Failed(message) = &event else {
            panic!("expected a failure, got {event}");
        };
        assert!(message.contains("HTTP 503"));
        assert!(message.contains("12 events"));

        let mut app = App::new(disabled_config())?;
        let mut machine = RefreshMachine::new(RefreshState::Idle);
        machine.process_event(&RefreshEvent::Start, &mut app)?;
        machine.process_event(&event, &mut app)?;
        assert_eq!(machine.state(), RefreshState::Failed);
        assert!(app.status_message.starts_with("Error: PredictHQ request failed"));
        Ok(())
    }

    #[test]
    fn refresh_summaries_without_radius_failure() {
        let event = RefreshEvent::from_outcome(Some(&loaded(3)), Some(&RadiusOutcome::Disabled));
        assert!(matches!(&event, RefreshEvent::Loaded(summary) if summary == "3 events, 0 surge days"));

        let event = RefreshEvent::from_outcome(Some(&SignalsOutcome::NoArea), None);
        assert!(matches!(&event, RefreshEvent::Loaded(summary) if summary.contains("No area")));

        let unavailable = SignalsOutcome::Unavailable("Unable to reach PredictHQ.".to_string());
        let event = RefreshEvent::from_outcome(Some(&unavailable), None);
        assert!(matches!(&event, RefreshEvent::Failed(message) if message == "Unable to reach PredictHQ."));
    }

    #[test]
    fn reset_from_idle_is_rejected() -> Result<()> {
        let mut app = App::new(disabled_config())?;
        let mut machine = RefreshMachine::new(RefreshState::Idle);
        assert!(machine.process_event(&RefreshEvent::Reset, &mut app).is_err());
        assert_eq!(machine.state(), RefreshState::Idle);
        Ok(())
    }
}
