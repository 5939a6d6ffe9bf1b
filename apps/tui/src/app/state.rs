use chrono::Utc;
use color_eyre::Result;
use hotel_demand::catalog::{DEFAULT_LOCATION_INDEX, LOCATIONS};
use hotel_demand::config::AppConfig;
use hotel_demand::docs::{example_body, DirDocStore, CODE_EXAMPLES};
use hotel_demand::predicthq::{EventsApi, PredictHqClient};
use hotel_demand::radius::SuggestedRadiusLookup;
use hotel_demand::selection::SelectionState;
use hotel_demand::sidebar::{render_pass, SidebarModel};
use hotel_demand::signals::{SignalService, SignalsOutcome};
use std::sync::Arc;
use tracing::info;

/// Sidebar control that receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarControl {
    Location,
    DateRange,
    Radius,
    CodeExamples,
}

impl SidebarControl {
    pub const ALL: [Self; 4] = [
        Self::Location,
        Self::DateRange,
        Self::Radius,
        Self::CodeExamples,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Location => "Hotel",
            Self::DateRange => "Date Range",
            Self::Radius => "Radius",
            Self::CodeExamples => "Code examples",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

pub struct App {
    pub running: bool,
    pub selection: SelectionState,
    /// Result of the latest render pass; `None` until the first refresh.
    pub sidebar: Option<SidebarModel>,
    pub signals: Option<SignalsOutcome>,
    pub focus: SidebarControl,
    pub status_message: String,
    pub show_help: bool,
    pub code_example_index: usize,
    pub expanded_example: Option<usize>,
    pub chart_tab_index: usize,
    /// Set by input handlers; the event loop runs the refresh.
    pub refresh_pending: bool,
    docs: DirDocStore,
    radius_lookup: Option<SuggestedRadiusLookup>,
    signal_service: Option<SignalService>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let (radius_lookup, signal_service) = match config.api_token {
            Some(token) => {
                let client = PredictHqClient::new(config.api_base_url, Some(token))?;
                let api: Arc<dyn EventsApi> = Arc::new(client);
                (
                    Some(SuggestedRadiusLookup::new(Arc::clone(&api))),
                    Some(SignalService::new(api)),
                )
            }
            None => (None, None),
        };

        let docs = DirDocStore::new(config.code_examples_dir);

        Ok(Self {
            running: true,
            selection: SelectionState::new(),
            sidebar: None,
            signals: None,
            focus: SidebarControl::Location,
            status_message: String::new(),
            show_help: false,
            code_example_index: 0,
            expanded_example: None,
            chart_tab_index: 0,
            refresh_pending: true,
            docs,
            radius_lookup,
            signal_service,
        })
    }

    pub const fn controls_enabled(&self) -> bool {
        self.radius_lookup.is_some()
    }

    /// Runs one render pass and then loads the demand signals it points at.
    pub async fn refresh(&mut self) {
        let model = render_pass(
            &mut self.selection,
            self.radius_lookup.as_ref(),
            Utc::now(),
        )
        .await;

        let signals = match &self.signal_service {
            Some(service) => service.load(model.signal_query()).await,
            None => SignalsOutcome::Disabled,
        };

        info!(
            location = model.location.id,
            date_range = model.date_range().id,
            radius = model.slider.value,
            "refreshed"
        );

        self.sidebar = Some(model);
        self.signals = Some(signals);
        self.refresh_pending = false;
    }

    pub fn location_index(&self) -> usize {
        self.sidebar
            .as_ref()
            .map_or(DEFAULT_LOCATION_INDEX, |model| model.location_index)
    }

    pub fn select_location_index(&mut self, index: usize) {
        if let Some(location) = LOCATIONS.get(index) {
            self.selection.select_location(location.id);
            self.refresh_pending = true;
        }
    }

    pub fn select_date_range_index(&mut self, index: usize) {
        let id = self
            .sidebar
            .as_ref()
            .and_then(|model| model.date_options.get(index))
            .map(|option| option.id);

        if let Some(id) = id {
            self.selection.select_date_range(id);
            self.refresh_pending = true;
        }
    }

    pub fn step_radius(&mut self, steps: i32) {
        if let Some(value) = self.sidebar.as_ref().map(|model| model.slider.stepped(steps)) {
            self.selection.set_radius(value);
            self.refresh_pending = true;
        }
    }

    pub fn reset_radius(&mut self) {
        self.selection.reset_radius();
        self.refresh_pending = true;
        self.status_message = "Radius reset to suggestion".to_string();
    }

    /// Opens the example under the cursor, or closes it when already open.
    pub fn toggle_code_example(&mut self) {
        self.expanded_example = if self.expanded_example == Some(self.code_example_index) {
            None
        } else {
            Some(self.code_example_index)
        };
    }

    pub fn expanded_example_body(&self) -> Option<(&'static str, String)> {
        let example = CODE_EXAMPLES.get(self.expanded_example?)?;
        Some((example.name, example_body(&self.docs, example)))
    }
}
