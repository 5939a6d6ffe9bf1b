//! Composition of the sidebar controls for one render pass.
//!
//! The pass resolves the stored selections against the catalogs, derives the
//! radius unit, asks the suggested-radius lookup (which does its own caching)
//! and settles the slider value. Drawing is left to the terminal UI; this
//! module only produces the [`SidebarModel`] it draws.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::cache::MemoCache;
use crate::catalog::{
    date_range_options, today_in, DateRangeOption, Location, DEFAULT_DATE_RANGE_INDEX,
    DEFAULT_LOCATION_INDEX, LOCATIONS,
};
use crate::config::API_TOKEN_VAR;
use crate::domain::{Industry, RadiusUnit};
use crate::predicthq::{RadiusQuery, SignalQuery, SuggestedRadius};
use crate::radius::{RadiusOutcome, SuggestedRadiusLookup};
use crate::selection::{resolve_index, SelectionState};

pub const RADIUS_MIN: f64 = 0.0;
pub const RADIUS_MAX: f64 = 10.0;
pub const RADIUS_STEP: f64 = 0.1;
/// Slider value when no suggestion is available.
pub const DEFAULT_RADIUS: f64 = 2.0;

const STEPS_PER_UNIT: f64 = 10.0;

/// Keeps a radius inside the slider bounds. Non-finite input becomes the default.
pub fn clamp_radius(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(RADIUS_MIN, RADIUS_MAX)
    } else {
        DEFAULT_RADIUS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
    pub unit: RadiusUnit,
    /// Suggestion as returned by the API, before clamping.
    pub suggested: Option<f64>,
}

impl RadiusSlider {
    pub fn new(value: f64, unit: RadiusUnit, suggested: Option<f64>) -> Self {
        Self {
            min: RADIUS_MIN,
            max: RADIUS_MAX,
            step: RADIUS_STEP,
            value: clamp_radius(value),
            unit,
            suggested,
        }
    }

    /// Value `steps` ticks away, snapped to the 0.1 grid and clamped.
    pub fn stepped(&self, steps: i32) -> f64 {
        let ticks = (self.value * STEPS_PER_UNIT).round() + f64::from(steps);
        clamp_radius(ticks / STEPS_PER_UNIT)
    }

    pub fn ratio(&self) -> f64 {
        ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    pub fn label(&self) -> String {
        format!("Suggested Radius around hotel ({})", self.unit)
    }

    pub fn is_suggestion_clamped(&self) -> bool {
        self.suggested
            .is_some_and(|suggested| !(self.min..=self.max).contains(&suggested))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SidebarModel {
    /// False when no API credential is configured.
    pub enabled: bool,
    pub location_index: usize,
    pub location: &'static Location,
    pub date_options: Vec<DateRangeOption>,
    pub date_range_index: usize,
    pub radius_unit: RadiusUnit,
    pub slider: RadiusSlider,
    pub notice: Option<String>,
}

impl SidebarModel {
    pub fn date_range(&self) -> &DateRangeOption {
        &self.date_options[self.date_range_index]
    }

    pub fn signal_query(&self) -> SignalQuery {
        let range = self.date_range();
        SignalQuery {
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            radius: self.slider.value,
            unit: self.radius_unit,
            date_from: range.date_from,
            date_to: range.date_to,
            timezone: self.location.timezone,
        }
    }
}

/// Catalog positions for the current selection, before any lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub location_index: usize,
    pub location: &'static Location,
    pub date_options: Vec<DateRangeOption>,
    pub date_range_index: usize,
    pub radius_unit: RadiusUnit,
}

/// Resolves stored ids against the catalogs at `now`. Pure.
pub fn reconcile(state: &SelectionState, now: DateTime<Utc>) -> Reconciled {
    let location_index = resolve_index(
        &LOCATIONS,
        state.location_id.as_deref(),
        DEFAULT_LOCATION_INDEX,
    );
    let location = &LOCATIONS[location_index];

    let date_options = date_range_options(today_in(location.timezone, now));
    let date_range_index = resolve_index(
        &date_options,
        state.date_range_id.as_deref(),
        DEFAULT_DATE_RANGE_INDEX,
    );

    Reconciled {
        location_index,
        location,
        date_options,
        date_range_index,
        radius_unit: location.radius_unit(),
    }
}

/// One render pass: reconcile, write the resolved ids back, look up the
/// suggested radius when a lookup is available and settle the slider.
pub async fn render_pass<C>(
    state: &mut SelectionState,
    lookup: Option<&SuggestedRadiusLookup<C>>,
    now: DateTime<Utc>,
) -> SidebarModel
where
    C: MemoCache<RadiusQuery, SuggestedRadius>,
{
    let reconciled = reconcile(state, now);
    let location = reconciled.location;

    state.location_id = Some(location.id.to_string());
    state.date_range_id = Some(reconciled.date_options[reconciled.date_range_index].id.to_string());

    let outcome = match lookup {
        Some(lookup) => RadiusOutcome::from_result(
            lookup
                .lookup(
                    location.latitude,
                    location.longitude,
                    reconciled.radius_unit,
                    Industry::Accommodation,
                )
                .await,
        ),
        None => RadiusOutcome::Disabled,
    };

    let suggested = outcome.radius();
    let value = state
        .radius
        .unwrap_or_else(|| suggested.unwrap_or(DEFAULT_RADIUS));
    let slider = RadiusSlider::new(value, reconciled.radius_unit, suggested);

    let notice = match &outcome {
        RadiusOutcome::Disabled => Some(format!("Set {API_TOKEN_VAR} to enable live data.")),
        RadiusOutcome::Unavailable(message) => {
            Some(format!("{message} Using default radius {DEFAULT_RADIUS:.1}."))
        }
        RadiusOutcome::Suggested(_) => None,
    };

    debug!(
        location = location.id,
        unit = %reconciled.radius_unit,
        radius = slider.value,
        "sidebar composed"
    );

    state.suggested_radius = Some(outcome);

    SidebarModel {
        enabled: lookup.is_some(),
        location_index: reconciled.location_index,
        location,
        date_options: reconciled.date_options,
        date_range_index: reconciled.date_range_index,
        radius_unit: reconciled.radius_unit,
        slider,
        notice,
    }
}
