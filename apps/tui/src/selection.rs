//! Session selections and their reconciliation against the catalogs.

use serde::Serialize;

use crate::catalog::CatalogEntry;
use crate::radius::RadiusOutcome;
use crate::sidebar::clamp_radius;

/// Index of the entry whose id equals `stored_id`, or `fallback_index` when
/// there is no stored id or it no longer exists in the catalog. A fallback
/// past the end is clamped to the last entry; an empty catalog yields 0.
pub fn resolve_index<T: CatalogEntry>(
    catalog: &[T],
    stored_id: Option<&str>,
    fallback_index: usize,
) -> usize {
    stored_id
        .and_then(|id| catalog.iter().position(|entry| entry.id() == id))
        .unwrap_or_else(|| fallback_index.min(catalog.len().saturating_sub(1)))
}

/// What the user has picked during this session. Ids are stored rather than
/// indices so that a selection survives the date catalog being rebuilt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    pub location_id: Option<String>,
    pub date_range_id: Option<String>,
    /// Manual slider value, `None` while the suggestion (or default) applies.
    pub radius: Option<f64>,
    pub suggested_radius: Option<RadiusOutcome>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switching location drops any manual radius, since the unit may change.
    pub fn select_location(&mut self, id: &str) {
        if self.location_id.as_deref() != Some(id) {
            self.location_id = Some(id.to_string());
            self.radius = None;
        }
    }

    pub fn select_date_range(&mut self, id: &str) {
        self.date_range_id = Some(id.to_string());
    }

    pub fn set_radius(&mut self, value: f64) {
        self.radius = Some(clamp_radius(value));
    }

    pub fn reset_radius(&mut self) {
        self.radius = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{date_range_options, LOCATIONS};
    use chrono::NaiveDate;

    #[test]
    fn unknown_ids_fall_back() {
        for stored in [None, Some("atlantis"), Some(""), Some("SAN-FRANCISCO")] {
            assert_eq!(resolve_index(&LOCATIONS, stored, 0), 0, "{stored:?}");
        }
    }

    #[test]
    fn known_ids_resolve_exactly() {
        for (index, location) in LOCATIONS.iter().enumerate() {
            assert_eq!(resolve_index(&LOCATIONS, Some(location.id), 0), index);
        }
    }

    #[test]
    fn date_range_defaults_to_ninety_days() {
        let options = date_range_options(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let index = resolve_index(&options, Some("next_365_days"), 2);
        assert_eq!(options[index].id, "next_90_days");
        assert_eq!(resolve_index(&options, Some("next_7_days"), 2), 0);
    }

    #[test]
    fn fallback_is_clamped_to_catalog() {
        let options = date_range_options(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(resolve_index(&options, None, 10), 2);
        assert_eq!(resolve_index(&options[..0], None, 2), 0);
    }

    #[test]
    fn changing_location_clears_manual_radius() {
        let mut state = SelectionState::new();
        state.select_location("paris");
        state.set_radius(4.2);

        state.select_location("paris");
        assert_eq!(state.radius, Some(4.2));

        state.select_location("hamburg");
        assert_eq!(state.radius, None);
    }

    #[test]
    fn manual_radius_is_clamped() {
        let mut state = SelectionState::new();
        state.set_radius(12.0);
        assert_eq!(state.radius, Some(10.0));
        state.set_radius(-1.0);
        assert_eq!(state.radius, Some(0.0));
    }
}
