//! Static catalogs the sidebar selects from.

pub mod date_ranges;
pub mod locations;

pub use date_ranges::{date_range_options, today_in, DateRangeOption, DEFAULT_DATE_RANGE_INDEX};
pub use locations::{find_location, Location, DEFAULT_LOCATION_INDEX, LOCATIONS};

/// Anything that can be looked up by a stable string id.
pub trait CatalogEntry {
    fn id(&self) -> &str;
}
