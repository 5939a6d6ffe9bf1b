use chrono_tz::Tz;
use serde::Serialize;

use super::CatalogEntry;
use crate::domain::{RadiusUnit, UnitSystem};

pub const DEFAULT_LOCATION_INDEX: usize = 0;

/// A hotel the dashboard can report on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(serialize_with = "serialize_tz")]
    pub timezone: Tz,
    pub unit_system: UnitSystem,
}

impl Location {
    pub const fn radius_unit(&self) -> RadiusUnit {
        self.unit_system.radius_unit()
    }

    pub fn format_coordinates(&self) -> String {
        format!("{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

impl CatalogEntry for Location {
    fn id(&self) -> &str {
        self.id
    }
}

fn serialize_tz<S: serde::Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tz.name())
}

pub static LOCATIONS: [Location; 9] = [
    Location {
        id: "san-francisco",
        name: "San Francisco, US",
        address: "50 3rd St",
        latitude: 37.78684,
        longitude: -122.40308,
        timezone: chrono_tz::America::Los_Angeles,
        unit_system: UnitSystem::Imperial,
    },
    Location {
        id: "new-york",
        name: "New York, US",
        address: "137 W 111th St",
        latitude: 40.80239,
        longitude: -73.95328,
        timezone: chrono_tz::America::New_York,
        unit_system: UnitSystem::Imperial,
    },
    Location {
        id: "los-angeles",
        name: "Los Angeles, US",
        address: "1707 4th St",
        latitude: 34.01265,
        longitude: -118.48903,
        timezone: chrono_tz::America::Los_Angeles,
        unit_system: UnitSystem::Imperial,
    },
    Location {
        id: "montreal",
        name: "Montreal, CA",
        address: "1659 Sherbrooke St W",
        latitude: 45.49632,
        longitude: -73.58288,
        timezone: chrono_tz::America::Toronto,
        unit_system: UnitSystem::Metric,
    },
    Location {
        id: "liverpool",
        name: "Liverpool, UK",
        address: "95 Anfield Rd",
        latitude: 53.43041,
        longitude: -2.95626,
        timezone: chrono_tz::Europe::London,
        unit_system: UnitSystem::Metric,
    },
    Location {
        id: "paris",
        name: "Paris, FR",
        address: "Puteaux",
        latitude: 48.89391,
        longitude: 2.24893,
        timezone: chrono_tz::Europe::Paris,
        unit_system: UnitSystem::Metric,
    },
    Location {
        id: "hamburg",
        name: "Hamburg, DE",
        address: "Reeperbahn 1a",
        latitude: 53.54960,
        longitude: 9.96762,
        timezone: chrono_tz::Europe::Berlin,
        unit_system: UnitSystem::Metric,
    },
    Location {
        id: "melbourne",
        name: "Melbourne, AU",
        address: "192 Wellington Parade",
        latitude: -37.81566,
        longitude: 144.98318,
        timezone: chrono_tz::Australia::Melbourne,
        unit_system: UnitSystem::Metric,
    },
    Location {
        id: "wellington",
        name: "Wellington, NZ",
        address: "11 Bolton Street",
        latitude: -41.27927,
        longitude: 174.77480,
        timezone: chrono_tz::Pacific::Auckland,
        unit_system: UnitSystem::Metric,
    },
];

pub fn find_location(id: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|location| location.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = LOCATIONS.iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), LOCATIONS.len());
    }

    #[test]
    fn coordinates_are_in_range() {
        for location in &LOCATIONS {
            assert!((-90.0..=90.0).contains(&location.latitude), "{}", location.id);
            assert!((-180.0..=180.0).contains(&location.longitude), "{}", location.id);
        }
    }

    #[test]
    fn find_location_by_id() {
        let montreal = find_location("montreal").map(|l| l.name);
        assert_eq!(montreal, Some("Montreal, CA"));
        assert!(find_location("atlantis").is_none());
    }

    #[test]
    fn first_location_is_san_francisco_in_miles() {
        let first = &LOCATIONS[DEFAULT_LOCATION_INDEX];
        assert_eq!(first.id, "san-francisco");
        assert_eq!(first.radius_unit(), RadiusUnit::Mi);
        assert_eq!(first.timezone.name(), "America/Los_Angeles");
    }
}
