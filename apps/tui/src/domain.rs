use serde::{Deserialize, Serialize};

/// Regional measurement convention of a hotel location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Imperial,
    Metric,
}

impl UnitSystem {
    /// The only way a radius unit is chosen: miles for imperial, kilometres otherwise.
    pub const fn radius_unit(self) -> RadiusUnit {
        match self {
            Self::Imperial => RadiusUnit::Mi,
            Self::Metric => RadiusUnit::Km,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusUnit {
    Mi,
    Km,
}

impl RadiusUnit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mi => "mi",
            Self::Km => "km",
        }
    }
}

impl std::fmt::Display for RadiusUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Industry the suggested radius is tailored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    #[default]
    Accommodation,
    Cpg,
    Tourism,
    Marketing,
    Parking,
    Restaurants,
    Retail,
    Transportation,
    Other,
}

impl Industry {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accommodation => "accommodation",
            Self::Cpg => "cpg",
            Self::Tourism => "tourism",
            Self::Marketing => "marketing",
            Self::Parking => "parking",
            Self::Restaurants => "restaurants",
            Self::Retail => "retail",
            Self::Transportation => "transportation",
            Self::Other => "other",
        }
    }
}

/// Attended event categories that drive predicted attendance.
pub const ATTENDED_CATEGORIES: [&str; 7] = [
    "concerts",
    "conferences",
    "expos",
    "festivals",
    "performing-arts",
    "sports",
    "community",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imperial_locations_use_miles() {
        assert_eq!(UnitSystem::Imperial.radius_unit(), RadiusUnit::Mi);
        assert_eq!(UnitSystem::Imperial.radius_unit().as_str(), "mi");
    }

    #[test]
    fn metric_locations_use_kilometers() {
        assert_eq!(UnitSystem::Metric.radius_unit(), RadiusUnit::Km);
        assert_eq!(UnitSystem::Metric.radius_unit().as_str(), "km");
    }

    #[test]
    fn units_serialize_lowercase() {
        assert_eq!(serde_json::to_value(RadiusUnit::Km).ok(), Some(serde_json::json!("km")));
        assert_eq!(
            serde_json::to_value(UnitSystem::Imperial).ok(),
            Some(serde_json::json!("imperial"))
        );
    }

    #[test]
    fn industry_defaults_to_accommodation() {
        assert_eq!(Industry::default().as_str(), "accommodation");
    }
}
