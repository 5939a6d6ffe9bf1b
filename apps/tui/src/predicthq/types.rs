use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::domain::{Industry, RadiusUnit};

/// Input of a suggested-radius lookup. Equality and hashing are bitwise on the
/// coordinates so that only the exact same tuple shares a cache entry.
#[derive(Debug, Clone, Copy)]
pub struct RadiusQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub unit: RadiusUnit,
    pub industry: Industry,
}

impl RadiusQuery {
    pub const fn new(latitude: f64, longitude: f64, unit: RadiusUnit) -> Self {
        Self {
            latitude,
            longitude,
            unit,
            industry: Industry::Accommodation,
        }
    }

    #[must_use]
    pub const fn with_industry(mut self, industry: Industry) -> Self {
        self.industry = industry;
        self
    }

    pub fn origin(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    pub fn is_valid(&self) -> bool {
        valid_coordinates(self.latitude, self.longitude)
    }
}

impl PartialEq for RadiusQuery {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
            && self.unit == other.unit
            && self.industry == other.industry
    }
}

impl Eq for RadiusQuery {}

impl Hash for RadiusQuery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
        self.unit.hash(state);
        self.industry.hash(state);
    }
}

pub fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

/// Response of the suggested-radius endpoint. Only `radius` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedRadius {
    pub radius: f64,
    #[serde(default)]
    pub radius_unit: Option<RadiusUnit>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// Area and period the demand signals are requested for.
#[derive(Debug, Clone, Copy)]
pub struct SignalQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub unit: RadiusUnit,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub timezone: Tz,
}

impl SignalQuery {
    pub fn origin(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    pub fn radius_with_unit(&self) -> String {
        format!("{}{}", self.radius, self.unit)
    }

    /// `within` filter of the events endpoints, e.g. `2.5mi@37.78,-122.40`.
    pub fn within(&self) -> String {
        format!("{}@{}", self.radius_with_unit(), self.origin())
    }
}

impl PartialEq for SignalQuery {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
            && self.radius.to_bits() == other.radius.to_bits()
            && self.unit == other.unit
            && self.date_from == other.date_from
            && self.date_to == other.date_to
            && self.timezone.name() == other.timezone.name()
    }
}

impl Eq for SignalQuery {}

impl Hash for SignalQuery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
        self.radius.to_bits().hash(state);
        self.unit.hash(state);
        self.date_from.hash(state);
        self.date_to.hash(state);
        self.timezone.name().hash(state);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCount {
    pub count: u64,
    #[serde(default)]
    pub categories: BTreeMap<String, u64>,
}

/// Predicted attendance of one day, summed over the attended categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAttendance {
    pub date: NaiveDate,
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeaturesResponse {
    #[serde(default)]
    pub results: Vec<FeatureRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureRow {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub features: Map<String, Value>,
}

impl From<FeatureRow> for DailyAttendance {
    fn from(row: FeatureRow) -> Self {
        let by_category: BTreeMap<String, f64> = row
            .features
            .iter()
            .filter_map(|(name, feature)| {
                let category = name.strip_prefix("phq_attendance_")?;
                let sum = feature.pointer("/stats/sum")?.as_f64()?;
                Some((category.replace('_', "-"), sum))
            })
            .collect();

        Self {
            date: row.date,
            total: by_category.values().sum(),
            by_category,
        }
    }
}

/// A day the API flags as having unusually high attended-event demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeDate {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DemandSurgeResponse {
    #[serde(default)]
    pub surge_dates: Vec<SurgeDate>,
}

/// Everything the main panel shows for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandSignals {
    pub event_count: EventCount,
    pub attendance: Vec<DailyAttendance>,
    pub surges: Vec<SurgeDate>,
}

impl DemandSignals {
    pub fn total_attendance(&self) -> f64 {
        self.attendance.iter().map(|day| day.total).sum()
    }

    pub fn peak_day(&self) -> Option<&DailyAttendance> {
        self.attendance
            .iter()
            .max_by(|a, b| a.total.total_cmp(&b.total))
    }
}
