use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use super::CatalogEntry;

/// "Next 90 days" is preselected when nothing else is stored.
pub const DEFAULT_DATE_RANGE_INDEX: usize = 2;

const WINDOWS: [(&str, &str, u64); 3] = [
    ("next_7_days", "Next 7 days", 7),
    ("next_30_days", "Next 30 days", 30),
    ("next_90_days", "Next 90 days", 90),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRangeOption {
    pub id: &'static str,
    pub name: &'static str,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl DateRangeOption {
    pub fn format_span(&self) -> String {
        format!(
            "{} → {}",
            self.date_from.format("%Y-%m-%d"),
            self.date_to.format("%Y-%m-%d")
        )
    }
}

impl CatalogEntry for DateRangeOption {
    fn id(&self) -> &str {
        self.id
    }
}

/// Calendar date at `now` as seen from `tz`.
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// The relative windows starting at `today`.
pub fn date_range_options(today: NaiveDate) -> Vec<DateRangeOption> {
    WINDOWS
        .iter()
        .map(|&(id, name, days)| DateRangeOption {
            id,
            name,
            date_from: today,
            date_to: today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_windows_from_today() {
        let options = date_range_options(date(2023, 1, 1));
        let ends: Vec<_> = options.iter().map(|o| o.date_to).collect();
        assert_eq!(ends, vec![date(2023, 1, 8), date(2023, 1, 31), date(2023, 4, 1)]);
        assert!(options.iter().all(|o| o.date_from == date(2023, 1, 1)));
    }

    #[test]
    fn leap_year_ninety_days_ends_in_march() {
        let options = date_range_options(date(2024, 1, 1));
        let ends: Vec<_> = options.iter().map(|o| o.date_to).collect();
        assert_eq!(ends, vec![date(2024, 1, 8), date(2024, 1, 31), date(2024, 3, 31)]);
        assert_eq!((options[2].date_to - options[2].date_from).num_days(), 90);
    }

    #[test]
    fn ids_and_names_are_stable() {
        let options = date_range_options(date(2024, 6, 1));
        let ids: Vec<_> = options.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["next_7_days", "next_30_days", "next_90_days"]);
        assert_eq!(options[DEFAULT_DATE_RANGE_INDEX].name, "Next 90 days");
    }

    #[test]
    fn today_depends_on_timezone() {
        // 2024-01-01 05:00 UTC is still New Year's Eve in California
        // and already the afternoon of Jan 1st in Auckland.
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap();
        assert_eq!(today_in(chrono_tz::America::Los_Angeles, now), date(2023, 12, 31));
        assert_eq!(today_in(chrono_tz::Pacific::Auckland, now), date(2024, 1, 1));
    }
}
