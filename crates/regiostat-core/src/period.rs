//! Period keys: `dd.mm.yyyy` date strings identifying one reporting snapshot.
//!
//! Period keys are compared by calendar date, never by string order
//! (`"01.02.2024"` < `"15.01.2025"` even though `"15" > "01"`).

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTHS: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Parse a `dd.mm.yyyy` period key into a calendar date.
///
/// Day and month may be one or two digits. Returns `None` for anything that
/// does not name a real date (`"31.02.2025"`, `"2025-01-01"`, `""`).
pub fn parse_period(key: &str) -> Option<NaiveDate> {
    let mut parts = key.trim().split('.');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Human label for a period: Russian month name and year ("Январь 2025").
pub fn period_label(date: NaiveDate) -> String {
    format!("{} {}", MONTHS[date.month0() as usize], date.year())
}

/// Chronological comparison of two period keys.
///
/// Keys that do not parse sort after every parseable key and keep their
/// relative order under a stable sort.
pub fn compare_periods(a: &str, b: &str) -> Ordering {
    match (parse_period(a), parse_period(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// One entry of the chronological period picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateOption {
    /// The period key, e.g. `"01.02.2025"`.
    pub value: String,
    pub label: String,
}

impl DateOption {
    /// Build an option from a period key. Unparseable keys use the raw key as label.
    pub fn from_key(key: &str) -> Self {
        let label = parse_period(key)
            .map(period_label)
            .unwrap_or_else(|| key.to_string());
        Self {
            value: key.to_string(),
            label,
        }
    }
}
