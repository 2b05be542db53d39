//! Regional statistics normaliser: raw period blobs → per-region records.
//!
//! Input entries are loosely typed spreadsheet rows. Numbers go through
//! [`safe_parse_int`], invalid regions and dateless periods are dropped, and
//! appeal counts are read from the nested `appeals` object or, for older
//! exports, from the flat legacy topic columns.

use std::collections::BTreeMap;

use regiostat_core::coerce::safe_parse_opt;
use regiostat_core::feed::{self, FieldSpec};
use regiostat_core::{CategoryStats, DeputyCategory, Metric, safe_parse_int};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Normalised statistics for one region in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRegionalData {
    pub region: String,
    pub total_citizens: i64,
    /// Open topic → count map. Topics missing here count as zero.
    pub appeals: BTreeMap<String, i64>,
    /// Always holds all three categories.
    pub data: BTreeMap<DeputyCategory, CategoryStats>,
}

impl ProcessedRegionalData {
    pub fn category(&self, category: DeputyCategory) -> CategoryStats {
        self.data.get(&category).copied().unwrap_or_default()
    }

    pub fn appeal(&self, topic: &str) -> i64 {
        self.appeals.get(topic).copied().unwrap_or(0)
    }
}

/// All valid regions of one reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedStatistics {
    /// Period key in `dd.mm.yyyy` form.
    pub date: String,
    pub statistics_by_region: BTreeMap<String, ProcessedRegionalData>,
}

/// Region name of a raw entry if it names a real region.
///
/// Blank names and the spreadsheet filler `"0"` are rejected.
pub fn region_name(entry: &Value) -> Option<&str> {
    // Surrounding whitespace is stripped, so whitespace-only names count as
    // empty and `" Москва "` keys the same region as `"Москва"`.
    let name = feed::REGION.lookup(entry)?.as_str()?.trim();
    if name.is_empty() || name == "0" {
        None
    } else {
        Some(name)
    }
}

/// Normalise one raw entry, or `None` if its region is invalid.
pub fn normalize_entry(entry: &Value) -> Option<ProcessedRegionalData> {
    let region = region_name(entry)?;

    let data = DeputyCategory::ALL
        .into_iter()
        .map(|category| {
            let field = |metric| int_field(entry, feed::category_field(category, metric));
            let stats = CategoryStats::new(
                field(Metric::Total),
                field(Metric::Interacting),
                field(Metric::Reception),
            );
            (category, stats)
        })
        .collect();

    Some(ProcessedRegionalData {
        region: region.to_string(),
        total_citizens: int_field(entry, &feed::TOTAL_CITIZENS),
        appeals: extract_appeals(entry),
        data,
    })
}

fn int_field(entry: &Value, field: &FieldSpec) -> i64 {
    safe_parse_opt(field.lookup(entry))
}

/// Appeal counts of an entry: the nested object when it is non-empty,
/// otherwise whichever legacy topic columns are present.
fn extract_appeals(entry: &Value) -> BTreeMap<String, i64> {
    if let Some(nested) = entry.get(feed::APPEALS).and_then(Value::as_object)
        && !nested.is_empty()
    {
        return nested
            .iter()
            .map(|(topic, count)| (topic.clone(), safe_parse_int(count)))
            .collect();
    }

    feed::LEGACY_APPEAL_TOPICS
        .iter()
        .filter_map(|(raw_key, topic)| {
            entry
                .get(*raw_key)
                .map(|count| (topic.to_string(), safe_parse_int(count)))
        })
        .collect()
}

/// Normalise one raw period blob `{date, statistics: [...]}`.
///
/// Returns `None` when the period has no usable date or its statistics are
/// not an array. Entries sharing a region name overwrite earlier ones.
pub fn normalize_period(raw: &Value) -> Option<DatedStatistics> {
    let date = match raw.get("date").and_then(Value::as_str).map(str::trim) {
        Some(d) if !d.is_empty() => d,
        _ => {
            debug!("dropping period without a date");
            return None;
        }
    };
    let Some(entries) = raw.get("statistics").and_then(Value::as_array) else {
        debug!(date, "dropping period whose statistics are not an array");
        return None;
    };

    let mut statistics_by_region = BTreeMap::new();
    let mut dropped = 0usize;
    for entry in entries {
        match normalize_entry(entry) {
            Some(record) => {
                if statistics_by_region.contains_key(&record.region) {
                    debug!(date, region = %record.region, "duplicate region in period, keeping the later entry");
                }
                statistics_by_region.insert(record.region.clone(), record);
            }
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(date, dropped, "dropped entries with invalid region names");
    }

    Some(DatedStatistics {
        date: date.to_string(),
        statistics_by_region,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(region: &str, zs_total: Value) -> Value {
        json!({
            "Наименование регионального отделения": region,
            "Депутаты ЗС - всего": zs_total,
            "Депутаты ЗС - взаимодействуют": 8,
            "Депутаты ЗС - ведут прием": "4",
            "Депутаты АЦС - всего": 3,
            "Всего принято граждан": 120,
            "appeals": {"ЖКХ": 5, "Медицина": "2"}
        })
    }

    #[test]
    fn normalizes_all_categories() {
        let record = normalize_entry(&entry("Тверская область", json!(10))).unwrap();
        assert_eq!(record.region, "Тверская область");
        assert_eq!(record.category(DeputyCategory::Zs), CategoryStats::new(10, 8, 4));
        assert_eq!(record.category(DeputyCategory::Acs), CategoryStats::new(3, 0, 0));
        assert_eq!(record.category(DeputyCategory::Omsu), CategoryStats::default());
        assert_eq!(record.data.len(), 3);
        assert_eq!(record.total_citizens, 120);
    }

    #[test]
    fn malformed_total_becomes_zero() {
        let record = normalize_entry(&entry("Тверская область", json!("н/д"))).unwrap();
        assert_eq!(record.category(DeputyCategory::Zs).total, 0);
    }

    #[test]
    fn invalid_region_names_are_dropped() {
        assert!(normalize_entry(&entry("0", json!(1))).is_none());
        assert!(normalize_entry(&entry("", json!(1))).is_none());
        assert!(normalize_entry(&entry("   ", json!(1))).is_none());
        assert!(normalize_entry(&json!({"Наименование регионального отделения": 0})).is_none());
        assert!(normalize_entry(&json!({"Депутаты ЗС - всего": 4})).is_none());
    }

    #[test]
    fn region_names_are_trimmed() {
        let record = normalize_entry(&entry(" Москва \n", json!(1))).unwrap();
        assert_eq!(record.region, "Москва");
        assert_eq!(region_name(&json!({"Наименование регионального отделения": "\t "})), None);
        assert_eq!(region_name(&json!({"Наименование регионального отделения": " 0 "})), None);
    }

    #[test]
    fn total_citizens_legacy_fallback() {
        let raw = json!({
            "Наименование регионального отделения": "Курская область",
            "Принято граждан": "17"
        });
        assert_eq!(normalize_entry(&raw).unwrap().total_citizens, 17);
    }

    #[test]
    fn nested_appeals_are_coerced() {
        let record = normalize_entry(&entry("Тверская область", json!(10))).unwrap();
        assert_eq!(record.appeal("ЖКХ"), 5);
        assert_eq!(record.appeal("Медицина"), 2);
        assert_eq!(record.appeal("Экология"), 0);
    }

    #[test]
    fn legacy_appeals_used_when_nested_empty() {
        let raw = json!({
            "Наименование регионального отделения": "Курская область",
            "appeals": {},
            "Обращения тема - медицина": "4",
            "Обращения тема - ЖКХ": null
        });
        let record = normalize_entry(&raw).unwrap();
        assert_eq!(record.appeals.len(), 2);
        assert_eq!(record.appeal("Медицина и здравоохранение"), 4);
        assert_eq!(record.appeals.get("Жилищно-коммунальное хозяйство"), Some(&0));
        assert!(!record.appeals.contains_key("Экология"));
    }

    #[test]
    fn legacy_ignored_when_nested_present() {
        let raw = json!({
            "Наименование регионального отделения": "Курская область",
            "appeals": {"Экология": 1},
            "Обращения тема - медицина": 4
        });
        let record = normalize_entry(&raw).unwrap();
        assert_eq!(record.appeals.len(), 1);
        assert_eq!(record.appeal("Экология"), 1);
    }

    #[test]
    fn period_without_date_is_dropped() {
        assert!(normalize_period(&json!({"statistics": []})).is_none());
        assert!(normalize_period(&json!({"date": null, "statistics": []})).is_none());
        assert!(normalize_period(&json!({"date": "", "statistics": []})).is_none());
    }

    #[test]
    fn period_without_statistics_array_is_dropped() {
        assert!(normalize_period(&json!({"date": "01.01.2025"})).is_none());
        assert!(normalize_period(&json!({"date": "01.01.2025", "statistics": {}})).is_none());
    }

    #[test]
    fn period_drops_invalid_and_keeps_valid() {
        let raw = json!({
            "date": "01.01.2025",
            "statistics": [entry("0", json!(1)), entry("Тверская область", json!(2)), 5]
        });
        let period = normalize_period(&raw).unwrap();
        assert_eq!(period.date, "01.01.2025");
        assert_eq!(period.statistics_by_region.len(), 1);
        assert!(!period.statistics_by_region.contains_key("0"));
    }

    #[test]
    fn duplicate_region_last_write_wins() {
        let raw = json!({
            "date": "01.01.2025",
            "statistics": [entry("Тверская область", json!(2)), entry("Тверская область", json!(9))]
        });
        let period = normalize_period(&raw).unwrap();
        let record = &period.statistics_by_region["Тверская область"];
        assert_eq!(record.category(DeputyCategory::Zs).total, 9);
    }
}
