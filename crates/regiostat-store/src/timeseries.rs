//! Time-series store: normalised periods in calendar order plus the region,
//! period, and appeal-topic catalogues every consumer filters against.

use std::collections::HashMap;

use regiostat_core::collate::sort_unique;
use regiostat_core::{DateOption, FeedError, compare_periods, parse_period};
use serde::{Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::StoreError;
use crate::regional::{DatedStatistics, normalize_period};

const FEED_NAME: &str = "regional statistics";

/// The assembled time-series store.
///
/// Built once per raw feed and read-only afterwards. Periods are ordered by
/// calendar date; catalogues are deduplicated and collated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedData {
    #[serde(rename = "dataByDate", serialize_with = "periods_by_date")]
    periods: Vec<DatedStatistics>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    region_options: Vec<String>,
    date_options: Vec<DateOption>,
    appeal_topics: Vec<String>,
    #[serde(skip)]
    fingerprint: String,
}

/// `dataByDate` is a map keyed by period date, entries in calendar order.
fn periods_by_date<S: Serializer>(
    periods: &[DatedStatistics],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(periods.iter().map(|p| (&p.date, p)))
}

impl ProcessedData {
    /// Assemble a store from already-normalised periods.
    ///
    /// A later period with the same date key replaces an earlier one.
    pub fn from_periods(
        periods: impl IntoIterator<Item = DatedStatistics>,
        fingerprint: String,
    ) -> Self {
        let mut unique: Vec<DatedStatistics> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for period in periods {
            match seen.get(&period.date) {
                Some(&pos) => {
                    warn!(date = %period.date, "duplicate period key, keeping the later period");
                    unique[pos] = period;
                }
                None => {
                    seen.insert(period.date.clone(), unique.len());
                    unique.push(period);
                }
            }
        }

        unique.sort_by(|a, b| compare_periods(&a.date, &b.date));
        for period in &unique {
            if parse_period(&period.date).is_none() {
                warn!(date = %period.date, "period key is not a dd.mm.yyyy date, ordering it last");
            }
        }

        let index = unique
            .iter()
            .enumerate()
            .map(|(i, p)| (p.date.clone(), i))
            .collect();

        let mut region_options: Vec<String> = unique
            .iter()
            .flat_map(|p| p.statistics_by_region.keys().cloned())
            .collect();
        sort_unique(&mut region_options);

        let mut appeal_topics: Vec<String> = unique
            .iter()
            .flat_map(|p| p.statistics_by_region.values())
            .flat_map(|r| r.appeals.keys().cloned())
            .collect();
        sort_unique(&mut appeal_topics);

        let date_options = unique.iter().map(|p| DateOption::from_key(&p.date)).collect();

        Self {
            periods: unique,
            index,
            region_options,
            date_options,
            appeal_topics,
            fingerprint,
        }
    }

    /// Periods in ascending calendar order.
    pub fn periods(&self) -> &[DatedStatistics] {
        &self.periods
    }

    pub fn period(&self, date: &str) -> Option<&DatedStatistics> {
        self.index.get(date).map(|&i| &self.periods[i])
    }

    /// Position of a period key in chronological order.
    pub fn position(&self, date: &str) -> Option<usize> {
        self.index.get(date).copied()
    }

    /// The period immediately before `date` in chronological order.
    ///
    /// Index-based: the gap in real time between the two periods is irrelevant.
    pub fn previous_date(&self, date: &str) -> Option<&str> {
        let pos = self.position(date)?;
        pos.checked_sub(1).map(|prev| self.periods[prev].date.as_str())
    }

    pub fn latest_date(&self) -> Option<&str> {
        self.periods.last().map(|p| p.date.as_str())
    }

    pub fn region_options(&self) -> &[String] {
        &self.region_options
    }

    pub fn date_options(&self) -> &[DateOption] {
        &self.date_options
    }

    pub fn appeal_topics(&self) -> &[String] {
        &self.appeal_topics
    }

    /// SHA-256 of the raw feed this store was built from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Build the time-series store from the raw regional statistics feed.
///
/// Fails only if the feed is not a JSON array; malformed periods and entries
/// are dropped silently.
pub fn normalize_statistics(raw: &Value) -> Result<ProcessedData, StoreError> {
    let blobs = FeedError::expect_array(FEED_NAME, raw)?;
    let fingerprint = fingerprint(raw)?;

    let periods: Vec<DatedStatistics> = blobs.iter().filter_map(normalize_period).collect();
    let dropped = blobs.len() - periods.len();

    let store = ProcessedData::from_periods(periods, fingerprint);
    info!(
        periods = store.periods.len(),
        dropped,
        regions = store.region_options.len(),
        topics = store.appeal_topics.len(),
        "normalised regional statistics"
    );
    Ok(store)
}

/// Parse and normalise the raw regional statistics feed from its JSON text.
pub fn normalize_statistics_str(json: &str) -> Result<ProcessedData, StoreError> {
    let raw: Value = serde_json::from_str(json).map_err(|source| FeedError::Json {
        feed: FEED_NAME,
        source,
    })?;
    normalize_statistics(&raw)
}

fn fingerprint(raw: &Value) -> Result<String, StoreError> {
    let bytes = serde_json::to_vec(raw)?;
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn period(date: &str, regions: &[(&str, Value)]) -> Value {
        let statistics: Vec<Value> = regions
            .iter()
            .map(|(name, appeals)| {
                json!({
                    "Наименование регионального отделения": name,
                    "Депутаты ЗС - всего": 1,
                    "appeals": appeals
                })
            })
            .collect();
        json!({"date": date, "statistics": statistics})
    }

    fn feed() -> Value {
        json!([
            period(
                "01.02.2025",
                &[("Якутия", json!({"Экология": 1})), ("Адыгея", json!({}))]
            ),
            period("15.01.2025", &[("Ёлкино", json!({"ЖКХ": 2}))]),
            period(
                "01.12.2024",
                &[("Адыгея", json!({"Экология": 3, "Благоустройство": 1}))]
            ),
            {"date": null, "statistics": []},
            {"date": "01.03.2025"}
        ])
    }

    #[test]
    fn periods_sorted_by_calendar_date() {
        let store = normalize_statistics(&feed()).unwrap();
        let keys: Vec<&str> = store.date_options().iter().map(|o| o.value.as_str()).collect();
        assert_eq!(keys, vec!["01.12.2024", "15.01.2025", "01.02.2025"]);
        assert_eq!(store.date_options()[0].label, "Декабрь 2024");
    }

    #[test]
    fn region_catalog_is_union_and_collated() {
        let store = normalize_statistics(&feed()).unwrap();
        assert_eq!(store.region_options(), &["Адыгея", "Ёлкино", "Якутия"]);
    }

    #[test]
    fn topic_catalog_is_union_and_collated() {
        let store = normalize_statistics(&feed()).unwrap();
        assert_eq!(store.appeal_topics(), &["Благоустройство", "ЖКХ", "Экология"]);
    }

    #[test]
    fn zero_region_never_in_catalog() {
        let raw = json!([period("01.01.2025", &[("0", json!({})), ("Тыва", json!({}))])]);
        let store = normalize_statistics(&raw).unwrap();
        assert_eq!(store.region_options(), &["Тыва"]);
    }

    #[test]
    fn previous_date_is_index_based() {
        let store = normalize_statistics(&feed()).unwrap();
        assert_eq!(store.previous_date("01.12.2024"), None);
        assert_eq!(store.previous_date("15.01.2025"), Some("01.12.2024"));
        assert_eq!(store.previous_date("01.02.2025"), Some("15.01.2025"));
        assert_eq!(store.previous_date("01.01.1999"), None);
        assert_eq!(store.latest_date(), Some("01.02.2025"));
    }

    #[test]
    fn duplicate_period_keeps_later() {
        let raw = json!([
            period("01.01.2025", &[("Тыва", json!({}))]),
            period("01.01.2025", &[("Коми", json!({}))])
        ]);
        let store = normalize_statistics(&raw).unwrap();
        assert_eq!(store.periods().len(), 1);
        assert!(store.period("01.01.2025").unwrap().statistics_by_region.contains_key("Коми"));
        // The catalogue is built from surviving periods only.
        assert_eq!(store.region_options(), &["Коми"]);
    }

    #[test]
    fn unparseable_dates_sort_last() {
        let raw = json!([
            period("весна", &[("Тыва", json!({}))]),
            period("01.01.2025", &[("Тыва", json!({}))])
        ]);
        let store = normalize_statistics(&raw).unwrap();
        let keys: Vec<&str> = store.date_options().iter().map(|o| o.value.as_str()).collect();
        assert_eq!(keys, vec!["01.01.2025", "весна"]);
        assert_eq!(store.date_options()[1].label, "весна");
    }

    #[test]
    fn non_array_feed_fails_fast() {
        let err = normalize_statistics(&json!({"date": "01.01.2025"})).unwrap_err();
        assert!(matches!(err, StoreError::Feed(FeedError::NotAnArray { .. })));
    }

    #[test]
    fn invalid_json_text_is_reported() {
        let err = normalize_statistics_str("[{").unwrap_err();
        assert!(matches!(err, StoreError::Feed(FeedError::Json { .. })));
    }

    #[test]
    fn empty_feed_gives_empty_store() {
        let store = normalize_statistics(&json!([])).unwrap();
        assert!(store.is_empty());
        assert!(store.region_options().is_empty());
        assert_eq!(store.latest_date(), None);
    }

    #[test]
    fn fingerprint_tracks_input() {
        let a = normalize_statistics(&feed()).unwrap();
        let b = normalize_statistics(&feed()).unwrap();
        let c = normalize_statistics(&json!([])).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let store = normalize_statistics(&feed()).unwrap();
        let json = serde_json::to_value(&store).unwrap();
        let by_date = json.get("dataByDate").unwrap().as_object().unwrap();
        let keys: Vec<&str> = by_date.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["01.12.2024", "15.01.2025", "01.02.2025"]);
        assert!(json.get("regionOptions").is_some());
        assert!(json.get("appealTopics").is_some());
        let first = &json["dataByDate"]["01.12.2024"];
        assert_eq!(first["date"], "01.12.2024");
        assert_eq!(
            first["statisticsByRegion"]["Адыгея"]["totalCitizens"],
            json!(0)
        );
    }
}
