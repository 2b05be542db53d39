//! Aggregation over a `(dates × regions × categories)` selection.
//!
//! Head counts (`total`, `interacting`, `reception`) are summed over every
//! selected `(date, category)` pair; `totalCitizens` and appeals are summed
//! over dates only. Summing head counts across several periods produces a
//! number with no meaning (they are point-in-time stock values), so
//! [`summarize`] withholds them whenever more than one period is selected.
//! Appeals and citizens received are flows and are always summed.

use std::collections::{BTreeMap, BTreeSet};

use regiostat_core::{CategoryStats, DeputyCategory, Metric};
use serde::{Deserialize, Serialize};

use crate::regional::ProcessedRegionalData;
use crate::timeseries::ProcessedData;

/// Region label of the record produced by [`aggregate_combined`].
pub const ALL_REGIONS: &str = "Все регионы";

/// The UI selection driving every aggregation.
///
/// `regions` empty means all regions. `categories` is taken literally: an
/// empty set selects no category and yields zero head counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub dates: BTreeSet<String>,
    pub categories: BTreeSet<DeputyCategory>,
    pub regions: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dates.extend(dates.into_iter().map(Into::into));
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = DeputyCategory>) -> Self {
        self.categories.extend(categories);
        self
    }

    pub fn with_all_categories(self) -> Self {
        self.with_categories(DeputyCategory::ALL)
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions.extend(regions.into_iter().map(Into::into));
        self
    }

    /// True when head-count metrics must not be shown.
    pub fn spans_multiple_periods(&self) -> bool {
        self.dates.len() > 1
    }

    /// The selected date when exactly one is selected.
    pub fn single_date(&self) -> Option<&str> {
        match self.dates.len() {
            1 => self.dates.iter().next().map(String::as_str),
            _ => None,
        }
    }
}

/// `round(reception / interacting * 100)`, or 0 when nobody is interacting.
///
/// Clamped to `[0, 100]`.
pub fn engagement_rate(reception: i64, interacting: i64) -> i64 {
    if interacting <= 0 {
        return 0;
    }
    let pct = (reception as f64 / interacting as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as i64
}

/// Aggregated metrics for one region (or for all selected regions combined).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetrics {
    pub region: String,
    pub total: i64,
    pub interacting: i64,
    pub reception: i64,
    pub engagement: i64,
    pub total_citizens: i64,
    /// Per-category sums, one entry per selected category.
    pub by_category: BTreeMap<DeputyCategory, CategoryStats>,
    /// Appeal counts for every catalogue topic, zero where absent.
    pub appeals: BTreeMap<String, i64>,
}

impl AggregatedMetrics {
    fn empty(region: &str, categories: &BTreeSet<DeputyCategory>, topics: &[String]) -> Self {
        Self {
            region: region.to_string(),
            total: 0,
            interacting: 0,
            reception: 0,
            engagement: 0,
            total_citizens: 0,
            by_category: categories
                .iter()
                .map(|c| (*c, CategoryStats::default()))
                .collect(),
            appeals: topics.iter().map(|t| (t.clone(), 0)).collect(),
        }
    }

    fn absorb(&mut self, data: &ProcessedRegionalData) {
        for (category, sums) in self.by_category.iter_mut() {
            let stats = data.category(*category);
            *sums += stats;
            self.total += stats.total;
            self.interacting += stats.interacting;
            self.reception += stats.reception;
        }
        self.total_citizens += data.total_citizens;
        for (topic, count) in &data.appeals {
            *self.appeals.entry(topic.clone()).or_insert(0) += count;
        }
    }

    fn finish(mut self) -> Self {
        self.engagement = engagement_rate(self.reception, self.interacting);
        self
    }

    /// One scalar head-count metric.
    pub fn metric(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Total => self.total,
            Metric::Interacting => self.interacting,
            Metric::Reception => self.reception,
        }
    }

    /// Per-category breakdown of one head-count metric.
    pub fn breakdown(&self, metric: Metric) -> BTreeMap<DeputyCategory, i64> {
        self.by_category
            .iter()
            .map(|(c, stats)| (*c, stats.get(metric)))
            .collect()
    }

    /// Sum of all appeals across topics.
    pub fn appeals_total(&self) -> i64 {
        self.appeals.values().sum()
    }
}

/// Regions a selection covers, in catalogue order. Names absent from the
/// catalogue are ignored.
pub fn selected_regions<'a>(store: &'a ProcessedData, selection: &Selection) -> Vec<&'a str> {
    store
        .region_options()
        .iter()
        .filter(|r| selection.regions.is_empty() || selection.regions.contains(*r))
        .map(String::as_str)
        .collect()
}

fn region_data<'a>(
    store: &'a ProcessedData,
    selection: &'a Selection,
    region: &'a str,
) -> impl Iterator<Item = &'a ProcessedRegionalData> + 'a {
    selection
        .dates
        .iter()
        .filter_map(|date| store.period(date))
        .filter_map(move |period| period.statistics_by_region.get(region))
}

/// Aggregate each selected region separately.
pub fn aggregate(store: &ProcessedData, selection: &Selection) -> Vec<AggregatedMetrics> {
    selected_regions(store, selection)
        .into_iter()
        .map(|region| {
            let mut metrics =
                AggregatedMetrics::empty(region, &selection.categories, store.appeal_topics());
            for data in region_data(store, selection, region) {
                metrics.absorb(data);
            }
            metrics.finish()
        })
        .collect()
}

/// Aggregate all selected regions into one record labelled [`ALL_REGIONS`].
///
/// Engagement is recomputed from the combined sums, not averaged.
pub fn aggregate_combined(store: &ProcessedData, selection: &Selection) -> AggregatedMetrics {
    let mut combined =
        AggregatedMetrics::empty(ALL_REGIONS, &selection.categories, store.appeal_topics());
    for region in selected_regions(store, selection) {
        for data in region_data(store, selection, region) {
            combined.absorb(data);
        }
    }
    combined.finish()
}

/// Head-count block of a summary. Only meaningful for a single period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Headcounts {
    pub total: i64,
    pub interacting: i64,
    pub reception: i64,
    pub engagement: i64,
    pub by_category: BTreeMap<DeputyCategory, CategoryStats>,
}

/// What a summary card shows for a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSummary {
    pub period_count: usize,
    /// `None` when more than one period is selected; callers show a placeholder.
    pub headcounts: Option<Headcounts>,
    pub total_citizens: i64,
    pub appeals: BTreeMap<String, i64>,
}

/// Combined summary with the stock/flow policy applied.
pub fn summarize(store: &ProcessedData, selection: &Selection) -> SelectionSummary {
    let combined = aggregate_combined(store, selection);
    let headcounts = (!selection.spans_multiple_periods()).then(|| Headcounts {
        total: combined.total,
        interacting: combined.interacting,
        reception: combined.reception,
        engagement: combined.engagement,
        by_category: combined.by_category.clone(),
    });
    SelectionSummary {
        period_count: selection.dates.len(),
        headcounts,
        total_citizens: combined.total_citizens,
        appeals: combined.appeals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeseries::normalize_statistics;
    use serde_json::{Value, json};

    fn row(region: &str, zs: [i64; 3], omsu: [i64; 3], citizens: i64, appeals: Value) -> Value {
        json!({
            "Наименование регионального отделения": region,
            "Депутаты ЗС - всего": zs[0],
            "Депутаты ЗС - взаимодействуют": zs[1],
            "Депутаты ЗС - ведут прием": zs[2],
            "Депутаты ОМСУ - всего": omsu[0],
            "Депутаты ОМСУ - взаимодействуют": omsu[1],
            "Депутаты ОМСУ - ведут прием": omsu[2],
            "Всего принято граждан": citizens,
            "appeals": appeals
        })
    }

    fn store() -> ProcessedData {
        normalize_statistics(&json!([
            {"date": "01.01.2025", "statistics": [
                row("X", [10, 8, 4], [100, 50, 20], 30, json!({"ЖКХ": 3})),
                row("Y", [5, 5, 5], [0, 0, 0], 7, json!({"Экология": 1}))
            ]},
            {"date": "01.02.2025", "statistics": [
                row("X", [12, 9, 6], [110, 60, 30], 40, json!({"ЖКХ": 2, "Экология": 4}))
            ]}
        ]))
        .unwrap()
    }

    fn zs_only(dates: &[&str]) -> Selection {
        Selection::new()
            .with_dates(dates.iter().copied())
            .with_categories([DeputyCategory::Zs])
    }

    #[test]
    fn single_region_single_period() {
        let store = store();
        let selection = zs_only(&["01.02.2025"]).with_regions(["X"]);
        let result = aggregate(&store, &selection);
        assert_eq!(result.len(), 1);
        let x = &result[0];
        assert_eq!((x.total, x.interacting, x.reception, x.engagement), (12, 9, 6, 67));
        assert_eq!(x.by_category.len(), 1);
        assert_eq!(x.breakdown(Metric::Reception)[&DeputyCategory::Zs], 6);
    }

    #[test]
    fn earlier_period_engagement() {
        let store = store();
        let result = aggregate(&store, &zs_only(&["01.01.2025"]).with_regions(["X"]));
        let x = &result[0];
        assert_eq!(x.engagement, 50);
    }

    #[test]
    fn categories_sum_into_scalars() {
        let store = store();
        let selection = Selection::new()
            .with_dates(["01.01.2025"])
            .with_all_categories()
            .with_regions(["X"]);
        let result = aggregate(&store, &selection);
        let x = &result[0];
        assert_eq!(x.total, 110);
        assert_eq!(x.interacting, 58);
        assert_eq!(x.reception, 24);
        assert_eq!(x.by_category[&DeputyCategory::Acs], CategoryStats::default());
        assert_eq!(x.by_category[&DeputyCategory::Omsu], CategoryStats::new(100, 50, 20));
    }

    #[test]
    fn empty_region_filter_means_all() {
        let store = store();
        let result = aggregate(&store, &zs_only(&["01.01.2025"]));
        let regions: Vec<&str> = result.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["X", "Y"]);
    }

    #[test]
    fn region_missing_in_period_is_zero() {
        let store = store();
        let result = aggregate(&store, &zs_only(&["01.02.2025"]).with_regions(["Y"]));
        assert_eq!(result[0].total, 0);
        assert_eq!(result[0].engagement, 0);
    }

    #[test]
    fn unknown_regions_and_dates_are_ignored() {
        let store = store();
        let selection = zs_only(&["01.02.2025", "01.01.1990"]).with_regions(["X", "Атлантида"]);
        let result = aggregate(&store, &selection);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].total, 12);
    }

    #[test]
    fn appeals_cover_every_topic() {
        let store = store();
        let result = aggregate(&store, &zs_only(&["01.02.2025"]).with_regions(["Y"]));
        let y = &result[0];
        assert_eq!(y.appeals.len(), 2);
        assert!(y.appeals.values().all(|n| *n == 0));
    }

    #[test]
    fn appeals_and_citizens_sum_across_periods() {
        let store = store();
        let result = aggregate(&store, &zs_only(&["01.01.2025", "01.02.2025"]).with_regions(["X"]));
        let x = &result[0];
        assert_eq!(x.appeals["ЖКХ"], 5);
        assert_eq!(x.appeals["Экология"], 4);
        assert_eq!(x.appeals_total(), 9);
        assert_eq!(x.total_citizens, 70);
    }

    #[test]
    fn citizens_ignore_categories() {
        let store = store();
        let selection = Selection::new().with_dates(["01.01.2025"]).with_regions(["X"]);
        let result = aggregate(&store, &selection);
        let x = &result[0];
        assert_eq!(x.total, 0);
        assert_eq!(x.total_citizens, 30);
    }

    #[test]
    fn combined_recomputes_engagement() {
        let store = store();
        let combined = aggregate_combined(&store, &zs_only(&["01.01.2025"]));
        assert_eq!(combined.region, ALL_REGIONS);
        assert_eq!((combined.total, combined.interacting, combined.reception), (15, 13, 9));
        // 9 / 13 = 69.2%
        assert_eq!(combined.engagement, 69);
        assert_eq!(combined.total_citizens, 37);
    }

    #[test]
    fn summary_withholds_headcounts_for_multiple_periods() {
        let store = store();
        let single = summarize(&store, &zs_only(&["01.02.2025"]));
        assert!(single.headcounts.is_some());

        let multi = summarize(&store, &zs_only(&["01.01.2025", "01.02.2025"]));
        assert_eq!(multi.period_count, 2);
        assert!(multi.headcounts.is_none());
        assert_eq!(multi.appeals["ЖКХ"], 5);
        assert_eq!(multi.total_citizens, 77);
    }

    #[test]
    fn engagement_rate_edges() {
        assert_eq!(engagement_rate(5, 0), 0);
        assert_eq!(engagement_rate(0, 0), 0);
        assert_eq!(engagement_rate(1, 2), 50);
        assert_eq!(engagement_rate(1, 3), 33);
        assert_eq!(engagement_rate(2, 3), 67);
        assert_eq!(engagement_rate(1, 200), 1);
        assert_eq!(engagement_rate(1, 201), 0);
        assert_eq!(engagement_rate(9, 4), 100);
        assert_eq!(engagement_rate(-3, 4), 0);
    }

    #[test]
    fn single_date_helper() {
        assert_eq!(zs_only(&["01.01.2025"]).single_date(), Some("01.01.2025"));
        assert_eq!(zs_only(&[]).single_date(), None);
        assert_eq!(zs_only(&["01.01.2025", "01.02.2025"]).single_date(), None);
    }
}
