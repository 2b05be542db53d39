//! Period-over-period comparison.
//!
//! Defined only for a single selected period that is not the first one in
//! chronological order. "Previous" is the neighbouring entry in the sorted
//! period list, however far apart the two snapshots are in time.
//!
//! The engagement delta is the difference of the two already-rounded
//! percentages, not a fresh ratio of the head-count deltas. The two can
//! disagree; reports depend on the former.

use std::collections::{BTreeMap, BTreeSet};

use regiostat_core::{CategoryStats, DeputyCategory};
use serde::Serialize;

use crate::aggregate::{AggregatedMetrics, Selection, aggregate, aggregate_combined};
use crate::timeseries::ProcessedData;

/// Signed differences `current − previous` for every aggregated metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDelta {
    pub total: i64,
    pub interacting: i64,
    pub reception: i64,
    pub engagement: i64,
    pub total_citizens: i64,
    pub by_category: BTreeMap<DeputyCategory, CategoryStats>,
    pub appeals: BTreeMap<String, i64>,
}

impl MetricsDelta {
    pub fn between(current: &AggregatedMetrics, previous: &AggregatedMetrics) -> Self {
        let by_category = current
            .by_category
            .iter()
            .map(|(category, now)| {
                let before = previous
                    .by_category
                    .get(category)
                    .copied()
                    .unwrap_or_default();
                (*category, *now - before)
            })
            .collect();

        let topics: BTreeSet<&String> = current
            .appeals
            .keys()
            .chain(previous.appeals.keys())
            .collect();
        let appeals = topics
            .into_iter()
            .map(|topic| {
                let now = current.appeals.get(topic).copied().unwrap_or(0);
                let before = previous.appeals.get(topic).copied().unwrap_or(0);
                (topic.clone(), now - before)
            })
            .collect();

        Self {
            total: current.total - previous.total,
            interacting: current.interacting - previous.interacting,
            reception: current.reception - previous.reception,
            engagement: current.engagement - previous.engagement,
            total_citizens: current.total_citizens - previous.total_citizens,
            by_category,
            appeals,
        }
    }
}

/// Delta for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionDelta {
    pub region: String,
    pub delta: MetricsDelta,
}

/// Comparison of a period against the one before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub current_date: String,
    pub previous_date: String,
    pub combined: MetricsDelta,
    pub regions: Vec<RegionDelta>,
}

/// Compare `selected_date` with its predecessor under the same category and
/// region filters.
///
/// Returns `None` for the first period and for keys not in the store.
pub fn compare(
    store: &ProcessedData,
    selected_date: &str,
    categories: &BTreeSet<DeputyCategory>,
    regions: &BTreeSet<String>,
) -> Option<ComparisonReport> {
    let previous_date = store.previous_date(selected_date)?;

    let filter = |date: &str| Selection {
        dates: BTreeSet::from([date.to_string()]),
        categories: categories.clone(),
        regions: regions.clone(),
    };
    let current = filter(selected_date);
    let previous = filter(previous_date);

    let combined = MetricsDelta::between(
        &aggregate_combined(store, &current),
        &aggregate_combined(store, &previous),
    );

    // Both sides cover the same catalogue regions in the same order.
    let regions = aggregate(store, &current)
        .iter()
        .zip(aggregate(store, &previous).iter())
        .map(|(now, before)| RegionDelta {
            region: now.region.clone(),
            delta: MetricsDelta::between(now, before),
        })
        .collect();

    Some(ComparisonReport {
        current_date: selected_date.to_string(),
        previous_date: previous_date.to_string(),
        combined,
        regions,
    })
}

/// [`compare`] driven by a selection; `None` unless exactly one date is selected.
pub fn compare_selection(store: &ProcessedData, selection: &Selection) -> Option<ComparisonReport> {
    let date = selection.single_date()?;
    compare(store, date, &selection.categories, &selection.regions)
}
