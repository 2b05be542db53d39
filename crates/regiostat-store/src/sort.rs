//! Ordering and free-text search over aggregated per-region records.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use regiostat_core::collate;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedMetrics;
use crate::compare::RegionDelta;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Total,
    Interacting,
    Reception,
    Engagement,
    TotalCitizens,
    Region,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Interacting => "interacting",
            Self::Reception => "reception",
            Self::Engagement => "engagement",
            Self::TotalCitizens => "totalCitizens",
            Self::Region => "region",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0:?}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "total" => Ok(Self::Total),
            "interacting" => Ok(Self::Interacting),
            "reception" => Ok(Self::Reception),
            "engagement" => Ok(Self::Engagement),
            "totalCitizens" | "total_citizens" | "citizens" => Ok(Self::TotalCitizens),
            "region" => Ok(Self::Region),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// A record that can be ordered and searched by region.
pub trait SortableRecord {
    fn region(&self) -> &str;

    /// Numeric value for a non-region key.
    fn value(&self, key: SortKey) -> i64;
}

impl SortableRecord for AggregatedMetrics {
    fn region(&self) -> &str {
        &self.region
    }

    fn value(&self, key: SortKey) -> i64 {
        match key {
            SortKey::Total => self.total,
            SortKey::Interacting => self.interacting,
            SortKey::Reception => self.reception,
            SortKey::Engagement => self.engagement,
            SortKey::TotalCitizens => self.total_citizens,
            SortKey::Region => 0,
        }
    }
}

impl SortableRecord for RegionDelta {
    fn region(&self) -> &str {
        &self.region
    }

    fn value(&self, key: SortKey) -> i64 {
        match key {
            SortKey::Total => self.delta.total,
            SortKey::Interacting => self.delta.interacting,
            SortKey::Reception => self.delta.reception,
            SortKey::Engagement => self.delta.engagement,
            SortKey::TotalCitizens => self.delta.total_citizens,
            SortKey::Region => 0,
        }
    }
}

/// Case-insensitive substring match on the region name. A blank query matches all.
pub fn matches_query(region: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || region.to_lowercase().contains(&query.to_lowercase())
}

fn compare_records<R: SortableRecord>(a: &R, b: &R, key: SortKey) -> Ordering {
    match key {
        SortKey::Region => collate(a.region(), b.region()),
        numeric => a.value(numeric).cmp(&b.value(numeric)),
    }
}

/// Filter by `query`, then sort by `key` in `direction`.
pub fn sort_and_filter<R: SortableRecord + Clone>(
    records: &[R],
    key: SortKey,
    direction: SortDirection,
    query: &str,
) -> Vec<R> {
    let mut out: Vec<R> = records
        .iter()
        .filter(|r| matches_query(r.region(), query))
        .cloned()
        .collect();
    out.sort_by(|a, b| {
        let ord = compare_records(a, b, key);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    out
}
