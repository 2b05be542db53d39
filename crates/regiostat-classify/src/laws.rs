//! Legislative feed normalisation and the region × model-law status matrix.

use std::collections::BTreeMap;

use regiostat_core::FeedError;
use regiostat_core::coerce::safe_parse_opt;
use regiostat_core::collate::sort_unique;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::status::{InitiativeScope, NotSubmittedReason, StatusBucket, classify_status};

const FEED_NAME: &str = "legislative statistics";

/// Own initiatives not tied to the federal model-law list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OwnInitiatives {
    pub contributed: i64,
    pub accepted: i64,
}

/// One region's legislative record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LawData {
    pub region_name: String,
    /// Law title → raw status text. `None` for null or non-string statuses.
    pub federal_laws: BTreeMap<String, Option<String>>,
    pub others: OwnInitiatives,
}

impl LawData {
    /// Classified status of `law` in this region.
    pub fn status(&self, law: &str) -> StatusBucket {
        classify_status(self.federal_laws.get(law).and_then(Option::as_deref))
    }
}

/// The normalised legislative feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedLawData {
    /// Law titles in the key order of the first valid region record.
    pub law_list: Vec<String>,
    pub data_by_region: BTreeMap<String, LawData>,
    pub region_options: Vec<String>,
}

impl ProcessedLawData {
    /// Classified status of `law` in `region`; unknown pairs are "no data".
    pub fn status(&self, region: &str, law: &str) -> StatusBucket {
        self.data_by_region
            .get(region)
            .map(|data| data.status(law))
            .unwrap_or(StatusBucket::NoData)
    }

    /// Totals over every region × every law in `law_list`.
    pub fn law_totals(&self) -> LawTotals {
        self.totals_over(self.region_options.iter().map(String::as_str))
    }

    /// Totals restricted to the given regions. Unknown names are ignored.
    pub fn totals_over<'a>(&self, regions: impl IntoIterator<Item = &'a str>) -> LawTotals {
        let mut totals = LawTotals::default();
        for data in regions
            .into_iter()
            .filter_map(|region| self.data_by_region.get(region))
        {
            for law in &self.law_list {
                totals.record(data.status(law));
            }
            totals.own_contributed += data.others.contributed;
            totals.own_accepted += data.others.accepted;
        }
        totals
    }

    /// Totals for one law across every region.
    pub fn totals_for_law(&self, law: &str) -> LawTotals {
        let mut totals = LawTotals::default();
        for region in &self.region_options {
            totals.record(self.status(region, law));
        }
        totals
    }
}

/// Bucket and sub-bucket counts for summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LawTotals {
    pub no_data: usize,
    pub adopted_ldpr_only: usize,
    pub adopted_ldpr_cross_party: usize,
    pub submitted_ldpr_only: usize,
    pub submitted_ldpr_cross_party: usize,
    pub pending: usize,
    pub by_other_party: usize,
    pub not_submitted_submitted_by_other_party: usize,
    pub not_submitted_adopted_by_other_party: usize,
    pub not_submitted_not_relevant: usize,
    pub not_submitted_other: usize,
    pub own_contributed: i64,
    pub own_accepted: i64,
}

impl LawTotals {
    pub fn record(&mut self, bucket: StatusBucket) {
        use InitiativeScope::*;
        use NotSubmittedReason::*;
        let slot = match bucket {
            StatusBucket::NoData => &mut self.no_data,
            StatusBucket::AdoptedLdpr { scope: LdprOnly } => &mut self.adopted_ldpr_only,
            StatusBucket::AdoptedLdpr { scope: CrossParty } => &mut self.adopted_ldpr_cross_party,
            StatusBucket::SubmittedLdpr { scope: LdprOnly } => &mut self.submitted_ldpr_only,
            StatusBucket::SubmittedLdpr { scope: CrossParty } => {
                &mut self.submitted_ldpr_cross_party
            }
            StatusBucket::Pending => &mut self.pending,
            StatusBucket::ByOtherParty => &mut self.by_other_party,
            StatusBucket::NotSubmitted { reason: SubmittedByOtherParty } => {
                &mut self.not_submitted_submitted_by_other_party
            }
            StatusBucket::NotSubmitted { reason: AdoptedByOtherParty } => {
                &mut self.not_submitted_adopted_by_other_party
            }
            StatusBucket::NotSubmitted { reason: NotRelevant } => {
                &mut self.not_submitted_not_relevant
            }
            StatusBucket::NotSubmitted { reason: Other } => &mut self.not_submitted_other,
        };
        *slot += 1;
    }

    pub fn adopted_ldpr(&self) -> usize {
        self.adopted_ldpr_only + self.adopted_ldpr_cross_party
    }

    pub fn submitted_ldpr(&self) -> usize {
        self.submitted_ldpr_only + self.submitted_ldpr_cross_party
    }

    pub fn not_submitted(&self) -> usize {
        self.not_submitted_submitted_by_other_party
            + self.not_submitted_adopted_by_other_party
            + self.not_submitted_not_relevant
            + self.not_submitted_other
    }

    /// Number of classified `(region, law)` cells.
    pub fn cells(&self) -> usize {
        self.no_data
            + self.adopted_ldpr()
            + self.submitted_ldpr()
            + self.pending
            + self.by_other_party
            + self.not_submitted()
    }
}

/// Trimmed region name; whitespace-only names count as empty.
fn law_region_name(entry: &Value) -> Option<&str> {
    let name = entry.get("region_name")?.as_str()?.trim();
    if name.is_empty() || name == "0" {
        None
    } else {
        Some(name)
    }
}

/// Law titles of an entry in feed order.
fn law_titles(entry: &Value) -> Vec<String> {
    entry
        .get("federal_laws")
        .and_then(Value::as_object)
        .map(|laws| laws.keys().cloned().collect())
        .unwrap_or_default()
}

fn normalize_law_entry(entry: &Value, region: &str) -> LawData {
    let federal_laws = entry
        .get("federal_laws")
        .and_then(Value::as_object)
        .map(|laws| {
            laws.iter()
                .map(|(title, status)| (title.clone(), status.as_str().map(str::to_string)))
                .collect()
        })
        .unwrap_or_default();

    let others = entry.get("others");
    LawData {
        region_name: region.to_string(),
        federal_laws,
        others: OwnInitiatives {
            contributed: safe_parse_opt(others.and_then(|o| o.get("contributed"))),
            accepted: safe_parse_opt(others.and_then(|o| o.get("accepted"))),
        },
    }
}

/// Normalise the raw legislative feed.
///
/// Fails only if the feed is not a JSON array. Entries without a usable
/// `region_name` are dropped; a later entry for the same region replaces an
/// earlier one.
pub fn normalize_laws(raw: &Value) -> Result<ProcessedLawData, FeedError> {
    let entries = FeedError::expect_array(FEED_NAME, raw)?;

    let mut law_list: Option<Vec<String>> = None;
    let mut data_by_region = BTreeMap::new();
    let mut dropped = 0usize;
    for entry in entries {
        let Some(region) = law_region_name(entry) else {
            dropped += 1;
            continue;
        };
        if law_list.is_none() {
            law_list = Some(law_titles(entry));
        }
        if data_by_region.contains_key(region) {
            debug!(region, "duplicate region in legislative feed, keeping the later entry");
        }
        data_by_region.insert(region.to_string(), normalize_law_entry(entry, region));
    }
    if dropped > 0 {
        debug!(dropped, "dropped legislative entries without a region name");
    }

    let mut region_options: Vec<String> = data_by_region.keys().cloned().collect();
    sort_unique(&mut region_options);

    let processed = ProcessedLawData {
        law_list: law_list.unwrap_or_default(),
        data_by_region,
        region_options,
    };
    info!(
        regions = processed.region_options.len(),
        laws = processed.law_list.len(),
        dropped,
        "normalised legislative statistics"
    );
    Ok(processed)
}

/// Parse and normalise the legislative feed from its JSON text.
pub fn normalize_laws_str(json: &str) -> Result<ProcessedLawData, FeedError> {
    let raw: Value = serde_json::from_str(json).map_err(|source| FeedError::Json {
        feed: FEED_NAME,
        source,
    })?;
    normalize_laws(&raw)
}
