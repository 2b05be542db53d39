//! Time-series store for regional statistics: normalisation, aggregation,
//! period comparison, ordering, memoisation and Parquet export.

mod error;
pub use error::StoreError;

pub mod aggregate;
pub mod compare;
pub mod export;
pub mod memo;
pub mod regional;
pub mod sort;
pub mod timeseries;

pub use aggregate::{
    ALL_REGIONS, AggregatedMetrics, Headcounts, Selection, SelectionSummary, aggregate,
    aggregate_combined, engagement_rate, summarize,
};
pub use compare::{ComparisonReport, MetricsDelta, RegionDelta, compare, compare_selection};
pub use export::{read_parquet, to_record_batch, write_parquet};
pub use memo::{MemoCache, MemoStats};
pub use regional::{DatedStatistics, ProcessedRegionalData};
pub use sort::{SortDirection, SortKey, SortableRecord, UnknownSortKey, sort_and_filter};
pub use timeseries::{ProcessedData, normalize_statistics, normalize_statistics_str};
