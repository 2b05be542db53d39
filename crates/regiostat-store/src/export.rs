//! Arrow and Parquet export of aggregated per-region metrics.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use regiostat_core::export::region_metrics_schema;
use regiostat_core::{DeputyCategory, Metric};
use tracing::info;

use crate::StoreError;
use crate::aggregate::AggregatedMetrics;

/// Convert aggregated records into a single RecordBatch.
///
/// Categories not in the selection export as zero in their breakdown columns.
pub fn to_record_batch(records: &[AggregatedMetrics]) -> Result<RecordBatch, StoreError> {
    let schema = Arc::new(region_metrics_schema());

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(
            records
                .iter()
                .map(|r| Some(r.region.as_str()))
                .collect::<StringArray>(),
        ),
        int_column(records, |r| r.total),
        int_column(records, |r| r.interacting),
        int_column(records, |r| r.reception),
        int_column(records, |r| r.engagement),
        int_column(records, |r| r.total_citizens),
    ];
    for category in DeputyCategory::ALL {
        for metric in Metric::ALL {
            columns.push(int_column(records, |r| {
                r.by_category
                    .get(&category)
                    .map(|s| s.get(metric))
                    .unwrap_or(0)
            }));
        }
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}

fn int_column(
    records: &[AggregatedMetrics],
    value: impl Fn(&AggregatedMetrics) -> i64,
) -> ArrayRef {
    Arc::new(records.iter().map(value).collect::<Int64Array>())
}

/// Write aggregated records to a Parquet file, replacing any existing file.
pub fn write_parquet(path: &Path, records: &[AggregatedMetrics]) -> Result<(), StoreError> {
    if records.is_empty() {
        return Err(StoreError::NoRecords);
    }
    let batch = to_record_batch(records)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    info!(path = %path.display(), rows = batch.num_rows(), "wrote region metrics parquet");
    Ok(())
}

/// Read a Parquet file into Arrow RecordBatches.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    if !path.exists() {
        return Err(StoreError::ParquetNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}
