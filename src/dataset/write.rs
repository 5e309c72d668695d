// src/dataset/write.rs

use tracing::info;

use super::Dataset;
use crate::error::{HarvestError, Result};
use crate::extract::DayRecord;

/// Write `records` one per row from `start_row`, fields in consecutive
/// columns from `start_column`, then persist the dataset.
pub fn write_records<D: Dataset + ?Sized>(
    dataset: &mut D,
    start_row: usize,
    start_column: usize,
    records: &[DayRecord],
) -> Result<()> {
    for (offset, record) in records.iter().enumerate() {
        let row = start_row + offset;
        for (i, value) in record.fields().into_iter().enumerate() {
            dataset
                .write_cell(row, start_column + i, value)
                .map_err(|source| HarvestError::PersistFailed {
                    action: format!("write row {row}"),
                    source,
                })?;
        }
    }

    dataset
        .persist()
        .map_err(|source| HarvestError::PersistFailed {
            action: "save sheet".into(),
            source,
        })?;
    info!(rows = records.len(), start_row, "records written");
    Ok(())
}
