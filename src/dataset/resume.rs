// src/dataset/resume.rs

use chrono::NaiveDate;
use tracing::info;

use super::{Dataset, FIRST_DATA_ROW};
use crate::config::DateColumn;
use crate::dates::{parse_last_stored_date, ResumePoint};
use crate::error::{HarvestError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeTarget {
    pub resume: ResumePoint,
    /// First row to write new records into.
    pub next_append_row: usize,
}

/// Find the last stored date in `column` and resume the day after it.
pub fn resolve_resume_point<D: Dataset + ?Sized>(
    dataset: &D,
    column: &DateColumn,
    today: NaiveDate,
) -> Result<ResumeTarget> {
    let col = column.index();
    let (row, last_date) = (FIRST_DATA_ROW..=dataset.highest_row())
        .rev()
        .find_map(|row| {
            dataset
                .cell_text(row, col)
                .filter(|text| !text.trim().is_empty())
                .map(|text| (row, text))
        })
        .ok_or_else(|| HarvestError::NoExistingDate {
            column: column.to_string(),
        })?;

    let resume = parse_last_stored_date(&last_date, today)?;
    info!(
        last_date = %last_date,
        row,
        first_covered = %resume.first_covered_date,
        "resume point"
    );
    Ok(ResumeTarget {
        resume,
        next_append_row: row + 1,
    })
}
