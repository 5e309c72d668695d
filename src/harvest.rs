// src/harvest.rs

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::config::HarvestConfig;
use crate::dataset::{resolve_resume_point, write_records, Dataset};
use crate::error::Result;
use crate::fetch::{fetch_all_months, PageSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    pub first_covered: NaiveDate,
    pub months_fetched: usize,
    pub records_written: usize,
    pub start_row: usize,
}

/// Resume point → month fetches → append. Stops at the first error.
#[instrument(level = "info", skip_all, fields(sheet = %config.sheet))]
pub async fn run<D, S>(
    config: &HarvestConfig,
    dataset: &mut D,
    source: &S,
    today: NaiveDate,
) -> Result<HarvestSummary>
where
    D: Dataset + ?Sized,
    S: PageSource,
{
    let target = resolve_resume_point(&*dataset, &config.date_column, today)?;
    let records = fetch_all_months(source, &target.resume).await?;

    if records.is_empty() {
        info!("no new records; dataset left untouched");
    } else {
        write_records(
            dataset,
            target.next_append_row,
            config.date_column.index(),
            &records,
        )?;
    }

    Ok(HarvestSummary {
        first_covered: target.resume.first_covered_date,
        months_fetched: target.resume.months().count(),
        records_written: records.len(),
        start_row: target.next_append_row,
    })
}
