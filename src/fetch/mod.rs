// src/fetch/mod.rs

pub mod client;
pub mod urls;

use std::future::Future;
use thiserror::Error;
use tracing::{info, instrument};

use crate::dates::{MonthQuery, ResumePoint};
use crate::error::{HarvestError, Result};
use crate::extract::{extract_month, DayRecord};
pub use client::HttpSource;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
}

/// Anything that can hand back the raw history page of one month.
pub trait PageSource {
    fn fetch_month(
        &self,
        query: MonthQuery,
    ) -> impl Future<Output = std::result::Result<Vec<u8>, FetchError>>;
}

/// Fetch and extract every month from the resume point through the present month.
///
/// Months are requested one at a time, oldest first. Any failed request or
/// unreadable page aborts the run; no partial result is returned.
#[instrument(level = "info", skip(source))]
pub async fn fetch_all_months<S: PageSource>(
    source: &S,
    resume: &ResumePoint,
) -> Result<Vec<DayRecord>> {
    let mut records = Vec::new();

    for (i, query) in resume.months().enumerate() {
        let body = source
            .fetch_month(query)
            .await
            .map_err(|source| HarvestError::FetchFailed {
                month: query.month,
                year: query.year,
                source,
            })?;

        let html = String::from_utf8_lossy(&body);
        let monthly = extract_month(&html, i == 0, resume).map_err(|e| {
            HarvestError::UnexpectedPageStructure {
                month: query.month,
                year: query.year,
                detail: e.0,
            }
        })?;

        info!(month = %query, bytes = body.len(), records = monthly.len(), "month fetched");
        records.extend(monthly);
    }

    Ok(records)
}
