// src/fetch/urls.rs

use url::Url;

use crate::config::SourceConfig;
use crate::dates::MonthQuery;

/// History page URL for one month of the configured station.
pub fn month_url(source: &SourceConfig, query: MonthQuery) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&source.base_url)?;
    url.query_pairs_mut()
        .append_pair("gid", &source.gid)
        .append_pair("station", &source.station)
        .append_pair("month", &query.month.to_string())
        .append_pair("year", &format!("{:04}", query.year))
        .append_pair("language", &source.language)
        .append_pair("country", &source.country);
    Ok(url)
}
