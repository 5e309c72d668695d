use anyhow::Result;
use chrono::Local;
use reqwest::Client;
use std::{env, path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use weatherharvest::{
    config::HarvestConfig,
    dataset,
    fetch::HttpSource,
    harvest::{self, HarvestSummary},
};

#[tokio::main]
async fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    // usage: weatherharvest [CONFIG_YAML]
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.yaml"));

    match harvest_once(config_path).await {
        Ok(summary) => {
            info!(
                first_covered = %summary.first_covered,
                months = summary.months_fetched,
                records = summary.records_written,
                start_row = summary.start_row,
                "all done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn harvest_once(config_path: PathBuf) -> Result<HarvestSummary> {
    // ─── 2) config + dataset ─────────────────────────────────────────
    let config = HarvestConfig::load(&config_path)?;
    info!(
        config = %config_path.display(),
        dataset = %config.dataset.display(),
        format = ?config.format,
        sheet = %config.sheet,
        date_column = %config.date_column,
        "weather scraping"
    );
    let mut sheet = dataset::open(&config)?;

    // ─── 3) fetch + append ───────────────────────────────────────────
    let source = HttpSource::new(Client::new(), config.source.clone());
    let today = Local::now().date_naive();
    let summary = harvest::run(&config, &mut *sheet, &source, today).await?;
    Ok(summary)
}
