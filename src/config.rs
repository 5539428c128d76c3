use crate::utils::period::{parse_month, year_options, Period};
use anyhow::bail;
use chrono::{Month, NaiveDate};
use clap::Parser;
use std::time::Duration;

/// Startup settings, read from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "uvr_uploader",
    version,
    about = "Upload user verification report files and fetch the processed results"
)]
pub struct Settings {
    /// Base URL of the report server.
    #[arg(long, env = "UVR_SERVER_URL", default_value = "http://127.0.0.1:8000")]
    pub server_url: String,

    /// CSRF token to send instead of the one from the `csrftoken` cookie.
    #[arg(long, env = "UVR_CSRF_TOKEN")]
    pub csrf_token: Option<String>,

    /// Per-request timeout. Requests wait indefinitely when unset.
    #[arg(long, env = "UVR_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Initial month, e.g. `Mar` or `March`. Defaults to next month.
    #[arg(long, value_parser = parse_month)]
    pub month: Option<Month>,

    /// Initial year. Must be within one year of the reporting year.
    #[arg(long)]
    pub year: Option<i32>,
}

impl Settings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn initial_period(&self, today: NaiveDate) -> anyhow::Result<Period> {
        let upcoming = Period::upcoming(today);
        let period = Period::new(
            self.month.unwrap_or(upcoming.month),
            self.year.unwrap_or(upcoming.year),
        );

        let years = year_options(today);
        if !years.contains(&period.year) {
            bail!(
                "year {} is outside the selectable range {}-{}",
                period.year,
                years[0],
                years[2]
            );
        }
        Ok(period)
    }
}
