mod app;
mod config;
mod error;
mod upload;
mod utils;

use anyhow::{anyhow, Context};
use app::UvrUploader;
use chrono::Local;
use clap::Parser;
use config::Settings;
use tracing::info;
use tracing_subscriber::EnvFilter;
use upload::ReportClient;
use utils::period::year_options;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uvr_uploader=info")),
        )
        .init();

    let settings = Settings::parse();
    let today = Local::now().date_naive();
    let period = settings.initial_period(today)?;

    let client = ReportClient::new(
        &settings.server_url,
        settings.csrf_token.clone(),
        settings.timeout(),
    )
    .with_context(|| format!("invalid server configuration for {}", settings.server_url))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build the network runtime")?;

    info!(server = %client.server_url(), %period, "starting UVR uploader");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 860.0])
            .with_min_inner_size([480.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "UVR Uploader",
        options,
        Box::new(move |cc| {
            Box::new(UvrUploader::new(
                cc,
                client,
                runtime,
                period,
                year_options(today),
            ))
        }),
    )
    .map_err(|e| anyhow!("ui terminated with an error: {e}"))
}
