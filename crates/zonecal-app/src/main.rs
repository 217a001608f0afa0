use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use zonecal_app::document::{CalendarDocument, prod_id};
use zonecal_app::resolver::DirectoryResolver;
use zonecal_core::config::load_config;
use zonecal_rfc::rfc::ical::Render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: zonecal <calendar.toml>")?;

    let document = CalendarDocument::load(&path)?;
    let mut calendar = document.into_calendar(prod_id(&config.prodid), chrono::Utc::now())?;

    if let Some(resolver) = DirectoryResolver::from_config(&config.timezones) {
        tracing::info!(dir = ?config.timezones.dir, "Embedding time zone definitions");
        calendar.set_resolver(Arc::new(resolver));
    }

    let mut output = calendar.render_to_string().await?;
    output.push_str("\r\n");

    match &config.output.path {
        Some(target) => {
            tokio::fs::write(target, output.as_bytes())
                .await
                .with_context(|| format!("writing {}", target.display()))?;
            tracing::info!(path = %target.display(), "Calendar written");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(output.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
