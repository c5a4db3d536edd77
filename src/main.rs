use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use obit_report::api::{app, AppState};
use obit_report::cli::{Args, Command};
use obit_report::render::logo::fetch_logo;
use obit_report::store::{MemoryStore, ObituaryStore};
use obit_report::{render_record_report, render_search_report};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    match args.command {
        Command::Serve {
            bind,
            records,
            logo_url,
        } => {
            let store = MemoryStore::load_from_file(&records)
                .with_context(|| format!("Failed to load records from {}", records.display()))?;

            let state = AppState {
                store: Arc::new(store),
                logo_url,
            };

            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("Failed to bind {bind}"))?;
            log::info!("obit-report listening on http://{bind}");

            axum::serve(listener, app(state))
                .await
                .context("Server error")?;
        }

        Command::Record {
            reference,
            records,
            output,
            logo_url,
        } => {
            let store = MemoryStore::load_from_file(&records)
                .with_context(|| format!("Failed to load records from {}", records.display()))?;
            let record = store
                .find_by_reference(&reference)
                .with_context(|| format!("No obituary found for reference {reference}"))?;

            let logo = match logo_url.as_deref() {
                Some(url) => fetch_logo(url).await,
                None => None,
            };

            let pdf_data = render_record_report(&record, logo.as_deref())
                .context("Failed to generate record report")?;

            let output = output.unwrap_or_else(|| PathBuf::from(format!("{reference}.pdf")));
            fs::write(&output, pdf_data)
                .with_context(|| format!("Failed to write output file: {}", output.display()))?;
            println!("Successfully wrote PDF to {}", output.display());
        }

        Command::Search {
            query,
            records,
            output,
            logo_url,
        } => {
            let store = MemoryStore::load_from_file(&records)
                .with_context(|| format!("Failed to load records from {}", records.display()))?;
            let hits = store.search(&query);
            if hits.is_empty() {
                anyhow::bail!("No obituaries match \"{query}\"");
            }
            log::info!("Rendering {} search hits", hits.len());

            let logo = match logo_url.as_deref() {
                Some(url) => fetch_logo(url).await,
                None => None,
            };

            let pdf_data = render_search_report(&hits, &query, logo.as_deref())
                .context("Failed to generate search report")?;

            let output = output.unwrap_or_else(|| PathBuf::from("search-results.pdf"));
            fs::write(&output, pdf_data)
                .with_context(|| format!("Failed to write output file: {}", output.display()))?;
            println!("Successfully wrote PDF to {}", output.display());
        }
    }

    Ok(())
}
