#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line scraper for council development application registers.
//!
//! `parse` turns positioned text decoded from register PDFs into
//! development application records; `links` lists the register documents
//! published on the council's listing page.
//!
//! Uses `indicatif-log-bridge` (via [`da_register_cli_utils::init_logger`])
//! so log lines and progress bars share the terminal.

mod config;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use da_register_address::ReferenceData;
use da_register_application::{ParseContext, parse_document};
use da_register_cli_utils::{IndicatifProgress, MultiProgress};
use da_register_layout::TextFragment;
use da_register_listing::{fetch_listing, find_document_urls, select_documents};
use serde::Deserialize;

use crate::config::ScraperConfig;

#[derive(Parser)]
#[command(name = "da_register", about = "Development application register scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse decoded register documents into development applications
    Parse {
        /// JSON file of decoded documents: `[{ "url", "pages": [[fragment, ...], ...] }]`
        #[arg(long)]
        fragments: PathBuf,
        /// Configuration file (defaults to the built-in Wakefield configuration)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory that relative reference table paths resolve against
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Write records here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the register documents linked from the listing page
    Links {
        /// Configuration file (defaults to the built-in Wakefield configuration)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Listing page URL (overrides the configuration)
        #[arg(long)]
        url: Option<String>,
        /// Which of the older documents to select alongside the newest
        #[arg(long, default_value = "0")]
        pick: usize,
    },
}

/// One decoded register document.
#[derive(Debug, Deserialize)]
struct DecodedDocument {
    url: String,
    pages: Vec<Vec<TextFragment>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = da_register_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            fragments,
            config,
            data_dir,
            output,
        } => parse(
            &fragments,
            config.as_deref(),
            &data_dir,
            output.as_deref(),
            &multi,
        )?,
        Commands::Links { config, url, pick } => links(config.as_deref(), url, pick).await?,
    }

    Ok(())
}

fn parse(
    fragments: &Path,
    config: Option<&Path>,
    data_dir: &Path,
    output: Option<&Path>,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScraperConfig::load(config)?;
    let refs = ReferenceData::load(&config.reference.relative_to(data_dir))?;

    let documents: Vec<DecodedDocument> =
        serde_json::from_str(&std::fs::read_to_string(fragments)?)?;
    log::info!("Parsing {} document(s)", documents.len());

    let date_scraped = chrono::Local::now().date_naive();
    let mut applications = Vec::new();

    for document in documents {
        let context = ParseContext {
            info_url: document.url,
            comment_url: config.comment_url.clone(),
            date_scraped,
            sentinel: config.sentinel,
        };
        let progress = IndicatifProgress::pages_bar(multi, &context.info_url);
        applications.extend(parse_document(&document.pages, &refs, &context, &progress));
    }

    log::info!("Parsed {} application(s) in total", applications.len());

    let json = serde_json::to_string_pretty(&applications)?;
    match output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

async fn links(
    config: Option<&Path>,
    url: Option<String>,
    pick: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScraperConfig::load(config)?;
    let url = url.unwrap_or(config.listing.url);

    let html = fetch_listing(&url).await?;
    let urls = find_document_urls(&html, &url, &config.listing.link_selectors)?;

    if urls.is_empty() {
        log::warn!("No register documents found on {url}");
        return Ok(());
    }

    println!("Found {} document(s):", urls.len());
    for document in &urls {
        println!("  {document}");
    }

    println!("Selected:");
    for document in select_documents(&urls, pick) {
        println!("  {document}");
    }

    Ok(())
}
