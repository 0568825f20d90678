use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use olist_ingestor::{Catalog, Ingestor, cli::Cli, sources::http::HttpSource};
use shared_utils::{env::resolve_data_dir, logging::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing(tracing::Level::INFO);
    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    }
    .select(&cli.only)?;

    let out_dir = resolve_data_dir(cli.out_dir, PathBuf::from("."));
    tracing::info!(
        datasets = catalog.datasets.len(),
        out_dir = %out_dir.display(),
        "starting ingestion"
    );

    let source = HttpSource::new().context("failed to set up HTTP source")?;
    let report = Ingestor::new(source, out_dir).run(&catalog).await;

    // Report on stdout, summary on stderr.
    print!("{report}");
    eprintln!(
        "SUMMARY: {} succeeded, {} failed",
        report.written.len(),
        report.failed.len()
    );

    if cli.strict && !report.is_complete() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
