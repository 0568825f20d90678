use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use olist_dashboard::{Dashboard, DashboardConfig, Selection, Session};
use shared_utils::{env::resolve_data_dir, logging::init_tracing};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Olist customer satisfaction dashboard")]
struct Cli {
    /// Directory holding the parquet files. Defaults to $OLIST_DATA_DIR, then
    /// the config's data_dir, then the current directory
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Dashboard config (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Maximum seller delay rate shown, in percent (0..=100)
    #[arg(short, long, value_name = "PCT", value_parser = clap::value_parser!(u8).range(0..=100))]
    threshold: Option<u8>,

    /// View to show: ratings, delay-impact, sellers, payments, geo, recommendations or all
    #[arg(default_value = "all")]
    view: Selection,
}

fn main() -> anyhow::Result<()> {
    init_tracing(tracing::Level::WARN);
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DashboardConfig::from_path(path)?,
        None => DashboardConfig::default(),
    };
    let fallback = config.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let data_dir = resolve_data_dir(cli.data_dir, fallback);

    let session = Session::new(&data_dir);
    // Load up front so a broken data directory fails before any output.
    session
        .tables()
        .with_context(|| format!("loading tables from {}", data_dir.display()))?;

    let dashboard = Dashboard::new(session, &config, cli.threshold)?;
    let report = dashboard.report(cli.view)?;

    match cli.format {
        Format::Text => print!("{report}"),
        Format::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}
