use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Download the Olist datasets and store them as parquet")]
pub struct Cli {
    /// Dataset catalog (TOML). Defaults to the built-in Olist catalog
    #[arg(short, long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output directory. Defaults to $OLIST_DATA_DIR, then the current directory
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Only ingest the named dataset (repeatable)
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,

    /// Exit with a non-zero status if any dataset failed
    #[arg(long)]
    pub strict: bool,
}
