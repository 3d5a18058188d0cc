use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Price plan catalog and accounts in TOML. The built-in catalog is used when omitted.
    #[clap(long = "catalog", env = "CATALOG_PATH", global = true)]
    pub catalog_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the readings and price plan API.
    #[clap(name = "serve")]
    Serve(ServeArgs),

    /// Compare the price plans for a batch of readings from a JSON file.
    #[clap(name = "compare")]
    Compare(CompareArgs),
}

#[derive(Parser)]
pub struct ServeArgs {
    #[clap(long, default_value = "0.0.0.0:8080", env = "BIND_ADDRESS")]
    pub bind_address: String,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Meter readings document: `{"smartMeterId": …, "electricityReadings": […]}`.
    #[clap(long = "readings", env = "READINGS_PATH")]
    pub readings_path: PathBuf,

    /// Show only the cheapest plans.
    #[clap(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,
}
