use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-ingest")]
#[command(about = "Weather observation ingestion and yearly statistics")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Configuration file [default: weather-ingest.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Database URL, e.g. sqlite://weather.sqlite")]
    pub database_url: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide progress bars")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest every observation file in a directory
    Ingest {
        #[arg(short, long, help = "Directory of <station>.txt files")]
        data_dir: Option<PathBuf>,

        #[arg(long)]
        batch_size: Option<usize>,

        #[arg(long, help = "Log and skip malformed lines instead of aborting")]
        skip_malformed: bool,
    },

    /// Recompute yearly statistics from ingested observations
    Statistics {
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// List observations ordered by date and station
    Weather {
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        page: i64,

        #[arg(long, default_value = "50", allow_negative_numbers = true)]
        per: i64,
    },

    /// List yearly statistics ordered by year and station
    Stats {
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        page: i64,

        #[arg(long, default_value = "50", allow_negative_numbers = true)]
        per: i64,
    },
}
