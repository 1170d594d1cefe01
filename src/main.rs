use clap::Parser;
use weather_ingest::cli::{run, Cli};
use weather_ingest::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
