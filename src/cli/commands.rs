use crate::cli::args::{Cli, Commands};
use crate::config::RunConfig;
use crate::db::{self, ensure_schema, list_aggregates, list_observations, Pagination};
use crate::error::Result;
use crate::processors::{IngestionProcessor, StatisticsProcessor};
use crate::utils::logging::init_logging;
use serde::Serialize;
use validator::Validate;

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = RunConfig::load(cli.config.as_deref())?;

    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    if cli.log_file.is_some() {
        config.log_file = cli.log_file;
    }
    if cli.quiet {
        config.silent = true;
    }

    init_logging(config.log_file.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Ingest {
            data_dir,
            batch_size,
            skip_malformed,
        } => {
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            if let Some(size) = batch_size {
                config.batch_size = size;
            }
            config.skip_malformed |= skip_malformed;
            config.validate()?;

            println!("Ingesting observations from {}", config.data_dir.display());

            let report = IngestionProcessor::new(config).run().await?;
            println!("\n{}", report.summary());
        }

        Commands::Statistics { batch_size } => {
            if let Some(size) = batch_size {
                config.batch_size = size;
            }
            config.validate()?;

            let report = StatisticsProcessor::new(config).run().await?;
            println!("\n{}", report.summary());
        }

        Commands::Weather { page, per } => {
            let pagination = Pagination::new(Some(page), Some(per));
            let mut conn = db::connect(&config.database_url).await?;
            let rows = match ensure_schema(&mut conn).await {
                Ok(()) => list_observations(&mut conn, &pagination).await,
                Err(e) => Err(e),
            };
            db::close(conn).await;
            print_json(&rows?)?;
        }

        Commands::Stats { page, per } => {
            let pagination = Pagination::new(Some(page), Some(per));
            let mut conn = db::connect(&config.database_url).await?;
            let rows = match ensure_schema(&mut conn).await {
                Ok(()) => list_aggregates(&mut conn, &pagination).await,
                Err(e) => Err(e),
            };
            db::close(conn).await;
            print_json(&rows?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(rows: &[T]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}
