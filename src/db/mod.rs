//! SQLite persistence: connection handling, schema, upsert writers and
//! paginated reads.
//!
//! Every function takes an explicit `&mut SqliteConnection`, so callers
//! decide whether work runs inside a transaction.

pub mod aggregate_writer;
pub mod observation_writer;
pub mod queries;
pub mod schema;

pub use aggregate_writer::upsert_aggregates;
pub use observation_writer::upsert_observations;
pub use queries::{list_aggregates, list_observations, Pagination};
pub use schema::ensure_schema;

use crate::error::{IngestError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::str::FromStr;
use tracing::{debug, error, warn};

/// Open a single connection, creating the database file if needed.
pub async fn connect(database_url: &str) -> Result<SqliteConnection> {
    let connection_error = |source| IngestError::Connection {
        url: database_url.to_string(),
        source,
    };

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(connection_error)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    match options.connect().await {
        Ok(conn) => {
            debug!("Connected to {}", database_url);
            Ok(conn)
        }
        Err(source) => {
            error!("DB connection error for {}: {}", database_url, source);
            Err(connection_error(source))
        }
    }
}

/// Close a connection; a failure to close is logged, not returned.
pub async fn close(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        warn!("Error closing database connection: {}", e);
    }
}
