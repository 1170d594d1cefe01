pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;

pub use crate::config::RunConfig;
pub use crate::error::{IngestError, Result};
