use crate::error::{IngestError, Result};
use crate::models::Observation;
use crate::readers::record_parser::parse_observation_line;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, OBSERVATION_FILE_EXTENSION};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads per-station observation files. The file's base name is the station id.
pub struct ObservationReader {
    extension: String,
    skip_malformed: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            extension: OBSERVATION_FILE_EXTENSION.to_string(),
            skip_malformed: false,
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Log and drop malformed lines instead of failing the whole file.
    pub fn with_skip_malformed(mut self, skip_malformed: bool) -> Self {
        self.skip_malformed = skip_malformed;
        self
    }

    fn suffix(&self) -> String {
        format!(".{}", self.extension)
    }

    /// List observation files in `dir`, sorted by name.
    ///
    /// Files whose name is only the extension have no usable station id and
    /// are skipped with a warning.
    pub fn find_observation_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|source| IngestError::FileRead {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();

            if !path.is_file() {
                continue;
            }

            let has_suffix = path
                .file_name()
                .and_then(|f| f.to_str())
                .is_some_and(|name| name.ends_with(&self.suffix()));
            if !has_suffix {
                continue;
            }

            match self.extract_station_id_from_path(&path) {
                Ok(_) => files.push(path),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        files.sort();
        debug!("Found {} observation files in {}", files.len(), dir.display());
        Ok(files)
    }

    /// Station id from a file name, e.g. `USC00110072.txt` -> `USC00110072`
    pub fn extract_station_id_from_path(&self, path: &Path) -> Result<String> {
        let station_id = path
            .file_name()
            .and_then(|f| f.to_str())
            .and_then(|name| name.strip_suffix(&self.suffix()))
            .filter(|stem| !stem.trim().is_empty())
            .ok_or_else(|| IngestError::InvalidStationId {
                path: path.to_path_buf(),
            })?;

        Ok(station_id.to_string())
    }

    /// Read every observation in a file, in line order.
    pub fn read_observations(&self, path: &Path) -> Result<Vec<Observation>> {
        let station_id = self.extract_station_id_from_path(path)?;
        self.read_observations_with_station_id(path, &station_id)
    }

    /// Read every observation in a file, attaching an explicit station id.
    pub fn read_observations_with_station_id(
        &self,
        path: &Path,
        station_id: &str,
    ) -> Result<Vec<Observation>> {
        let file_error = |source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(file_error)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut observations = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(file_error)?;
            let line_number = index + 1;

            match parse_observation_line(&line) {
                Ok(reading) => observations.push(reading.with_station(station_id)),
                Err(e) => {
                    let reason = match e {
                        IngestError::MalformedRecord(reason) => reason,
                        other => other.to_string(),
                    };

                    if self.skip_malformed {
                        warn!(
                            "Skipping line {} of {}: {}",
                            line_number,
                            path.display(),
                            reason
                        );
                        continue;
                    }

                    return Err(IngestError::Parse {
                        path: path.to_path_buf(),
                        line: line_number,
                        reason,
                    });
                }
            }
        }

        Ok(observations)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
