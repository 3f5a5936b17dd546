use csv::Writer;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Direction, MatchResult};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Cannot write {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Cannot write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Write match results with the header of the given direction
///
/// # Returns
/// Number of data rows written
pub fn write_results(
    path: &Path,
    direction: Direction,
    results: &[MatchResult],
) -> Result<usize, WriteError> {
    let csv_err = |source| WriteError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = Writer::from_path(path).map_err(csv_err)?;
    write_to(&mut writer, direction, results).map_err(csv_err)?;
    writer.flush().map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(results.len())
}

/// Serialize results into any CSV sink
pub fn write_to<W: io::Write>(
    writer: &mut Writer<W>,
    direction: Direction,
    results: &[MatchResult],
) -> Result<(), csv::Error> {
    writer.write_record(direction.headers())?;

    for result in results {
        let distance = result.distance_km.to_string();
        writer.write_record([
            result.query_label.as_str(),
            result.candidate_label.as_str(),
            distance.as_str(),
        ])?;
    }

    Ok(())
}
