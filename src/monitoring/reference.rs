use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Row of the labeled reference (training) corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub review: String,
    pub sentiment: String,
}

/// Loads the reference CSV (`review,sentiment` header). Undecodable rows are skipped.
pub async fn load_reference(path: impl AsRef<Path>) -> Result<Vec<ReferenceRow>> {
    let path: PathBuf = path.as_ref().to_path_buf();
    tokio::task::spawn_blocking(move || read_reference(&path))
        .await
        .map_err(|e| Error::dataset(format!("reference loader panicked: {}", e)))?
}

fn read_reference(path: &Path) -> Result<Vec<ReferenceRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| Error::dataset(format!("cannot open {}: {}", path.display(), e)))?;
    let rows = parse_reference(file)?;
    info!("Loaded {} reference rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn parse_reference<R: std::io::Read>(reader: R) -> Result<Vec<ReferenceRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["review", "sentiment"] {
        if !headers.iter().any(|h| h == required) {
            return Err(Error::dataset(format!(
                "reference dataset is missing the '{}' column",
                required
            )));
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for row in csv_reader.deserialize::<ReferenceRow>() {
        match row {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                warn!("Skipping reference row: {}", e);
            }
        }
    }
    if skipped > 0 {
        warn!("Skipped {} undecodable reference rows", skipped);
    }

    Ok(rows)
}
