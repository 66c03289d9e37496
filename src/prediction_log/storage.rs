use super::{LogRecord, LogSnapshot};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};
use tracing::{debug, info, warn};

/// Append-only NDJSON log of served predictions.
pub struct PredictionLog {
    path: PathBuf,
    // Serializes appends issued from this process
    write_lock: Mutex<()>,
}

impl PredictionLog {
    /// Opens the log, creating the parent directory and the file if absent.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::log_write(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| Error::log_write(format!("cannot open {}: {}", path.display(), e)))?;

        info!("Prediction log ready: {}", path.display());
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes one record as a single newline-terminated line.
    pub async fn append(&self, record: &LogRecord) -> Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| Error::log_write(format!("cannot open {}: {}", self.path.display(), e)))?;

        file.write_all(&line)
            .await
            .map_err(|e| Error::log_write(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| Error::log_write(e.to_string()))?;

        debug!("Appended prediction record to {}", self.path.display());
        Ok(())
    }

    pub async fn load(&self) -> Result<LogSnapshot> {
        load_records(&self.path).await
    }
}

/// Reads every record in the log at `path`. A missing file is an empty log.
pub async fn load_records(path: impl AsRef<Path>) -> Result<LogSnapshot> {
    let path = path.as_ref();
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Prediction log {} does not exist yet", path.display());
            return Ok(LogSnapshot::default());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(parse_records(&content))
}

/// Parses NDJSON content, skipping blank lines and lines that fail to decode.
pub fn parse_records(content: &str) -> LogSnapshot {
    let mut snapshot = LogSnapshot::default();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<LogRecord>(line) {
            Ok(record) => snapshot.records.push(record),
            Err(e) => {
                let err = Error::MalformedLogLine {
                    line: idx + 1,
                    reason: e.to_string(),
                };
                warn!("Skipping log entry: {}", err);
                snapshot.skipped_lines += 1;
            }
        }
    }

    snapshot
}
