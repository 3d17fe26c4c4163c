//! Append-only log of served predictions.
//!
//! The header row is written only when the file does not exist yet. There is
//! no locking: concurrent writers may interleave rows or both write a header.

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::csv::encode_row;
use crate::domain::PredictionRecord;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct PredictionLog {
    path: PathBuf,
}

impl PredictionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header first on a fresh file.
    pub async fn append(&self, record: &PredictionRecord) -> Result<()> {
        let is_new = !tokio::fs::try_exists(&self.path).await?;
        if is_new {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut payload = String::new();
        if is_new {
            payload.push_str(&encode_row(&PredictionRecord::header()));
        }
        payload.push_str(&encode_row(&record.fields()));

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), header = is_new, "appended prediction record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionRequest;
    use crate::persistence::csv::parse;
    use chrono::NaiveDate;

    fn record(price: f64) -> PredictionRecord {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        PredictionRecord::new(
            PredictionRequest::from_features([65_000.0, 6.0, 7.0, 4.0, 35_000.0]),
            price,
            at,
        )
    }

    #[tokio::test]
    async fn writes_header_once_for_many_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = PredictionLog::new(dir.path().join("data").join("predictions_log.csv"));

        for i in 0..4 {
            log.append(&record(100_000.0 + i as f64)).await.unwrap();
        }

        let text = std::fs::read_to_string(log.path()).unwrap();
        let rows = parse(&text);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], PredictionRecord::header());
        assert_eq!(rows.iter().filter(|r| r[0] == "timestamp").count(), 1);
        assert_eq!(rows[4][6], "100003");
    }

    #[tokio::test]
    async fn appends_to_existing_file_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions_log.csv");
        std::fs::write(&path, "timestamp,old\n").unwrap();

        PredictionLog::new(&path).append(&record(1.5)).await.unwrap();

        let rows = parse(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][6], "1.5");
    }
}
