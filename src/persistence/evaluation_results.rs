//! Reader for the evaluation results table.

use std::path::{Path, PathBuf};

use super::csv::parse;
use crate::domain::EvaluationTable;
use crate::error::{PricerError, Result};

#[derive(Debug, Clone)]
pub struct EvaluationResults {
    path: PathBuf,
}

impl EvaluationResults {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole table; `Ok(None)` when the file does not exist.
    pub async fn load(&self) -> Result<Option<EvaluationTable>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut records = parse(&text).into_iter();
        let columns = records
            .next()
            .ok_or_else(|| PricerError::Evaluation("file has no header row".to_string()))?;
        EvaluationTable::from_records(columns, records.collect()).map(Some)
    }
}
