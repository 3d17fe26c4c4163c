//! Model evaluation results, as produced by the offline evaluation run.
//!
//! The table is read-only here. The best row is picked on the numeric R²
//! before any display formatting happens.

use super::format::format_grouped;
use crate::error::{PricerError, Result};

pub const MAE_COLUMN: &str = "MAE";
pub const RMSE_COLUMN: &str = "RMSE";
pub const R2_COLUMN: &str = "R2";

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRow {
    /// Model identifier (first column of the file)
    pub model: String,
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
    /// All cells as read, in column order
    pub cells: Vec<String>,
}

/// A row ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub cells: Vec<String>,
    pub is_best: bool,
}

#[derive(Debug, Clone, Copy)]
struct MetricColumns {
    mae: usize,
    rmse: usize,
    r2: usize,
}

#[derive(Debug, Clone)]
pub struct EvaluationTable {
    columns: Vec<String>,
    rows: Vec<EvaluationRow>,
    metrics: MetricColumns,
}

impl EvaluationTable {
    /// Build a table from a header and raw records.
    ///
    /// Fails when a metric column is missing or a metric cell is not numeric.
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        let find = |name: &str| {
            columns
                .iter()
                .position(|c| c.trim() == name)
                .ok_or_else(|| PricerError::Evaluation(format!("missing column '{name}'")))
        };
        let metrics = MetricColumns {
            mae: find(MAE_COLUMN)?,
            rmse: find(RMSE_COLUMN)?,
            r2: find(R2_COLUMN)?,
        };

        let mut rows = Vec::with_capacity(records.len());
        for (line, mut cells) in records.into_iter().enumerate() {
            // Short rows are padded so every row renders with the full column count.
            if cells.len() < columns.len() {
                cells.resize(columns.len(), String::new());
            }
            let metric = |idx: usize, name: &str| -> Result<f64> {
                let raw = cells[idx].trim();
                raw.parse::<f64>().map_err(|_| {
                    PricerError::Evaluation(format!(
                        "row {}: {name} value '{raw}' is not numeric",
                        line + 1
                    ))
                })
            };
            let mae = metric(metrics.mae, MAE_COLUMN)?;
            let rmse = metric(metrics.rmse, RMSE_COLUMN)?;
            let r2 = metric(metrics.r2, R2_COLUMN)?;
            rows.push(EvaluationRow {
                model: cells.first().cloned().unwrap_or_default(),
                mae,
                rmse,
                r2,
                cells,
            });
        }

        Ok(Self {
            columns,
            rows,
            metrics,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[EvaluationRow] {
        &self.rows
    }

    /// Index of the row with the highest R², first occurrence on ties.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, row) in self.rows.iter().enumerate() {
            if row.r2.is_nan() {
                continue;
            }
            match best {
                Some((_, r2)) if row.r2 <= r2 => {}
                _ => best = Some((idx, row.r2)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    pub fn best(&self) -> Option<&EvaluationRow> {
        self.best_index().map(|idx| &self.rows[idx])
    }

    /// Cells of one row with the metric columns reformatted for display.
    pub fn formatted_cells(&self, row: &EvaluationRow) -> Vec<String> {
        row.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                if idx == self.metrics.mae {
                    format_grouped(row.mae, 2)
                } else if idx == self.metrics.rmse {
                    format_grouped(row.rmse, 2)
                } else if idx == self.metrics.r2 {
                    format!("{:.4}", row.r2)
                } else {
                    cell.clone()
                }
            })
            .collect()
    }

    pub fn display_rows(&self) -> Vec<DisplayRow> {
        let best = self.best_index();
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| DisplayRow {
                cells: self.formatted_cells(row),
                is_best: Some(idx) == best,
            })
            .collect()
    }
}
