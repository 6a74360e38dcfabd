#![deny(warnings)]

//! Append-only log of completed profit calculations.
//!
//! The backing file is a single pretty-printed JSON array. The whole
//! collection is loaded at open and rewritten on every append
//! (read-modify-write of the entire collection, single user, single
//! process).

use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use store_core::OperatingParameters;
use store_econ::FinancialResult;
use thiserror::Error;
use tracing::debug;

/// Timestamp layout used in persisted records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// The persisted subset of a financial result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub sales: Decimal,
    pub net_profit: Decimal,
    pub net_margin: Decimal,
}

/// One log entry. Created on every successful profit calculation,
/// never mutated or deleted afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub values: OperatingParameters,
    pub results: ResultSummary,
    /// "YYYY-MM-DD HH:MM:SS", stamped at append time.
    #[serde(default)]
    pub timestamp: String,
}

impl HistoryRecord {
    /// Build the log entry for one completed profit calculation.
    pub fn profit_calculation(params: &OperatingParameters, result: &FinancialResult) -> Self {
        Self {
            kind: "profit_calculation".to_string(),
            values: params.clone(),
            results: ResultSummary {
                sales: result.sales,
                net_profit: result.net_profit,
                net_margin: result.net_margin_pct,
            },
            timestamp: String::new(),
        }
    }
}

/// File-backed, append-only history of calculations.
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    /// Open a store, loading every existing record into memory.
    /// A missing file is an empty history, not an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HistoryError> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<HistoryRecord> = if path.exists() {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str(&text)?
        } else {
            Vec::new()
        };
        debug!(records = records.len(), path = %path.display(), "history loaded");
        Ok(Self { path, records })
    }

    /// Stamp and append one record, rewriting the whole file.
    ///
    /// A failed write leaves the in-memory view unchanged, so a record is
    /// only ever observable after it has been persisted.
    pub fn append(&mut self, mut record: HistoryRecord) -> Result<(), HistoryError> {
        record.timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.records.push(record);
        match self.rewrite() {
            Ok(()) => {
                debug!(records = self.records.len(), "history appended");
                Ok(())
            }
            Err(e) => {
                self.records.pop();
                Err(e)
            }
        }
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rewrite(&self) -> Result<(), HistoryError> {
        let text = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
