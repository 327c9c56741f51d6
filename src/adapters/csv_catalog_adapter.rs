//! CSV symbol catalog adapter.
//!
//! Reads one named column (default `Symbol`) from a CSV file with a header
//! row and strips the exchange suffix from each value.

use crate::domain::error::TechdashError;
use crate::domain::settings::CatalogSettings;
use crate::domain::symbol::distinct_symbols;
use crate::ports::catalog_port::CatalogPort;
use std::path::PathBuf;

pub struct CsvCatalogAdapter {
    path: PathBuf,
    column: String,
    suffix: String,
}

impl CsvCatalogAdapter {
    pub fn new(path: PathBuf, column: &str, suffix: &str) -> Self {
        Self {
            path,
            column: column.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn from_settings(settings: &CatalogSettings) -> Self {
        Self::new(settings.path.clone(), &settings.column, &settings.suffix)
    }

    fn load_error(&self, reason: impl Into<String>) -> TechdashError {
        TechdashError::CatalogLoad {
            path: self.path.display().to_string(),
            reason: reason.into(),
        }
    }
}

impl CatalogPort for CsvCatalogAdapter {
    fn load_symbols(&self) -> Result<Vec<String>, TechdashError> {
        let mut rdr = csv::Reader::from_path(&self.path)
            .map_err(|e| self.load_error(format!("failed to open: {}", e)))?;

        let headers = rdr
            .headers()
            .map_err(|e| self.load_error(format!("failed to read header: {}", e)))?
            .clone();

        let index = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == self.column)
            .ok_or_else(|| self.load_error(format!("missing column '{}'", self.column)))?;

        let mut raw = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| self.load_error(format!("CSV parse error: {}", e)))?;
            if let Some(value) = record.get(index) {
                raw.push(value.to_string());
            }
        }

        Ok(distinct_symbols(raw, &self.suffix))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
