//! Company display name → ticker reference directory.
//!
//! Loaded once at startup from a CSV file with `name` and `ticker` header
//! columns. Extra columns are ignored. Rows with a blank name or ticker are
//! skipped, and a repeated name keeps the ticker from its first row, so the
//! directory preserves file order with unique names.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// One row of the reference directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub ticker: String,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolDirectory {
    symbols: Vec<Symbol>,
    by_name: HashMap<String, usize>,
}

impl SymbolDirectory {
    /// Load the directory from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SymbolFile`] if the file cannot be opened or a
    /// row cannot be decoded.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let file = std::fs::File::open(path).map_err(|e| CoreError::SymbolFile {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        let directory = Self::from_reader(file).map_err(|e| CoreError::SymbolFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(
            path = %path.display(),
            count = directory.len(),
            "loaded symbol directory"
        );
        Ok(directory)
    }

    /// Parse CSV content from any reader.
    ///
    /// Short rows are treated as having blank trailing columns, so a row
    /// without a ticker is skipped rather than failing the whole file.
    ///
    /// # Errors
    ///
    /// Returns a [`csv::Error`] if the header is missing a required column or
    /// the input is not readable CSV.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?;
        let column = |wanted: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(wanted));
        let (Some(name_col), Some(ticker_col)) = (column("name"), column("ticker")) else {
            return Err(csv::Error::from(io::Error::new(
                io::ErrorKind::InvalidData,
                "symbol file header must contain name and ticker columns",
            )));
        };

        let mut symbols = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let name = record.get(name_col).unwrap_or_default();
            let ticker = record.get(ticker_col).unwrap_or_default();
            if name.is_empty() || ticker.is_empty() {
                tracing::debug!(
                    line = record.position().map(csv::Position::line),
                    name,
                    ticker,
                    "skipping symbol row with blank name or ticker"
                );
                continue;
            }
            symbols.push(Symbol {
                name: name.to_string(),
                ticker: ticker.to_string(),
            });
        }
        Ok(Self::from_symbols(symbols))
    }

    /// Build a directory from already-parsed rows, applying the same
    /// blank-skipping and first-wins dedup as [`Self::from_reader`].
    #[must_use]
    pub fn from_symbols(rows: impl IntoIterator<Item = Symbol>) -> Self {
        let mut directory = Self::default();
        for row in rows {
            if row.name.is_empty() || row.ticker.is_empty() {
                continue;
            }
            if directory.by_name.contains_key(&row.name) {
                continue;
            }
            directory
                .by_name
                .insert(row.name.clone(), directory.symbols.len());
            directory.symbols.push(row);
        }
        directory
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Exact display-name lookup.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.by_name.get(name).map(|&i| &self.symbols[i])
    }

    /// Resolve a display name to its directory entry.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TickerNotFound`] if the name is not in the directory.
    pub fn resolve(&self, name: &str) -> Result<&Symbol, CoreError> {
        self.lookup(name)
            .ok_or_else(|| CoreError::TickerNotFound(name.to_string()))
    }

    /// Case-insensitive search over names and tickers.
    ///
    /// An exact ticker hit sorts first; the rest keep directory order. An
    /// empty query returns the first `limit` entries.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Symbol> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.symbols.iter().take(limit).collect();
        }

        let mut hits: Vec<&Symbol> = self
            .symbols
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle) || s.ticker.to_lowercase().contains(&needle)
            })
            .collect();
        hits.sort_by_key(|s| !s.ticker.eq_ignore_ascii_case(&needle));
        hits.truncate(limit);
        hits
    }
}
