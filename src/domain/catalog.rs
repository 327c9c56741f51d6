//! Load-once cache over a [`CatalogPort`].

use crate::domain::error::TechdashError;
use crate::ports::catalog_port::CatalogPort;

/// Caches the symbol list for as long as the value lives. A failed load
/// caches nothing, so the next call reads the source again.
pub struct SymbolCatalog<P: CatalogPort> {
    port: P,
    symbols: Option<Vec<String>>,
}

impl<P: CatalogPort> SymbolCatalog<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            symbols: None,
        }
    }

    /// Return the cached symbols, reading the source on first use.
    pub fn symbols(&mut self) -> Result<&[String], TechdashError> {
        if self.symbols.is_none() {
            let loaded = self.port.load_symbols()?;
            if loaded.is_empty() {
                return Err(TechdashError::CatalogLoad {
                    path: self.port.describe(),
                    reason: "no symbols found".into(),
                });
            }
            log::info!("loaded {} symbols from {}", loaded.len(), self.port.describe());
            self.symbols = Some(loaded);
        }
        Ok(self.symbols.as_deref().unwrap_or_default())
    }

    /// Drop the cache and read the source again.
    pub fn reload(&mut self) -> Result<&[String], TechdashError> {
        self.symbols = None;
        self.symbols()
    }

    /// Symbols loaded so far; empty when nothing has loaded successfully.
    pub fn cached(&self) -> &[String] {
        self.symbols.as_deref().unwrap_or_default()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.cached().iter().any(|s| s == symbol)
    }
}
