//! Identifier resolution pipeline: symbol → ISIN → aggregator id → indicators.
//!
//! Each stage degrades to a [`Lookup`] instead of failing, so only two
//! outcomes end a symbol early: no aggregator id from any search mode
//! ([`TechdashError::Resolution`]) and a failed indicator fetch
//! ([`TechdashError::Fetch`]).

use crate::domain::error::TechdashError;
use crate::domain::lookup::Lookup;
use crate::domain::payload::IndicatorPayload;
use crate::domain::security::{QueryKind, SecurityMatch};
use crate::ports::aggregator_port::AggregatorPort;
use crate::ports::exchange_port::ExchangePort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Search by raw symbol when the ISIN search finds nothing.
    pub symbol_fallback: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            symbol_fallback: true,
        }
    }
}

/// Identifiers resolved for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSecurity {
    pub symbol: String,
    pub isin: Option<String>,
    pub security: SecurityMatch,
    /// Which search mode produced `security`.
    pub matched_by: QueryKind,
}

impl ResolvedSecurity {
    pub fn display_name(&self) -> &str {
        self.security.display_name(&self.symbol)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolIndicators {
    pub resolved: ResolvedSecurity,
    pub payload: IndicatorPayload,
}

pub struct Pipeline<'a> {
    exchange: &'a dyn ExchangePort,
    aggregator: &'a dyn AggregatorPort,
    settings: PipelineSettings,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        exchange: &'a dyn ExchangePort,
        aggregator: &'a dyn AggregatorPort,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            exchange,
            aggregator,
            settings,
        }
    }

    /// Stage 1: ISIN from the exchange. Never fails; a miss is logged.
    pub fn lookup_isin(&self, symbol: &str) -> Option<String> {
        match self.exchange.lookup_isin(symbol) {
            Lookup::Resolved(isin) => {
                log::info!("{}: ISIN {}", symbol, isin);
                Some(isin)
            }
            miss => {
                log::warn!(
                    "{}: ISIN lookup failed ({})",
                    symbol,
                    miss.reason().unwrap_or_default()
                );
                None
            }
        }
    }

    fn search(&self, symbol: &str, identifier: &str, kind: QueryKind) -> Option<SecurityMatch> {
        match self.aggregator.search(identifier, kind) {
            Lookup::Resolved(found) => {
                log::info!("{}: sc_id {} via {} search", symbol, found.sc_id, kind);
                Some(found)
            }
            miss => {
                log::warn!(
                    "{}: {} search for {} failed ({})",
                    symbol,
                    kind,
                    identifier,
                    miss.reason().unwrap_or_default()
                );
                None
            }
        }
    }

    /// Stages 1–2: ISIN, then aggregator id by ISIN, falling back to the
    /// raw symbol when enabled.
    pub fn resolve(&self, symbol: &str) -> Result<ResolvedSecurity, TechdashError> {
        let isin = self.lookup_isin(symbol);

        let by_isin = isin
            .as_deref()
            .and_then(|isin| self.search(symbol, isin, QueryKind::Isin))
            .map(|found| (found, QueryKind::Isin));

        let matched = match by_isin {
            Some(hit) => Some(hit),
            None if self.settings.symbol_fallback => self
                .search(symbol, symbol, QueryKind::Symbol)
                .map(|found| (found, QueryKind::Symbol)),
            None => None,
        };

        match matched {
            Some((security, matched_by)) => Ok(ResolvedSecurity {
                symbol: symbol.to_string(),
                isin,
                security,
                matched_by,
            }),
            None => Err(TechdashError::Resolution {
                symbol: symbol.to_string(),
            }),
        }
    }

    /// Stage 3: indicator payload for resolved identifiers.
    pub fn fetch(&self, resolved: ResolvedSecurity) -> Result<SymbolIndicators, TechdashError> {
        let sc_id = resolved.security.sc_id.clone();
        match self.aggregator.fetch_indicators(&sc_id) {
            Lookup::Resolved(payload) => Ok(SymbolIndicators { resolved, payload }),
            miss => {
                let reason = miss.reason().unwrap_or_default();
                log::warn!("{}: indicator fetch failed ({})", resolved.symbol, reason);
                Err(TechdashError::Fetch {
                    symbol: resolved.symbol,
                    sc_id,
                    reason,
                })
            }
        }
    }

    /// Full pipeline for one symbol.
    pub fn run(&self, symbol: &str) -> Result<SymbolIndicators, TechdashError> {
        let resolved = self.resolve(symbol)?;
        self.fetch(resolved)
    }

    /// Run symbols one after another. Each result is independent: a failure
    /// for one symbol does not stop the rest.
    pub fn run_all<'s, I>(&self, symbols: I) -> Vec<(String, Result<SymbolIndicators, TechdashError>)>
    where
        I: IntoIterator<Item = &'s str>,
    {
        symbols
            .into_iter()
            .map(|symbol| {
                log::info!("fetching data for {}", symbol);
                (symbol.to_string(), self.run(symbol))
            })
            .collect()
    }
}
