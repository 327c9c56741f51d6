//! Categorised indicator report assembled from a fetched payload.

use crate::domain::classify::{CategoryGroup, Classifier};
use crate::domain::payload::{IndicatorPayload, PriceInfo};
use crate::domain::pipeline::SymbolIndicators;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReport {
    pub symbol: String,
    pub name: String,
    pub isin: Option<String>,
    pub sc_id: Option<String>,
    pub price: Option<PriceInfo>,
    pub groups: Vec<CategoryGroup>,
    pub indicator_count: usize,
    #[serde(skip)]
    pub raw: IndicatorPayload,
    pub generated_at: NaiveDateTime,
}

impl IndicatorReport {
    pub fn from_payload(
        symbol: &str,
        name: &str,
        payload: IndicatorPayload,
        classifier: &Classifier,
        generated_at: NaiveDateTime,
    ) -> Self {
        let records = payload.indicators();
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            isin: None,
            sc_id: None,
            price: payload.price_info(),
            groups: classifier.group(&records),
            indicator_count: records.len(),
            raw: payload,
            generated_at,
        }
    }

    pub fn from_indicators(
        fetched: SymbolIndicators,
        classifier: &Classifier,
        generated_at: NaiveDateTime,
    ) -> Self {
        let resolved = fetched.resolved;
        let mut report = Self::from_payload(
            &resolved.symbol,
            resolved.display_name(),
            fetched.payload,
            classifier,
            generated_at,
        );
        report.isin = resolved.isin;
        report.sc_id = Some(resolved.security.sc_id);
        report
    }

    pub fn has_indicators(&self) -> bool {
        self.indicator_count > 0
    }

    /// Groups that hold at least one indicator.
    pub fn non_empty_groups(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.groups.iter().filter(|g| !g.indicators.is_empty())
    }
}
