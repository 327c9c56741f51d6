//! Market-data aggregator port trait.

use crate::domain::payload::IndicatorPayload;
use crate::domain::lookup::Lookup;
use crate::domain::security::{QueryKind, SecurityMatch};

pub trait AggregatorPort {
    /// Search the aggregator for a security by ISIN or raw symbol.
    fn search(&self, identifier: &str, kind: QueryKind) -> Lookup<SecurityMatch>;

    /// Fetch the weekly technical indicator feed for an aggregator security id.
    fn fetch_indicators(&self, sc_id: &str) -> Lookup<IndicatorPayload>;
}
