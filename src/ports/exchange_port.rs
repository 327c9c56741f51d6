//! Exchange information service port trait.

use crate::domain::lookup::Lookup;

pub trait ExchangePort {
    /// Resolve the ISIN for a ticker symbol.
    fn lookup_isin(&self, symbol: &str) -> Lookup<String>;
}
