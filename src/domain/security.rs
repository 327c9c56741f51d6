//! Aggregator search query kinds and matches.

use serde::Serialize;
use std::fmt;

/// What the aggregator's autosuggest search is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Isin,
    Symbol,
}

impl QueryKind {
    /// Value of the search endpoint's `type` parameter.
    pub fn type_code(self) -> u8 {
        match self {
            QueryKind::Isin => 1,
            QueryKind::Symbol => 2,
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Isin => write!(f, "ISIN"),
            QueryKind::Symbol => write!(f, "symbol"),
        }
    }
}

/// First hit of an aggregator search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityMatch {
    pub sc_id: String,
    pub name: Option<String>,
}

impl SecurityMatch {
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => fallback,
        }
    }
}
