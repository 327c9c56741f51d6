//! Ticker symbol normalisation.

use std::collections::HashSet;

/// Suffix the catalog file uses to mark National Stock Exchange listings.
pub const NSE_SUFFIX: &str = ".NS";

/// Strip every trailing occurrence of `suffix` (case-insensitive) and
/// surrounding whitespace, then uppercase. The result never ends in the
/// suffix, so applying it twice is the same as applying it once.
pub fn strip_exchange_suffix(raw: &str, suffix: &str) -> String {
    let suffix = suffix.trim().to_uppercase();
    let mut symbol = raw.trim().to_uppercase();

    if suffix.is_empty() {
        return symbol;
    }

    while let Some(stripped) = symbol.strip_suffix(&suffix) {
        symbol = stripped.trim().to_string();
    }
    symbol
}

/// Normalise raw values into distinct symbols, keeping first-seen order and
/// dropping blanks.
pub fn distinct_symbols<I, S>(raw: I, suffix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut symbols = Vec::new();

    for value in raw {
        let symbol = strip_exchange_suffix(value.as_ref(), suffix);
        if symbol.is_empty() || !seen.insert(symbol.clone()) {
            continue;
        }
        symbols.push(symbol);
    }

    symbols
}
