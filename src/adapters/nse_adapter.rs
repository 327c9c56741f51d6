//! NSE exchange adapter: ISIN lookup through the quote-equity API.
//!
//! The quote API answers only to clients holding the cookies set by the
//! homepage, so every lookup opens its own session, visits the homepage, and
//! then queries the API with the same cookie jar.

use crate::adapters::http::{browser_headers, build_client, failure, get_body};
use crate::domain::error::{LookupFailure, TechdashError};
use crate::domain::lookup::Lookup;
use crate::domain::settings::{Endpoints, HttpSettings};
use crate::ports::exchange_port::ExchangePort;
use reqwest::header::HeaderMap;
use serde_json::Value;

pub struct NseAdapter {
    headers: HeaderMap,
    settings: HttpSettings,
    home_url: String,
    quote_url: String,
}

impl NseAdapter {
    pub fn new(settings: &HttpSettings, endpoints: &Endpoints) -> Result<Self, TechdashError> {
        Ok(Self {
            headers: browser_headers(settings)?,
            settings: settings.clone(),
            home_url: endpoints.exchange_home.clone(),
            quote_url: endpoints.exchange_quote.clone(),
        })
    }
}

impl ExchangePort for NseAdapter {
    fn lookup_isin(&self, symbol: &str) -> Lookup<String> {
        let session = match build_client(&self.headers, &self.settings, true) {
            Ok(client) => client,
            Err(e) => return Lookup::Unavailable(failure(&e)),
        };

        // The homepage status does not matter, only its cookies.
        match session.get(&self.home_url).send() {
            Ok(response) => log::debug!("{} -> {}", self.home_url, response.status()),
            Err(e) => return Lookup::Unavailable(failure(&e)),
        }

        let request = session.get(&self.quote_url).query(&[("symbol", symbol)]);
        match get_body(request) {
            Ok(body) => parse_isin(&body),
            Err(err) => Lookup::Unavailable(err),
        }
    }
}

/// Extract `metadata.isin` from a quote-equity response body.
pub fn parse_isin(body: &str) -> Lookup<String> {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return Lookup::Unavailable(LookupFailure::Malformed(e.to_string())),
    };

    match value
        .get("metadata")
        .and_then(|m| m.get("isin"))
        .and_then(Value::as_str)
        .map(str::trim)
    {
        Some(isin) if !isin.is_empty() => Lookup::Resolved(isin.to_string()),
        _ => Lookup::NotFound,
    }
}
