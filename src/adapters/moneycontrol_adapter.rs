//! MoneyControl aggregator adapter: autosuggest search and the weekly
//! technical indicator feed.

use crate::adapters::http::{browser_headers, build_client, get_body};
use crate::domain::error::{LookupFailure, TechdashError};
use crate::domain::lookup::Lookup;
use crate::domain::payload::IndicatorPayload;
use crate::domain::security::{QueryKind, SecurityMatch};
use crate::domain::settings::{Endpoints, HttpSettings};
use crate::ports::aggregator_port::AggregatorPort;
use reqwest::blocking::Client;
use serde_json::Value;

pub struct MoneyControlAdapter {
    client: Client,
    search_url: String,
    indicator_url: String,
}

impl MoneyControlAdapter {
    pub fn new(settings: &HttpSettings, endpoints: &Endpoints) -> Result<Self, TechdashError> {
        let headers = browser_headers(settings)?;
        let client = build_client(&headers, settings, false).map_err(|e| {
            TechdashError::Unexpected {
                reason: format!("failed to create HTTP client: {}", e),
            }
        })?;
        Ok(Self {
            client,
            search_url: endpoints.aggregator_search.clone(),
            indicator_url: endpoints.aggregator_indicators.clone(),
        })
    }

    fn indicator_feed_url(&self, sc_id: &str) -> String {
        format!(
            "{}/{}",
            self.indicator_url.trim_end_matches('/'),
            urlencoding::encode(sc_id)
        )
    }
}

impl AggregatorPort for MoneyControlAdapter {
    fn search(&self, identifier: &str, kind: QueryKind) -> Lookup<SecurityMatch> {
        let type_code = kind.type_code().to_string();
        let request = self.client.get(&self.search_url).query(&[
            ("classic", "true"),
            ("query", identifier),
            ("type", type_code.as_str()),
            ("format", "json"),
        ]);

        match get_body(request) {
            Ok(body) => parse_search(&body),
            Err(err) => Lookup::Unavailable(err),
        }
    }

    fn fetch_indicators(&self, sc_id: &str) -> Lookup<IndicatorPayload> {
        let url = self.indicator_feed_url(sc_id);
        let body = match get_body(self.client.get(&url)) {
            Ok(body) => body,
            Err(err) => return Lookup::Unavailable(err),
        };

        match IndicatorPayload::parse(&body) {
            Ok(payload) if payload.is_empty() => Lookup::NotFound,
            Ok(payload) => Lookup::Resolved(payload),
            Err(e) => Lookup::Unavailable(LookupFailure::Malformed(e.to_string())),
        }
    }
}

/// Take the first hit of an autosuggest response.
pub fn parse_search(body: &str) -> Lookup<SecurityMatch> {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return Lookup::Unavailable(LookupFailure::Malformed(e.to_string())),
    };

    let Some(items) = value.as_array() else {
        return Lookup::Unavailable(LookupFailure::Malformed(
            "expected a JSON array".to_string(),
        ));
    };
    let Some(first) = items.first() else {
        return Lookup::NotFound;
    };

    let sc_id = match first.get("sc_id") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            return Lookup::Unavailable(LookupFailure::Malformed(
                "first result has no sc_id".to_string(),
            ));
        }
    };
    if sc_id.is_empty() {
        return Lookup::NotFound;
    }

    let name = first
        .get("stock_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    Lookup::Resolved(SecurityMatch { sc_id, name })
}
