//! Shared blocking HTTP plumbing for the upstream adapters.

use crate::domain::error::{LookupFailure, TechdashError};
use crate::domain::settings::HttpSettings;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};

/// Browser-like headers. Both upstreams reject requests without them.
pub fn browser_headers(settings: &HttpSettings) -> Result<HeaderMap, TechdashError> {
    let user_agent = HeaderValue::from_str(&settings.user_agent).map_err(|e| {
        TechdashError::ConfigInvalid {
            section: "network".into(),
            key: "user_agent".into(),
            reason: e.to_string(),
        }
    })?;
    let accept_language = HeaderValue::from_str(&settings.accept_language).map_err(|e| {
        TechdashError::ConfigInvalid {
            section: "network".into(),
            key: "accept_language".into(),
            reason: e.to_string(),
        }
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, user_agent);
    headers.insert(ACCEPT_LANGUAGE, accept_language);
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    Ok(headers)
}

/// Build a client with the header set and timeout. With `cookies` the client
/// keeps its own cookie jar, which is the session for the exchange.
pub fn build_client(
    headers: &HeaderMap,
    settings: &HttpSettings,
    cookies: bool,
) -> reqwest::Result<Client> {
    Client::builder()
        .default_headers(headers.clone())
        .timeout(settings.timeout)
        .cookie_store(cookies)
        .build()
}

pub fn failure(err: &reqwest::Error) -> LookupFailure {
    if err.is_timeout() {
        LookupFailure::Timeout
    } else if let Some(status) = err.status() {
        LookupFailure::Status(status.as_u16())
    } else {
        LookupFailure::Transport(err.to_string())
    }
}

/// Send a request and return the body of a 200 response.
pub fn get_body(request: RequestBuilder) -> Result<String, LookupFailure> {
    let response = request.send().map_err(|e| failure(&e))?;
    let status = response.status();
    log::debug!("{} -> {}", response.url(), status);

    if status != reqwest::StatusCode::OK {
        return Err(LookupFailure::Status(status.as_u16()));
    }
    response.text().map_err(|e| failure(&e))
}
