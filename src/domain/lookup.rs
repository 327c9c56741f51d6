//! Three-way result of an external lookup.
//!
//! Upstream services are unreliable, so adapters never return errors for a
//! failed call. They report one of:
//! - `Resolved`: the value was found
//! - `NotFound`: the service answered but had nothing for the identifier
//! - `Unavailable`: the call failed (status, timeout, transport, bad body)

use crate::domain::error::LookupFailure;

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Resolved(T),
    NotFound,
    Unavailable(LookupFailure),
}

impl<T> Lookup<T> {
    /// Human-readable reason for a non-resolved lookup.
    pub fn reason(&self) -> Option<String> {
        match self {
            Lookup::Resolved(_) => None,
            Lookup::NotFound => Some("not found".to_string()),
            Lookup::Unavailable(failure) => Some(failure.to_string()),
        }
    }
}
