#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use serde_json::Value;
use techdash::domain::error::LookupFailure;
use techdash::domain::lookup::Lookup;
use techdash::domain::payload::IndicatorPayload;
use techdash::domain::security::{QueryKind, SecurityMatch};
use techdash::ports::aggregator_port::AggregatorPort;
use techdash::ports::exchange_port::ExchangePort;

pub const SAMPLE_PAYLOAD: &str = r#"{"data":{"priceinfo":{"lastprice":100,"change":2,"percentchange":2.04,"high":102,"low":97},"techindicator":[{"name":"RSI(14)","value":55,"signal":"Neutral","action":"Hold"},{"name":"20 Day MA","value":98,"signal":"Buy","action":"Buy"}]}}"#;

pub fn sample_payload() -> IndicatorPayload {
    IndicatorPayload::parse(SAMPLE_PAYLOAD).unwrap()
}

pub struct MockExchange {
    pub isins: HashMap<String, Lookup<String>>,
    pub calls: RefCell<Vec<String>>,
}

impl MockExchange {
    pub fn new() -> Self {
        Self {
            isins: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_isin(mut self, symbol: &str, isin: &str) -> Self {
        self.isins
            .insert(symbol.to_string(), Lookup::Resolved(isin.to_string()));
        self
    }

    pub fn with_failure(mut self, symbol: &str, failure: LookupFailure) -> Self {
        self.isins
            .insert(symbol.to_string(), Lookup::Unavailable(failure));
        self
    }
}

impl ExchangePort for MockExchange {
    fn lookup_isin(&self, symbol: &str) -> Lookup<String> {
        self.calls.borrow_mut().push(symbol.to_string());
        self.isins.get(symbol).cloned().unwrap_or(Lookup::NotFound)
    }
}

/// Search answers keyed by (identifier, kind); anything else is not found.
pub struct MockAggregator {
    pub matches: HashMap<(String, u8), Lookup<SecurityMatch>>,
    pub payloads: HashMap<String, Lookup<IndicatorPayload>>,
    pub searches: RefCell<Vec<(String, QueryKind)>>,
    pub fetches: RefCell<Vec<String>>,
}

impl MockAggregator {
    pub fn new() -> Self {
        Self {
            matches: HashMap::new(),
            payloads: HashMap::new(),
            searches: RefCell::new(Vec::new()),
            fetches: RefCell::new(Vec::new()),
        }
    }

    pub fn with_match(mut self, identifier: &str, kind: QueryKind, sc_id: &str, name: &str) -> Self {
        self.matches.insert(
            (identifier.to_string(), kind.type_code()),
            Lookup::Resolved(SecurityMatch {
                sc_id: sc_id.to_string(),
                name: Some(name.to_string()),
            }),
        );
        self
    }

    pub fn with_search_failure(mut self, identifier: &str, kind: QueryKind, failure: LookupFailure) -> Self {
        self.matches.insert(
            (identifier.to_string(), kind.type_code()),
            Lookup::Unavailable(failure),
        );
        self
    }

    pub fn with_payload(mut self, sc_id: &str, payload: IndicatorPayload) -> Self {
        self.payloads
            .insert(sc_id.to_string(), Lookup::Resolved(payload));
        self
    }

    pub fn with_fetch_failure(mut self, sc_id: &str, failure: LookupFailure) -> Self {
        self.payloads
            .insert(sc_id.to_string(), Lookup::Unavailable(failure));
        self
    }

    pub fn search_log(&self) -> Vec<(String, QueryKind)> {
        self.searches.borrow().clone()
    }

    pub fn fetch_log(&self) -> Vec<String> {
        self.fetches.borrow().clone()
    }
}

impl AggregatorPort for MockAggregator {
    fn search(&self, identifier: &str, kind: QueryKind) -> Lookup<SecurityMatch> {
        self.searches
            .borrow_mut()
            .push((identifier.to_string(), kind));
        self.matches
            .get(&(identifier.to_string(), kind.type_code()))
            .cloned()
            .unwrap_or(Lookup::NotFound)
    }

    fn fetch_indicators(&self, sc_id: &str) -> Lookup<IndicatorPayload> {
        self.fetches.borrow_mut().push(sc_id.to_string());
        self.payloads
            .get(sc_id)
            .cloned()
            .unwrap_or(Lookup::NotFound)
    }
}

/// A request as seen by [`TestServer`].
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub headers: HashMap<String, String>,
}

pub struct Reply {
    pub status: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: vec![("Content-Type".into(), "application/json".into())],
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Minimal HTTP/1.1 responder on a loopback port. Each connection gets one
/// reply from `handler` and is then closed.
pub struct TestServer {
    pub base_url: String,
}

impl TestServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&SeenRequest) -> Reply + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let Some(request) = read_request(&mut BufReader::new(&stream)) else {
                    continue;
                };
                let reply = handler(&request);
                let mut response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                    reply.status,
                    reason_phrase(reply.status),
                    reply.body.len()
                );
                for (name, value) in &reply.headers {
                    response.push_str(&format!("{}: {}\r\n", name, value));
                }
                response.push_str("\r\n");
                response.push_str(&reply.body);
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://{}", addr),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn read_request<R: BufRead>(reader: &mut R) -> Option<SeenRequest> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let path = request_line.split_whitespace().nth(1)?.to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_lowercase(), value.trim().to_string());
        }
    }

    Some(SeenRequest { path, headers })
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

pub fn json_value(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}
