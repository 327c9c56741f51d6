//! Application settings built from a [`ConfigPort`], with defaults for every key.

use crate::domain::classify::UnmatchedPolicy;
use crate::domain::error::TechdashError;
use crate::domain::pipeline::PipelineSettings;
use crate::domain::symbol::NSE_SUFFIX;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CATALOG_PATH: &str = "stock_symbols.csv";
pub const DEFAULT_SYMBOL_COLUMN: &str = "Symbol";
pub const DEFAULT_TIMEOUT_SECS: i64 = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const NSE_HOME_URL: &str = "https://www.nseindia.com/";
pub const NSE_QUOTE_URL: &str = "https://www.nseindia.com/api/quote-equity";
pub const MC_SEARCH_URL: &str =
    "https://www.moneycontrol.com/mccode/common/autosuggestion_solr.php";
pub const MC_INDICATOR_URL: &str = "https://priceapi.moneycontrol.com/pricefeed/techindicator/W/";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    pub path: PathBuf,
    pub column: String,
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS as u64),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub exchange_home: String,
    pub exchange_quote: String,
    pub aggregator_search: String,
    pub aggregator_indicators: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            exchange_home: NSE_HOME_URL.to_string(),
            exchange_quote: NSE_QUOTE_URL.to_string(),
            aggregator_search: MC_SEARCH_URL.to_string(),
            aggregator_indicators: MC_INDICATOR_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub catalog: CatalogSettings,
    pub http: HttpSettings,
    pub endpoints: Endpoints,
    pub pipeline: PipelineSettings,
    pub unmatched: UnmatchedPolicy,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            catalog: CatalogSettings {
                path: PathBuf::from(DEFAULT_CATALOG_PATH),
                column: DEFAULT_SYMBOL_COLUMN.to_string(),
                suffix: NSE_SUFFIX.to_string(),
            },
            http: HttpSettings::default(),
            endpoints: Endpoints::default(),
            pipeline: PipelineSettings::default(),
            unmatched: UnmatchedPolicy::default(),
        }
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> TechdashError {
    TechdashError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: reason.into(),
    }
}

fn string_or(config: &dyn ConfigPort, section: &str, key: &str, default: &str) -> String {
    config
        .get_string(section, key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn url_or(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: &str,
) -> Result<String, TechdashError> {
    let url = string_or(config, section, key, default);
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(invalid(section, key, "expected an http(s) URL"))
    }
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<AppSettings, TechdashError> {
    let timeout_secs = config
        .get_int("network", "timeout_secs")
        .map_err(|reason| invalid("network", "timeout_secs", reason))?
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs <= 0 {
        return Err(invalid("network", "timeout_secs", "must be greater than zero"));
    }

    let symbol_fallback = config
        .get_bool("resolution", "symbol_fallback")
        .map_err(|reason| invalid("resolution", "symbol_fallback", reason))?
        .unwrap_or(true);

    let unmatched = match config.get_string("classification", "unmatched") {
        Some(value) => value
            .parse::<UnmatchedPolicy>()
            .map_err(|reason| invalid("classification", "unmatched", reason))?,
        None => UnmatchedPolicy::default(),
    };

    let suffix = config
        .get_string("catalog", "suffix")
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| NSE_SUFFIX.to_string());

    Ok(AppSettings {
        catalog: CatalogSettings {
            path: PathBuf::from(string_or(config, "catalog", "path", DEFAULT_CATALOG_PATH)),
            column: string_or(config, "catalog", "column", DEFAULT_SYMBOL_COLUMN),
            suffix,
        },
        http: HttpSettings {
            timeout: Duration::from_secs(timeout_secs as u64),
            user_agent: string_or(config, "network", "user_agent", DEFAULT_USER_AGENT),
            accept_language: string_or(
                config,
                "network",
                "accept_language",
                DEFAULT_ACCEPT_LANGUAGE,
            ),
        },
        endpoints: Endpoints {
            exchange_home: url_or(config, "exchange", "home_url", NSE_HOME_URL)?,
            exchange_quote: url_or(config, "exchange", "quote_url", NSE_QUOTE_URL)?,
            aggregator_search: url_or(config, "aggregator", "search_url", MC_SEARCH_URL)?,
            aggregator_indicators: url_or(
                config,
                "aggregator",
                "indicator_url",
                MC_INDICATOR_URL,
            )?,
        },
        pipeline: PipelineSettings {
            symbol_fallback,
        },
        unmatched,
    })
}
