//! Domain error types.

/// Why an external lookup produced no value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupFailure {
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Top-level error type for techdash.
#[derive(Debug, thiserror::Error)]
pub enum TechdashError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to load symbol catalog from {path}: {reason}")]
    CatalogLoad { path: String, reason: String },

    #[error("symbol {symbol} is not in the catalog")]
    UnknownSymbol { symbol: String },

    #[error("could not find {symbol} on the aggregator")]
    Resolution { symbol: String },

    #[error("failed to fetch technical indicators for {symbol} (sc_id {sc_id}): {reason}")]
    Fetch {
        symbol: String,
        sc_id: String,
        reason: String,
    },

    #[error("invalid indicator payload: {reason}")]
    Payload { reason: String },

    #[error("unexpected error: {reason}")]
    Unexpected { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TechdashError> for std::process::ExitCode {
    fn from(err: &TechdashError) -> Self {
        let code: u8 = match err {
            TechdashError::Io(_) | TechdashError::Unexpected { .. } => 1,
            TechdashError::ConfigParse { .. } | TechdashError::ConfigInvalid { .. } => 2,
            TechdashError::CatalogLoad { .. } => 3,
            TechdashError::UnknownSymbol { .. } | TechdashError::Resolution { .. } => 4,
            TechdashError::Fetch { .. } => 5,
            TechdashError::Payload { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
