use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayoutError {
    #[error("upstream request failed: status {status}, trace id {}, body: {body}", .trace_id.as_deref().unwrap_or("unknown"))]
    Upstream {
        status: u16,
        trace_id: Option<String>,
        body: String,
    },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("no profiles available for this token")]
    EmptyProfileList,

    #[error("quote has no BANK_TRANSFER/BANK_TRANSFER payment option")]
    NoBankTransferOption,

    #[error("computation error: {message}")]
    Computation { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, PayoutError>;
