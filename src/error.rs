use thiserror::Error;

/// Errors surfaced by the chain fetchers and the risk analyzer.
#[derive(Debug, Error)]
pub enum AmlError {
    /// Non-success HTTP status from an upstream chain API.
    #[error("upstream API returned {status}: {body}")]
    Fetch { status: u16, body: String },

    /// Well-formed HTTP response whose payload cannot be used.
    #[error("unusable upstream response: {0}")]
    BadResponse(String),

    /// No transactions to analyze where at least one is required.
    #[error("no transactions found for address {address}")]
    MissingData { address: String },

    /// A transaction record is missing or fails to parse an expected field.
    /// Fails the whole analysis rather than silently skipping the record.
    #[error("malformed transaction record: bad or missing `{field}`")]
    MalformedData { field: &'static str },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
