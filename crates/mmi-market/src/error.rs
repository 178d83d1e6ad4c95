use thiserror::Error;

/// Errors returned by the quote client.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The quote API answered with an `error` object.
    #[error("quote API error for {ticker}: {message}")]
    Api { ticker: String, message: String },

    /// Non-2xx status without a parseable API error.
    #[error("unexpected HTTP status {status} fetching quote for {ticker}")]
    UnexpectedStatus { status: u16, ticker: String },

    /// The API answered successfully but with no result rows.
    #[error("no quote data returned for {0}")]
    NotFound(String),

    /// A field the dashboard displays was absent from the response.
    #[error("quote for {ticker} is missing field {field}")]
    MissingField { ticker: String, field: &'static str },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
