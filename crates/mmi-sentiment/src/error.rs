use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("headline feed error: {0}")]
    Feed(String),

    #[error("prediction error: {0}")]
    Prediction(String),

    #[error(transparent)]
    Core(#[from] mmi_core::CoreError),

    #[error(transparent)]
    Quote(#[from] mmi_market::QuoteError),
}
