//! Clients for the hosted prediction endpoints.
//!
//! Both the sentiment classifier and the insights summarizer speak the same
//! protocol: `POST {"question": "..."}` with a bearer token, answered by
//! `{"text": "..."}`. [`PredictionClient`] handles the transport;
//! [`SentimentClassifier`] and [`InsightsSummarizer`] build the questions and
//! degrade failures into `Unavailable` values.

use std::time::Duration;

use mmi_core::AppConfig;
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::label::Sentiment;
use crate::types::{Article, Insights};

/// Bearer-authenticated client for one prediction endpoint.
pub struct PredictionClient {
    client: reqwest::Client,
    url: String,
    token: String,
}

#[derive(Serialize)]
struct PredictionRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct PredictionResponse {
    text: Option<String>,
}

impl PredictionClient {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        url: &str,
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            token: token.to_string(),
        })
    }

    /// Ask one question and return the `text` field of the answer.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Prediction`] if the request fails, the
    /// endpoint answers with a non-2xx status, or the body has no `text`.
    pub async fn predict(&self, question: &str) -> Result<String, SentimentError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&PredictionRequest { question })
            .send()
            .await
            .map_err(|e| SentimentError::Prediction(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::Prediction(format!(
                "endpoint returned status {}",
                response.status()
            )));
        }

        let body: PredictionResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::Prediction(format!("response parse error: {e}")))?;

        body.text
            .ok_or_else(|| SentimentError::Prediction("response has no text field".to_string()))
    }
}

/// Per-headline sentiment classification.
pub struct SentimentClassifier {
    prediction: PredictionClient,
}

impl SentimentClassifier {
    #[must_use]
    pub fn new(prediction: PredictionClient) -> Self {
        Self { prediction }
    }

    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        Ok(Self::new(PredictionClient::new(
            &config.sentiment_url,
            &config.flowise_api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )?))
    }

    /// # Errors
    ///
    /// Propagates [`PredictionClient::predict`] failures.
    pub async fn try_classify(
        &self,
        stock: &str,
        title: &str,
        summary: &str,
    ) -> Result<Sentiment, SentimentError> {
        let question = classify_question(stock, title, summary);
        let answer = self.prediction.predict(&question).await?;
        Ok(Sentiment::parse(&answer))
    }

    /// Classify a headline; any failure becomes [`Sentiment::Unavailable`].
    pub async fn classify(&self, stock: &str, title: &str, summary: &str) -> Sentiment {
        match self.try_classify(stock, title, summary).await {
            Ok(sentiment) => {
                if let Sentiment::Unknown(raw) = &sentiment {
                    tracing::warn!(stock, title, answer = %raw, "classifier answered outside the label set");
                }
                sentiment
            }
            Err(e) => {
                tracing::warn!(stock, title, error = %e, "sentiment classification failed");
                Sentiment::Unavailable
            }
        }
    }
}

#[must_use]
pub fn classify_question(stock: &str, title: &str, summary: &str) -> String {
    format!("Stock:{stock}, Title:{title}, Summary:{summary}")
}

/// Commentary over the scored batch.
pub struct InsightsSummarizer {
    prediction: PredictionClient,
}

#[derive(Serialize)]
struct InsightItem<'a> {
    summary: &'a str,
    sentiment: &'a str,
}

impl InsightsSummarizer {
    #[must_use]
    pub fn new(prediction: PredictionClient) -> Self {
        Self { prediction }
    }

    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        Ok(Self::new(PredictionClient::new(
            &config.insights_url,
            &config.flowise_api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )?))
    }

    /// # Errors
    ///
    /// Propagates [`PredictionClient::predict`] failures.
    pub async fn try_summarize(
        &self,
        score: f64,
        articles: &[Article],
    ) -> Result<String, SentimentError> {
        let question = insights_question(score, articles)?;
        let text = self.prediction.predict(&question).await?;
        Ok(text.trim().to_string())
    }

    /// Summarize the batch; failures and blank answers become
    /// [`Insights::Unavailable`].
    pub async fn summarize(&self, score: f64, articles: &[Article]) -> Insights {
        match self.try_summarize(score, articles).await {
            Ok(text) if !text.is_empty() => Insights::Available(text),
            Ok(_) => {
                tracing::warn!("insights endpoint returned an empty answer");
                Insights::Unavailable
            }
            Err(e) => {
                tracing::warn!(error = %e, "insights request failed");
                Insights::Unavailable
            }
        }
    }
}

/// `Final Score:{score},[{"summary": ..., "sentiment": ...}, ...]`
///
/// # Errors
///
/// Returns [`SentimentError::Json`] if the article list cannot be serialized.
pub fn insights_question(score: f64, articles: &[Article]) -> Result<String, SentimentError> {
    let items: Vec<InsightItem<'_>> = articles
        .iter()
        .map(|a| InsightItem {
            summary: &a.summary,
            sentiment: a.sentiment.label(),
        })
        .collect();
    let list = serde_json::to_string(&items)?;
    Ok(format!("Final Score:{score},{list}"))
}
