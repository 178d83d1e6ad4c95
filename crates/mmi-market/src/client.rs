//! HTTP client for the Yahoo Finance quote summary endpoint.
//!
//! Yahoo requires a session cookie plus a matching `crumb` query parameter.
//! The client keeps a cookie jar, hits the cookie URL once per lookup, then
//! asks for a crumb. A failed handshake is logged and the quote request goes
//! out without a crumb.

use std::time::Duration;

use mmi_core::AppConfig;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};

use crate::error::QuoteError;
use crate::types::{Quote, QuoteSummaryEnvelope};

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com/";
const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";
const MODULES: &str = "price,assetProfile";

/// Tickers keep `-` and `.` (`BRK-B`, `RDS.A`); everything else is encoded.
const TICKER_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.');

/// Client for quote and company metadata lookups.
pub struct QuoteClient {
    client: Client,
    base_url: Url,
    cookie_url: Option<String>,
}

impl QuoteClient {
    /// Creates a client pointed at the production Yahoo endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, QuoteError> {
        Self::with_base_url(
            DEFAULT_BASE_URL,
            Some(DEFAULT_COOKIE_URL),
            timeout_secs,
            user_agent,
        )
    }

    /// Creates a client from the endpoints and timeouts in [`AppConfig`].
    ///
    /// # Errors
    ///
    /// See [`QuoteClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, QuoteError> {
        let cookie_url = Some(config.quote_cookie_url.as_str()).filter(|u| !u.is_empty());
        Self::with_base_url(
            &config.quote_base_url,
            cookie_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// Passing `None` for `cookie_url` skips the cookie step of the handshake.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`QuoteError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        cookie_url: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, QuoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| QuoteError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            cookie_url: cookie_url.map(ToOwned::to_owned),
        })
    }

    /// Fetches price and company metadata for `ticker`.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::Api`] if the API returns an error object.
    /// - [`QuoteError::UnexpectedStatus`] on a non-2xx status without one.
    /// - [`QuoteError::NotFound`] if the result list is empty.
    /// - [`QuoteError::MissingField`] if a displayed field is absent.
    /// - [`QuoteError::Http`] / [`QuoteError::Deserialize`] on transport or
    ///   decoding failures.
    pub async fn fetch_quote(&self, ticker: &str) -> Result<Quote, QuoteError> {
        let crumb = self.fetch_crumb().await;
        let url = self.quote_summary_url(ticker, crumb.as_deref())?;

        tracing::debug!(ticker, has_crumb = crumb.is_some(), "fetching quote summary");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: Result<QuoteSummaryEnvelope, _> = serde_json::from_str(&body);
        let envelope = match envelope {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(QuoteError::UnexpectedStatus {
                    status: status.as_u16(),
                    ticker: ticker.to_string(),
                });
            }
            Err(e) => {
                return Err(QuoteError::Deserialize {
                    context: format!("quoteSummary({ticker})"),
                    source: e,
                });
            }
        };

        if let Some(err) = envelope.quote_summary.error {
            return Err(QuoteError::Api {
                ticker: ticker.to_string(),
                message: err.message(),
            });
        }
        if !status.is_success() {
            return Err(QuoteError::UnexpectedStatus {
                status: status.as_u16(),
                ticker: ticker.to_string(),
            });
        }

        let result = envelope
            .quote_summary
            .result
            .and_then(|rows| rows.into_iter().next())
            .ok_or_else(|| QuoteError::NotFound(ticker.to_string()))?;

        result.into_quote(ticker)
    }

    /// Runs the cookie + crumb handshake, returning `None` on any failure.
    async fn fetch_crumb(&self) -> Option<String> {
        if let Some(cookie_url) = &self.cookie_url {
            // The cookie endpoint usually answers 404; only the Set-Cookie matters.
            if let Err(e) = self.client.get(cookie_url).send().await {
                tracing::warn!(url = %cookie_url, error = %e, "quote cookie request failed");
            }
        }

        let url = self.base_url.join("v1/test/getcrumb").ok()?;
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "quote crumb request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "quote crumb request rejected");
            return None;
        }

        let crumb = response.text().await.ok()?;
        let crumb = crumb.trim();
        if is_plausible_crumb(crumb) {
            Some(crumb.to_string())
        } else {
            tracing::warn!("quote crumb response was not a crumb");
            None
        }
    }

    /// Builds `{base}/v10/finance/quoteSummary/{ticker}?modules=...[&crumb=...]`.
    fn quote_summary_url(&self, ticker: &str, crumb: Option<&str>) -> Result<Url, QuoteError> {
        let segment = utf8_percent_encode(ticker.trim(), TICKER_SEGMENT).to_string();
        let mut url = self
            .base_url
            .join(&format!("v10/finance/quoteSummary/{segment}"))
            .map_err(|e| QuoteError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("modules", MODULES);
            if let Some(crumb) = crumb {
                pairs.append_pair("crumb", crumb);
            }
        }
        Ok(url)
    }
}

fn is_plausible_crumb(s: &str) -> bool {
    !s.is_empty() && s.len() <= 64 && !s.contains(char::is_whitespace) && !s.contains('<')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> QuoteClient {
        QuoteClient::with_base_url(base_url, None, 30, "mmi-test")
            .expect("client construction should not fail")
    }

    #[test]
    fn quote_summary_url_without_crumb() {
        let client = test_client("https://query2.finance.yahoo.com");
        let url = client.quote_summary_url("AAPL", None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/AAPL?modules=price%2CassetProfile"
        );
    }

    #[test]
    fn quote_summary_url_with_crumb_and_trailing_slash() {
        let client = test_client("https://query2.finance.yahoo.com/");
        let url = client.quote_summary_url("BRK-B", Some("abc/123")).unwrap();
        assert!(
            url.as_str()
                .starts_with("https://query2.finance.yahoo.com/v10/finance/quoteSummary/BRK-B?"),
            "unexpected url: {url}"
        );
        assert!(url.as_str().ends_with("&crumb=abc%2F123"), "unexpected url: {url}");
    }

    #[test]
    fn quote_summary_url_encodes_index_symbols() {
        let client = test_client("https://query2.finance.yahoo.com");
        let url = client.quote_summary_url("^GSPC", None).unwrap();
        assert!(url.path().ends_with("/%5EGSPC"), "unexpected path: {}", url.path());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = QuoteClient::with_base_url("not a url", None, 30, "mmi-test");
        assert!(matches!(result, Err(QuoteError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn crumb_plausibility() {
        assert!(is_plausible_crumb("a1B2c3/D4e"));
        assert!(!is_plausible_crumb(""));
        assert!(!is_plausible_crumb("<html>Too Many Requests</html>"));
        assert!(!is_plausible_crumb("two words"));
    }
}
