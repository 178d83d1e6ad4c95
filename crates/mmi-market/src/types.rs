//! Quote summary wire types and the flattened [`Quote`] the dashboard shows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Price and company metadata for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub ticker: String,
    pub short_name: String,
    pub website: String,
    pub long_business_summary: String,
    pub current_price: Decimal,
    pub previous_close: Decimal,
    pub day_high: Decimal,
    pub day_low: Decimal,
}

impl Quote {
    /// Current price minus previous close.
    #[must_use]
    pub fn change(&self) -> Decimal {
        self.current_price - self.previous_close
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteSummaryBody {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<QuoteApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl QuoteApiError {
    pub(crate) fn message(&self) -> String {
        match (&self.code, &self.description) {
            (_, Some(desc)) if !desc.is_empty() => desc.clone(),
            (Some(code), _) => code.clone(),
            _ => "unknown error".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteSummaryResult {
    #[serde(default)]
    pub price: Option<PriceModule>,
    #[serde(default)]
    pub asset_profile: Option<AssetProfileModule>,
}

/// Yahoo wraps numbers as `{ "raw": 1.23, "fmt": "1.23" }`; missing values
/// come back as `{}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawValue {
    #[serde(default)]
    pub raw: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PriceModule {
    #[serde(default)]
    pub regular_market_price: Option<RawValue>,
    #[serde(default)]
    pub regular_market_previous_close: Option<RawValue>,
    #[serde(default)]
    pub regular_market_day_high: Option<RawValue>,
    #[serde(default)]
    pub regular_market_day_low: Option<RawValue>,
    #[serde(default)]
    pub short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssetProfileModule {
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub long_business_summary: Option<String>,
}

impl QuoteSummaryResult {
    /// Flatten the modules into a [`Quote`].
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::MissingField`] naming the first absent field.
    pub(crate) fn into_quote(self, ticker: &str) -> Result<Quote, QuoteError> {
        let missing = |field: &'static str| QuoteError::MissingField {
            ticker: ticker.to_string(),
            field,
        };
        let number = |value: Option<RawValue>, field: &'static str| {
            value.and_then(|v| v.raw).ok_or_else(|| missing(field))
        };
        let text = |value: Option<String>, field: &'static str| {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| missing(field))
        };

        let price = self.price.ok_or_else(|| missing("price"))?;
        let profile = self.asset_profile.ok_or_else(|| missing("assetProfile"))?;

        Ok(Quote {
            ticker: ticker.to_string(),
            short_name: text(price.short_name, "shortName")?,
            website: text(profile.website, "website")?,
            long_business_summary: text(profile.long_business_summary, "longBusinessSummary")?,
            current_price: number(price.regular_market_price, "currentPrice")?,
            previous_close: number(price.regular_market_previous_close, "previousClose")?,
            day_high: number(price.regular_market_day_high, "dayHigh")?,
            day_low: number(price.regular_market_day_low, "dayLow")?,
        })
    }
}
