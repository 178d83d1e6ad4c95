use axum::{
    extract::State,
    Extension, Json,
};
use chrono::{DateTime, FixedOffset};
use mmi_market::Quote;
use mmi_sentiment::{Article, BadgeColor, Insights, MoodIndex, MoodReport};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::extract::ApiQuery;
use super::{map_analysis_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct MoodItem {
    pub name: String,
    pub ticker: String,
    pub quote: QuoteItem,
    pub mood: MoodIndex,
    pub insights: Insights,
    pub articles: Vec<ArticleItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct QuoteItem {
    pub short_name: String,
    pub website: String,
    pub long_business_summary: String,
    pub current_price: Decimal,
    pub previous_close: Decimal,
    pub change: Decimal,
    pub day_high: Decimal,
    pub day_low: Decimal,
}

#[derive(Debug, Serialize)]
pub(super) struct ArticleItem {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
    pub published_at: Option<DateTime<FixedOffset>>,
    pub sentiment: String,
    pub score: Option<i8>,
    pub badge_color: BadgeColor,
    pub badge_text: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct MoodQuery {
    pub name: Option<String>,
}

impl From<Quote> for QuoteItem {
    fn from(quote: Quote) -> Self {
        Self {
            change: quote.change(),
            short_name: quote.short_name,
            website: quote.website,
            long_business_summary: quote.long_business_summary,
            current_price: quote.current_price,
            previous_close: quote.previous_close,
            day_high: quote.day_high,
            day_low: quote.day_low,
        }
    }
}

impl From<Article> for ArticleItem {
    fn from(article: Article) -> Self {
        Self {
            sentiment: article.sentiment.label().to_string(),
            score: article.sentiment.score(),
            badge_color: article.sentiment.badge_color(),
            badge_text: article.sentiment.badge_text().to_string(),
            title: article.title,
            link: article.link,
            summary: article.summary,
            published: article.published,
            published_at: article.published_at,
        }
    }
}

impl From<MoodReport> for MoodItem {
    fn from(report: MoodReport) -> Self {
        Self {
            name: report.symbol.name,
            ticker: report.symbol.ticker,
            quote: report.quote.into(),
            mood: report.mood,
            insights: report.insights,
            articles: report.articles.into_iter().map(Into::into).collect(),
        }
    }
}

pub(super) async fn get_mood(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiQuery(query): ApiQuery<MoodQuery>,
) -> Result<Json<ApiResponse<MoodItem>>, ApiError> {
    let Some(name) = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
    else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "query parameter 'name' is required",
        ));
    };

    let report = state
        .analyzer
        .analyze(name)
        .await
        .map_err(|e| map_analysis_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: report.into(),
        meta: ResponseMeta::new(req_id.0),
    }))
}
