use chrono::{DateTime, FixedOffset};
use mmi_core::Symbol;
use mmi_market::Quote;
use serde::Serialize;

use crate::aggregate::MoodIndex;
use crate::label::Sentiment;

const NO_SUMMARY: &str = "No summary available";
const NO_PUBLISH_DATE: &str = "No publish date available";

/// One `<item>` of a headline feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Plain-text description, HTML stripped.
    pub summary: Option<String>,
    /// Raw `pubDate` text.
    pub published: Option<String>,
}

impl FeedEntry {
    /// `pubDate` parsed as RFC 2822, if present and well-formed.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.published
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc2822(raw.trim()).ok())
    }

    #[must_use]
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or(NO_SUMMARY)
    }
}

/// A headline that mentions the selected company, with its verdict.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
    pub published_at: Option<DateTime<FixedOffset>>,
    pub sentiment: Sentiment,
}

impl Article {
    #[must_use]
    pub fn from_entry(entry: FeedEntry, sentiment: Sentiment) -> Self {
        let published_at = entry.published_at();
        Self {
            summary: entry.summary.unwrap_or_else(|| NO_SUMMARY.to_string()),
            published: entry
                .published
                .unwrap_or_else(|| NO_PUBLISH_DATE.to_string()),
            published_at,
            title: entry.title,
            link: entry.link,
            sentiment,
        }
    }
}

/// Insights commentary, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Insights {
    Available(String),
    Unavailable,
}

impl Insights {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Insights::Available(text) => Some(text),
            Insights::Unavailable => None,
        }
    }
}

/// Everything the dashboard renders for one stock selection.
#[derive(Debug, Clone, Serialize)]
pub struct MoodReport {
    pub symbol: Symbol,
    pub quote: Quote,
    pub mood: MoodIndex,
    pub articles: Vec<Article>,
    pub insights: Insights,
}
