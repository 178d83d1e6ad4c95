//! Market mood pipeline.
//!
//! Fetches a ticker's headline feed, keeps the headlines that mention the
//! company, classifies each one through the sentiment prediction endpoint,
//! folds the labels into a `[0, 1]` mood index, and asks the insights
//! endpoint for a short commentary.

pub mod aggregate;
pub mod error;
pub mod label;
pub mod pipeline;
pub mod prediction;
pub mod types;

mod sources;

pub use aggregate::{aggregate_mood, MoodIndex, MoodState, NEUTRAL_SCORE};
pub use error::SentimentError;
pub use label::{BadgeColor, Sentiment};
pub use pipeline::MoodAnalyzer;
pub use prediction::{InsightsSummarizer, PredictionClient, SentimentClassifier};
pub use sources::{primary_name_token, title_mentions, FeedClient};
pub use types::{Article, FeedEntry, Insights, MoodReport};
