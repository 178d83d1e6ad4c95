//! Per-selection mood analysis.

use std::sync::Arc;

use mmi_core::{AppConfig, SymbolDirectory, UnknownLabelPolicy};
use mmi_market::QuoteClient;

use crate::aggregate::aggregate_mood;
use crate::error::SentimentError;
use crate::prediction::{InsightsSummarizer, SentimentClassifier};
use crate::sources::{primary_name_token, title_mentions, FeedClient};
use crate::types::{Article, FeedEntry, Insights, MoodReport};

/// Runs the full analysis for one stock selection.
///
/// Holds the collaborators and the symbol directory; every call to
/// [`MoodAnalyzer::analyze`] recomputes from scratch.
pub struct MoodAnalyzer {
    symbols: Arc<SymbolDirectory>,
    quotes: QuoteClient,
    feed: FeedClient,
    classifier: SentimentClassifier,
    insights: InsightsSummarizer,
    policy: UnknownLabelPolicy,
}

impl MoodAnalyzer {
    #[must_use]
    pub fn new(
        symbols: Arc<SymbolDirectory>,
        quotes: QuoteClient,
        feed: FeedClient,
        classifier: SentimentClassifier,
        insights: InsightsSummarizer,
        policy: UnknownLabelPolicy,
    ) -> Self {
        Self {
            symbols,
            quotes,
            feed,
            classifier,
            insights,
            policy,
        }
    }

    /// Build every collaborator from [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if any HTTP client cannot be constructed.
    pub fn from_config(
        config: &AppConfig,
        symbols: Arc<SymbolDirectory>,
    ) -> Result<Self, SentimentError> {
        Ok(Self::new(
            symbols,
            QuoteClient::from_config(config)?,
            FeedClient::from_config(config)?,
            SentimentClassifier::from_config(config)?,
            InsightsSummarizer::from_config(config)?,
            config.unknown_label_policy,
        ))
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolDirectory {
        &self.symbols
    }

    /// Analyze the stock with display name `name`.
    ///
    /// 1. Resolve the ticker from the symbol directory.
    /// 2. Fetch the quote.
    /// 3. Fetch the headline feed and keep titles mentioning the company.
    /// 4. Classify each kept headline, one request at a time.
    /// 5. Aggregate into the mood index.
    /// 6. Ask for insights.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Core`] if the name is not in the directory,
    /// or [`SentimentError::Quote`] / feed errors if those lookups fail.
    /// Classifier and insights failures degrade instead of erroring.
    pub async fn analyze(&self, name: &str) -> Result<MoodReport, SentimentError> {
        let symbol = self.symbols.resolve(name)?.clone();
        let ticker = symbol.ticker.as_str();
        tracing::info!(stock = name, ticker, "analyzing market mood");

        let quote = self.quotes.fetch_quote(ticker).await?;
        let articles = self.collect_articles(ticker, name).await?;

        let mood = aggregate_mood(articles.iter().map(|a| &a.sentiment), self.policy);
        tracing::info!(
            ticker,
            score = mood.score,
            total = mood.total,
            articles = mood.article_count,
            counted = mood.counted,
            unscored = mood.unscored,
            state = ?mood.state,
            "aggregated mood index"
        );

        let insights = if articles.is_empty() {
            tracing::info!(ticker, "no matching articles; skipping insights");
            Insights::Unavailable
        } else {
            self.insights.summarize(mood.score, &articles).await
        };

        Ok(MoodReport {
            symbol,
            quote,
            mood,
            articles,
            insights,
        })
    }

    /// Fetch the feed for `ticker` and classify headlines mentioning `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the feed cannot be fetched or parsed.
    pub async fn collect_articles(
        &self,
        ticker: &str,
        name: &str,
    ) -> Result<Vec<Article>, SentimentError> {
        let entries = self.feed.fetch_headlines(ticker).await?;
        let matching = filter_by_name(entries, name);
        tracing::debug!(ticker, matching = matching.len(), "filtered headlines");

        let mut articles = Vec::with_capacity(matching.len());
        for entry in matching {
            let sentiment = self
                .classifier
                .classify(name, &entry.title, entry.summary_text())
                .await;
            tracing::debug!(ticker, title = %entry.title, sentiment = %sentiment, "classified headline");
            articles.push(Article::from_entry(entry, sentiment));
        }
        Ok(articles)
    }
}

/// Keep entries whose title contains the primary token of `name`.
fn filter_by_name(entries: Vec<FeedEntry>, name: &str) -> Vec<FeedEntry> {
    let Some(token) = primary_name_token(name) else {
        return Vec::new();
    };
    entries
        .into_iter()
        .filter(|e| title_mentions(&e.title, &token))
        .collect()
}
