//! End-to-end analysis against wiremock stand-ins for every external service.

use std::sync::Arc;

use mmi_core::{Symbol, SymbolDirectory, UnknownLabelPolicy};
use mmi_market::QuoteClient;
use mmi_sentiment::{
    FeedClient, Insights, InsightsSummarizer, MoodAnalyzer, MoodState, PredictionClient,
    Sentiment, SentimentClassifier, SentimentError,
};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
  <item>
    <title>Apple beats estimates on iPhone demand</title>
    <link>https://finance.yahoo.com/news/apple-beats.html</link>
    <description>Record services revenue.</description>
    <pubDate>Tue, 14 Oct 2025 13:05:00 +0000</pubDate>
  </item>
  <item>
    <title>Apple suppliers flag weaker orders</title>
    <link>https://finance.yahoo.com/news/apple-suppliers.html</link>
    <description>Component makers trim outlook.</description>
  </item>
  <item>
    <title>Microsoft Azure growth accelerates</title>
    <link>https://finance.yahoo.com/news/msft-azure.html</link>
  </item>
  <item>
    <title>Apple faces new antitrust inquiry</title>
    <link>https://finance.yahoo.com/news/apple-antitrust.html</link>
  </item>
</channel></rss>"#;

fn quote_body() -> serde_json::Value {
    serde_json::json!({
        "quoteSummary": {
            "result": [{
                "price": {
                    "regularMarketPrice": { "raw": 189.5 },
                    "regularMarketPreviousClose": { "raw": 187.25 },
                    "regularMarketDayHigh": { "raw": 190.1 },
                    "regularMarketDayLow": { "raw": 186.4 },
                    "shortName": "Apple Inc."
                },
                "assetProfile": {
                    "website": "https://www.apple.com",
                    "longBusinessSummary": "Apple Inc. designs smartphones."
                }
            }],
            "error": null
        }
    })
}

fn directory() -> Arc<SymbolDirectory> {
    Arc::new(SymbolDirectory::from_symbols([
        Symbol {
            name: "Apple Inc.".to_string(),
            ticker: "AAPL".to_string(),
        },
        Symbol {
            name: "Quiet Corp".to_string(),
            ticker: "QUIET".to_string(),
        },
    ]))
}

fn analyzer(server: &MockServer, policy: UnknownLabelPolicy) -> MoodAnalyzer {
    let base = server.uri();
    let prediction = |endpoint: &str| {
        PredictionClient::new(&format!("{base}/prediction/{endpoint}"), "test-token", 5, "mmi-test")
            .expect("prediction client")
    };
    MoodAnalyzer::new(
        directory(),
        QuoteClient::with_base_url(&base, None, 5, "mmi-test").expect("quote client"),
        FeedClient::with_feed_url(&format!("{base}/rss/2.0/headline"), 5, "mmi-test")
            .expect("feed client"),
        SentimentClassifier::new(prediction("sentiment")),
        InsightsSummarizer::new(prediction("insights")),
        policy,
    )
}

async fn mount_quote_and_feed(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rss/2.0/headline"))
        .and(query_param("s", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .mount(server)
        .await;
}

async fn mount_label(server: &MockServer, title_fragment: &str, label: &str) {
    Mock::given(method("POST"))
        .and(path("/prediction/sentiment"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_string_contains(title_fragment))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": label })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn analyze_scores_matching_headlines_and_fetches_insights() {
    let server = MockServer::start().await;
    mount_quote_and_feed(&server).await;
    mount_label(&server, "Apple beats", "Very Positive").await;
    mount_label(&server, "Apple suppliers", "Positive").await;
    // The antitrust headline gets a 500 and must degrade to Unavailable.
    Mock::given(method("POST"))
        .and(path("/prediction/sentiment"))
        .and(body_string_contains("antitrust"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/prediction/insights"))
        .and(body_string_contains("Final Score:0.875"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "text": "Sentiment is upbeat." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let report = analyzer(&server, UnknownLabelPolicy::Exclude)
        .analyze("Apple Inc.")
        .await
        .expect("analysis should succeed");

    assert_eq!(report.symbol.ticker, "AAPL");
    assert_eq!(report.quote.short_name, "Apple Inc.");
    assert_eq!(report.articles.len(), 3, "Microsoft headline must be filtered out");
    assert_eq!(report.articles[0].sentiment, Sentiment::VeryPositive);
    assert_eq!(report.articles[1].sentiment, Sentiment::Positive);
    assert_eq!(report.articles[2].sentiment, Sentiment::Unavailable);
    assert_eq!(report.articles[2].summary, "No summary available");

    assert_eq!(report.mood.total, 3);
    assert_eq!(report.mood.counted, 2);
    assert_eq!(report.mood.unscored, 1);
    assert_eq!(report.mood.score, 0.875);
    assert_eq!(report.mood.state, MoodState::Scored);
    assert_eq!(
        report.insights,
        Insights::Available("Sentiment is upbeat.".to_string())
    );
}

#[tokio::test]
async fn count_as_neutral_policy_keeps_failed_articles_in_denominator() {
    let server = MockServer::start().await;
    mount_quote_and_feed(&server).await;
    mount_label(&server, "Apple beats", "Very Positive").await;
    mount_label(&server, "Apple suppliers", "Positive").await;
    mount_label(&server, "antitrust", "Bullish-ish").await;
    Mock::given(method("POST"))
        .and(path("/prediction/insights"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let report = analyzer(&server, UnknownLabelPolicy::CountAsNeutral)
        .analyze("Apple Inc.")
        .await
        .expect("analysis should succeed");

    // total=3, N=3 -> (3+6)/12
    assert_eq!(report.mood.counted, 3);
    assert_eq!(report.mood.score, 0.75);
    assert_eq!(
        report.articles[2].sentiment,
        Sentiment::Unknown("Bullish-ish".to_string())
    );
    assert_eq!(report.insights, Insights::Unavailable);
}

#[tokio::test]
async fn no_matching_headlines_is_neutral_without_insights_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/QUIET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rss/2.0/headline"))
        .and(query_param("s", "QUIET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let report = analyzer(&server, UnknownLabelPolicy::Exclude)
        .analyze("Quiet Corp")
        .await
        .expect("analysis should succeed");

    assert!(report.articles.is_empty());
    assert_eq!(report.mood.score, 0.5);
    assert_eq!(report.mood.state, MoodState::NoArticles);
    assert_eq!(report.insights, Insights::Unavailable);
}

#[tokio::test]
async fn unknown_name_is_ticker_not_found() {
    let server = MockServer::start().await;
    let err = analyzer(&server, UnknownLabelPolicy::Exclude)
        .analyze("Nonexistent Holdings")
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            SentimentError::Core(mmi_core::CoreError::TickerNotFound(ref n)) if n == "Nonexistent Holdings"
        ),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn feed_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rss/2.0/headline"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let err = analyzer(&server, UnknownLabelPolicy::Exclude)
        .analyze("Apple Inc.")
        .await
        .unwrap_err();
    assert!(matches!(err, SentimentError::Feed(_)), "got: {err:?}");
}
