//! `mood` command: run one analysis and print it as plain text.

use std::fmt::Write as _;
use std::sync::Arc;

use mmi_core::{AppConfig, SymbolDirectory};
use mmi_sentiment::{Insights, MoodAnalyzer, MoodReport, MoodState};

/// # Errors
///
/// Returns an error if the HTTP clients cannot be built, the name is not in
/// the directory, or the quote or feed lookup fails.
pub(crate) async fn run_mood(
    config: &AppConfig,
    directory: Arc<SymbolDirectory>,
    name: &str,
) -> anyhow::Result<()> {
    tracing::debug!(name, symbols = directory.len(), "running mood analysis");
    let analyzer = MoodAnalyzer::from_config(config, directory)?;
    let report = analyzer.analyze(name).await?;
    print!("{}", format_report(&report));
    Ok(())
}

pub(crate) fn format_report(report: &MoodReport) -> String {
    let quote = &report.quote;
    let change = quote.change();
    let sign = if change.is_sign_negative() { "" } else { "+" };

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", quote.short_name, report.symbol.ticker);
    let _ = writeln!(out, "{}", quote.website);
    let _ = writeln!(
        out,
        "Stock Price   {:.2} ({sign}{:.2})",
        quote.current_price, change
    );
    let _ = writeln!(out, "Today's High  {:.2}", quote.day_high);
    let _ = writeln!(out, "Today's Low   {:.2}", quote.day_low);
    let _ = writeln!(out);

    let mood = &report.mood;
    let _ = write!(out, "Market Mood Index  {:.2}", mood.score);
    match mood.state {
        MoodState::Scored => {
            let _ = writeln!(
                out,
                "  ({} of {} articles scored)",
                mood.counted, mood.article_count
            );
        }
        MoodState::NoArticles => {
            let _ = writeln!(out, "  (no matching articles)");
        }
        MoodState::NoRecognizedLabels => {
            let _ = writeln!(out, "  (no article could be scored)");
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Key Insights");
    match &report.insights {
        Insights::Available(text) => {
            let _ = writeln!(out, "{text}");
        }
        Insights::Unavailable => {
            let _ = writeln!(out, "(unavailable)");
        }
    }

    if !report.articles.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Articles related to {}", report.symbol.name);
        for article in &report.articles {
            let _ = writeln!(
                out,
                "[{}] {} | {}",
                article.sentiment.badge_text(),
                article.title,
                article.published
            );
            let _ = writeln!(out, "    {}", article.link);
        }
    }
    out
}
