//! Headline sources.

mod rss;
mod yahoo_rss;

pub use yahoo_rss::FeedClient;

/// First whitespace-delimited token of a display name, lowercased.
///
/// `"Apple Inc."` → `"apple"`. Returns `None` for a blank name.
#[must_use]
pub fn primary_name_token(name: &str) -> Option<String> {
    name.split_whitespace().next().map(str::to_lowercase)
}

/// Case-insensitive substring test of `token` against a headline title.
#[must_use]
pub fn title_mentions(title: &str, token: &str) -> bool {
    !token.is_empty() && title.to_lowercase().contains(token)
}
