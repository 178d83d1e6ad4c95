//! RSS item extraction and HTML stripping.

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;

use crate::error::SentimentError;
use crate::types::FeedEntry;

/// Parse an RSS XML feed into [`FeedEntry`]s.
///
/// Extracts `<item>` elements, pulling `<title>`, `<link>`, `<description>`
/// and `<pubDate>`. HTML in descriptions is stripped. Items without both a
/// title and a link are skipped.
///
/// # Errors
///
/// Returns [`SentimentError::Xml`] if the XML is malformed.
pub(crate) fn parse_rss_feed(xml: &str) -> Result<Vec<FeedEntry>, SentimentError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut in_item = false;
    let mut in_description = false;
    let mut current_tag = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut description = String::new();
    let mut published = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("").to_string();
                if name == "item" {
                    in_item = true;
                    in_description = false;
                    title.clear();
                    link.clear();
                    description.clear();
                    published.clear();
                } else if name == "description" && in_item {
                    in_description = true;
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("");
                if name == "description" {
                    in_description = false;
                }
                if name == "item" && in_item {
                    in_item = false;
                    if !title.is_empty() && !link.is_empty() {
                        let summary = strip_html(&description);
                        entries.push(FeedEntry {
                            title: title.clone(),
                            link: link.clone(),
                            summary: Some(summary).filter(|s| !s.is_empty()),
                            published: Some(published.clone()).filter(|p| !p.is_empty()),
                        });
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = decode_text(&e);
                    push_field(
                        &current_tag,
                        in_description,
                        &text,
                        &mut title,
                        &mut link,
                        &mut description,
                        &mut published,
                    );
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    push_field(
                        &current_tag,
                        in_description,
                        &text,
                        &mut title,
                        &mut link,
                        &mut description,
                        &mut published,
                    );
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SentimentError::Xml(e)),
            _ => {}
        }
    }

    Ok(entries)
}

/// Route a text node to the field of the element it sits in.
///
/// Description text accumulates across nested tags like `<b>`; the other
/// fields take the text as-is.
#[allow(clippy::too_many_arguments)]
fn push_field(
    tag: &str,
    in_description: bool,
    text: &str,
    title: &mut String,
    link: &mut String,
    description: &mut String,
    published: &mut String,
) {
    if in_description {
        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str(text);
        return;
    }
    match tag {
        "title" => title.push_str(text.trim()),
        "link" => link.push_str(text.trim()),
        "pubDate" => published.push_str(text.trim()),
        _ => {}
    }
}

/// Unescape a text node, resolving HTML entities such as `&rsquo;` that XML
/// itself does not define. An unresolvable reference keeps the raw text.
fn decode_text(e: &BytesText<'_>) -> String {
    match e.unescape_with(resolve_html5_entity) {
        Ok(text) => text.into_owned(),
        Err(err) => {
            let raw = String::from_utf8_lossy(e).into_owned();
            tracing::debug!(error = %err, text = %raw, "keeping raw feed text after unescape failure");
            raw
        }
    }
}

/// Strip HTML tags from a string and normalize whitespace.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Yahoo! Finance: AAPL News</title>
    <item>
      <description>Apple reported record services revenue &amp; raised guidance.</description>
      <guid isPermaLink="false">apple-beats-1</guid>
      <link>https://finance.yahoo.com/news/apple-beats-1.html</link>
      <pubDate>Tue, 14 Oct 2025 13:05:00 +0000</pubDate>
      <title>Apple beats estimates on iPhone demand</title>
    </item>
    <item>
      <link>https://finance.yahoo.com/news/market-wrap.html</link>
      <title><![CDATA[Stocks drift as Fed minutes loom]]></title>
      <description><![CDATA[<p>Markets were <b>flat</b> on Tuesday.</p>]]></description>
    </item>
    <item>
      <title>Item with no link is skipped</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_items_in_any_child_order() {
        let entries = parse_rss_feed(SAMPLE_RSS).expect("should parse valid RSS");
        assert_eq!(entries.len(), 2, "expected 2 entries, got {}", entries.len());

        let first = &entries[0];
        assert_eq!(first.title, "Apple beats estimates on iPhone demand");
        assert_eq!(first.link, "https://finance.yahoo.com/news/apple-beats-1.html");
        assert_eq!(
            first.summary.as_deref(),
            Some("Apple reported record services revenue & raised guidance.")
        );
        assert_eq!(
            first.published.as_deref(),
            Some("Tue, 14 Oct 2025 13:05:00 +0000")
        );
    }

    #[test]
    fn cdata_title_and_html_description_are_cleaned() {
        let entries = parse_rss_feed(SAMPLE_RSS).expect("should parse valid RSS");
        let second = &entries[1];
        assert_eq!(second.title, "Stocks drift as Fed minutes loom");
        assert_eq!(second.summary.as_deref(), Some("Markets were flat on Tuesday."));
        assert!(second.published.is_none());
    }

    #[test]
    fn empty_feed_returns_empty_vec() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
        let entries = parse_rss_feed(xml).expect("should parse empty RSS");
        assert!(entries.is_empty());
    }

    #[test]
    fn channel_title_is_not_mistaken_for_item_title() {
        let xml = r#"<rss><channel><title>Feed</title><item><link>https://x.test/a</link></item></channel></rss>"#;
        let entries = parse_rss_feed(xml).expect("should parse");
        assert!(entries.is_empty());
    }

    #[test]
    fn mismatched_tags_are_an_error() {
        let xml = "<rss><channel><item><title>Oops</link></item></channel></rss>";
        let result = parse_rss_feed(xml);
        assert!(
            matches!(result, Err(SentimentError::Xml(_))),
            "expected Xml error, got: {result:?}"
        );
    }

    #[test]
    fn html_entities_in_titles_are_decoded() {
        let xml = "<rss><channel><item><title>Apple&rsquo;s record&nbsp;quarter &amp; more</title>\
                   <link>https://x.test/a</link></item></channel></rss>";
        let entries = parse_rss_feed(xml).expect("should parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Apple\u{2019}s record\u{a0}quarter & more");
    }

    #[test]
    fn unknown_entity_keeps_raw_title() {
        let xml = "<rss><channel><item><title>Apple &bogus; news</title>\
                   <link>https://x.test/a</link></item></channel></rss>";
        let entries = parse_rss_feed(xml).expect("should parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Apple &bogus; news");
    }

    #[test]
    fn strip_html_collapses_whitespace() {
        assert_eq!(strip_html("<p>a\n  <i>b</i></p>  c"), "a b c");
    }
}
