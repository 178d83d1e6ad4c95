//! Embedded single-page dashboard.
//!
//! The page talks only to the JSON routes under `/api/v1`, so it is served as
//! a static document.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../assets/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
