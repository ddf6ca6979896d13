// src/markup.rs
//
// Turns raw message text into HTML for the transcript export. Text is
// escaped before anything else looks at it, so later passes only ever
// see entity-encoded input.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(https?://|www\.)[\w-]+(\.[\w-]+)+(/[\w\-.,@?^=%&:/~+#]*)?").unwrap()
});

/// Escapes the five HTML-significant characters. Ampersand goes first
/// so already-produced entities are not escaped twice.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Wraps URLs in anchor tags. Expects escaped text; the anchor markup
/// added here must not be escaped again. Matches without a scheme
/// (`www.` forms) get an `http://` href so they stay clickable.
pub fn linkify(escaped: &str) -> String {
    URL_RE
        .replace_all(escaped, |caps: &Captures| {
            let url = &caps[0];
            let href = if url.starts_with("http://") || url.starts_with("https://") {
                url.to_string()
            } else {
                format!("http://{}", url)
            };
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                href, url
            )
        })
        .into_owned()
}

/// Full pipeline: escape, then linkify, then turn newlines into
/// explicit break tags.
pub fn render_markup(text: &str) -> String {
    linkify(&escape_html(text)).replace('\n', "<br/>")
}
