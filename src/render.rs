//! Comment-tree serialization.
//!
//! Stage 3 of the render pipeline. Takes a [`ThreadNode`] tree and emits
//! nested markup via pre-order traversal: container, metadata line,
//! sanitized body, then children in order.
//!
//! ## Trust Boundaries
//!
//! Three rules, applied at exactly these points:
//!
//! - **Comment and post bodies** are trusted HTML from the forum. They are
//!   embedded verbatim via [`maud::PreEscaped`] after [`clean_html_body`]
//!   strips the spurious document wrapper tags the API sometimes includes.
//!   That is a targeted cleanup, not a sanitizer.
//! - **Everything else in HTML context** (usernames, titles, timestamps)
//!   goes through maud interpolation, which entity-escapes automatically.
//! - **Textual (non-HTML) contexts** — feed titles, descriptions, author
//!   names — use [`escape_text`].

use maud::{Markup, PreEscaped, html};

use crate::thread::{Parity, ThreadNode};
use crate::types::UserRef;

/// Placeholder shown when an author reference is null (account deleted).
pub const DELETED_AUTHOR: &str = "[deleted]";

/// Background for even-parity comments; odd parity uses the configured
/// band color.
const EVEN_BAND: &str = "#FFFFFF";

/// Author display name, with the deleted-account placeholder.
///
/// A null author is not an error — the comment still renders.
pub fn author_name(user: Option<&UserRef>) -> &str {
    user.map(|u| u.username.as_str()).unwrap_or(DELETED_AUTHOR)
}

/// Strip the document wrapper tags the API is known to spuriously include
/// in `htmlBody` values. Content is otherwise embedded verbatim.
pub fn clean_html_body(html: &str) -> String {
    html.replace("<html>", "")
        .replace("</html>", "")
        .replace("<body>", "")
        .replace("</body>", "")
        .replace("<head>", "")
        .replace("</head>", "")
}

/// Entity-escape a value for a textual (non-HTML) context.
///
/// `&` must be escaped first so the entities introduced for `<` and `>`
/// are not themselves re-escaped. No other characters are altered.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Serialize a comment tree into nested markup.
///
/// Each real node becomes a `div.comment` carrying the comment id (so the
/// timestamp can self-anchor), a parity-selected background, the metadata
/// line, the sanitized body, and its children. The synthetic root
/// contributes no wrapper — only its children's concatenated output — so
/// an empty thread renders as the empty string.
///
/// Re-rendering the same tree yields byte-identical output: nothing here
/// depends on anything but the tree.
pub fn render_thread(node: &ThreadNode, band_color: &str) -> Markup {
    let Some(record) = &node.record else {
        return html! {
            @for child in &node.children {
                (render_thread(child, band_color))
            }
        };
    };

    let background = match node.parity {
        Parity::Odd => band_color,
        Parity::Even => EVEN_BAND,
    };

    html! {
        div.comment id=(record.id) style={ "background-color: " (background) } {
            "comment by " b { (author_name(record.user.as_ref())) } ", "
            a href={ "#" (record.id) } {
                (record.posted_at.format("%Y-%m-%d %H:%M %Z"))
            }
            ", score: " (record.base_score) " (" (record.vote_count) " votes), "
            a.permalink href=(record.page_url) { "link" }
            (PreEscaped(clean_html_body(&record.html_body)))
            @for child in &node.children {
                (render_thread(child, band_color))
            }
        }
    }
}
