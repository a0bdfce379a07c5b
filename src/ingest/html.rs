//! HTML to plain text

use scraper::Html;
use scraper::Node;

/// Elements whose contents are code or markup rather than readable text
const NON_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extract readable text from an HTML page
///
/// Every text node is trimmed, empty ones are dropped, and the rest are
/// joined with single spaces in document order.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut pieces: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let inside_non_text = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if NON_TEXT_ELEMENTS.contains(&el.name()))
        });
        if inside_non_text {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }

    pieces.join(" ")
}
