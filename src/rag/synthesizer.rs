//! Rule-based answer synthesis from ranked documents

use crate::rag::SearchResult;
use crate::text::cleaner::fallback_sentences;
use crate::text::extract_content_sections;
use crate::text::truncate_chars;

pub const NO_RESULTS_MESSAGE: &str = "i couldn't find relevant information about that topic.";

/// Only the leading sentences of the best page are considered
const CANDIDATE_SENTENCES: usize = 15;
const SNIPPET_SENTENCES: usize = 3;
const FALLBACK_SNIPPET_SENTENCES: usize = 2;
const MAX_SNIPPET_CHARS: usize = 600;
const MIN_FALLBACK_SENTENCE_CHARS: usize = 20;
const MIN_QUERY_WORD_CHARS: usize = 2;
/// Results after the best one that may be listed as related sources
const MAX_RELATED_SOURCES: usize = 2;

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Clickable link to a source page, opening in a new tab
pub fn source_link(url: &str) -> String {
    let url = escape_html(url);
    format!("<a href=\"{url}\" target=\"_blank\">{url}</a>")
}

/// Lower-cased query words longer than two characters
fn query_words(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_QUERY_WORD_CHARS)
        .map(str::to_lowercase)
        .collect()
}

fn join_sentences<'s>(sentences: impl Iterator<Item = &'s str>) -> String {
    format!("{}.", sentences.collect::<Vec<_>>().join(". "))
}

/// Build an answer from the best-ranked document
///
/// Picks the sentences of the top document that share the most words with
/// the query, caps the snippet at 600 characters, lower-cases it and appends
/// the source link. Further results above `related_threshold` are listed
/// under "also see".
pub fn synthesize_response(
    query: &str,
    results: &[SearchResult<'_>],
    related_threshold: f32,
) -> String {
    let Some(best) = results.first() else {
        return NO_RESULTS_MESSAGE.to_string();
    };

    let mut sentences = extract_content_sections(&best.document.text);
    if sentences.is_empty() {
        sentences = fallback_sentences(&best.document.text, MIN_FALLBACK_SENTENCE_CHARS);
    }

    let words = query_words(query);
    let mut scored: Vec<(usize, &str)> = sentences
        .iter()
        .take(CANDIDATE_SENTENCES)
        .filter_map(|sentence| {
            let lower = sentence.to_lowercase();
            let score = words.iter().filter(|w| lower.contains(w.as_str())).count();
            (score > 0).then_some((score, sentence.as_str()))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let snippet = if !scored.is_empty() {
        join_sentences(scored.iter().take(SNIPPET_SENTENCES).map(|(_, s)| *s))
    } else if !sentences.is_empty() {
        join_sentences(
            sentences
                .iter()
                .take(FALLBACK_SNIPPET_SENTENCES)
                .map(String::as_str),
        )
    } else {
        "content extracted from the source.".to_string()
    };

    let mut response = truncate_chars(&snippet, MAX_SNIPPET_CHARS).to_lowercase();
    response.push_str(&format!("\n\nsource: {}", source_link(&best.document.url)));

    let related: Vec<String> = results
        .iter()
        .skip(1)
        .take(MAX_RELATED_SOURCES)
        .filter(|r| r.similarity > related_threshold)
        .map(|r| source_link(&r.document.url))
        .collect();
    if !related.is_empty() {
        response.push_str(&format!("\n\nalso see: {}", related.join(", ")));
    }

    response
}
