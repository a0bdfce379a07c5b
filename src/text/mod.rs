//! Text utilities: page cleaning, sentence extraction and term vectors

pub mod cleaner;
pub mod term_vector;

pub use cleaner::clean_text;
pub use cleaner::extract_content_sections;
pub use term_vector::tokenize;
pub use term_vector::TermVector;

/// Truncate to at most `max_chars` characters, appending `...` when cut
///
/// Works on character boundaries so multi-byte text never panics.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}
