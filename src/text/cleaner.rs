//! Boilerplate removal and sentence extraction for scraped page text
//!
//! Scraped pages carry navigation, social links, legal footers and similar
//! chrome. Each noise rule matches a leading phrase and then removes text up
//! to a stop condition. The stop conditions need lookahead, which the `regex`
//! crate does not offer, so the scan is done here by hand: a rule either stops
//! *before* its stop match or consumes *through* it.

use std::sync::LazyLock;

use regex::Regex;

/// Where a noise match ends
enum Stop {
    /// End right before the first match of the pattern (or at end of text)
    Before(Regex),
    /// End right after the first match of the pattern (or at end of text)
    Through(Regex),
}

struct NoiseRule {
    lead: Regex,
    stop: Stop,
}

impl NoiseRule {
    fn new(lead: &str, stop: Stop) -> Self {
        Self {
            lead: Regex::new(&format!("(?i){lead}")).expect("noise lead pattern is valid"),
            stop,
        }
    }

    fn before(lead: &str, stop: &str) -> Self {
        Self::new(
            lead,
            Stop::Before(Regex::new(stop).expect("noise stop pattern is valid")),
        )
    }

    fn through(lead: &str, stop: &str) -> Self {
        Self::new(
            lead,
            Stop::Through(Regex::new(stop).expect("noise stop pattern is valid")),
        )
    }

    /// Position where a match starting with a lead ending at `from` stops
    fn stop_at(&self, text: &str, from: usize) -> usize {
        match &self.stop {
            Stop::Before(re) => re.find_at(text, from).map_or(text.len(), |m| m.start()),
            Stop::Through(re) => re.find_at(text, from).map_or(text.len(), |m| m.end()),
        }
    }

    fn strip(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;

        while cursor < text.len() {
            let Some(lead) = self.lead.find_at(text, cursor) else {
                break;
            };
            out.push_str(&text[cursor..lead.start()]);
            cursor = self.stop_at(text, lead.end());
        }

        if cursor < text.len() {
            out.push_str(&text[cursor..]);
        }
        out
    }
}

/// Whitespace followed by a letter
const WORD_AHEAD: &str = r"\s[A-Za-z]";
/// Whitespace followed by two letters, or a line break
const WORDS_AHEAD_OR_NEWLINE: &str = r"\s[A-Za-z]{2}|\n";

static CLEAN_RULES: LazyLock<Vec<NoiseRule>> = LazyLock::new(|| {
    [
        r"(Menu|DONATE NOW|FOLLOW US|Link to|Subscribe|Open main menu)",
        r"(Facebook|Twitter|Instagram|LinkedIn|YouTube)",
        r"(Copyright|©)",
        r"(Privacy policy|Terms of service|Cookie policy)",
        r"(Skip to content|Back to top)",
    ]
    .into_iter()
    .map(|lead| NoiseRule::before(lead, WORD_AHEAD))
    .collect()
});

static SECTION_RULES: LazyLock<Vec<NoiseRule>> = LazyLock::new(|| {
    let mut rules: Vec<NoiseRule> = [
        r"Menu",
        r"DONATE NOW",
        r"FOLLOW US",
        r"Link to",
        r"Subscribe",
        r"Open main menu",
        r"Navigation menu",
        r"(Facebook|Twitter|Instagram|LinkedIn|YouTube|TikTok|SoundCloud|GitHub)",
    ]
    .into_iter()
    .map(|lead| NoiseRule::before(lead, WORDS_AHEAD_OR_NEWLINE))
    .collect();

    // Copyright lines run up to the year
    rules.push(NoiseRule::through(r"(Copyright|©)", r"\d{4}|\n"));

    rules.extend(
        [
            r"(Privacy policy|Terms of service|Cookie policy)",
            r"(Skip to content|Back to top|Help / FAQ)",
            r"(Bookstore|Marketplace)",
        ]
        .into_iter()
        .map(|lead| NoiseRule::before(lead, WORDS_AHEAD_OR_NEWLINE)),
    );
    rules
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static DOTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").expect("valid regex"));
static BANGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!{2,}").expect("valid regex"));
static QUESTIONS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\?{2,}").expect("valid regex"));

/// Sentences mentioning any of these are treated as navigation
const NAVIGATION_WORDS: &[&str] = &[
    "menu", "click", "link", "navigate", "page", "home", "about us", "contact",
];

/// Minimum length (in characters) of a content sentence
const MIN_SENTENCE_CHARS: usize = 30;

/// Collapse every whitespace run into a single space
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Clean page text before embedding
///
/// Removes common website chrome (menus, social links, copyright and policy
/// footers, skip links), collapses repeated `.`, `!` and `?`, and normalises
/// whitespace.
pub fn clean_text(text: &str) -> String {
    let mut text = collapse_whitespace(text);

    for rule in CLEAN_RULES.iter() {
        text = rule.strip(&text);
    }

    let text = DOTS.replace_all(&text, ".");
    let text = BANGS.replace_all(&text, "!");
    let text = QUESTIONS.replace_all(&text, "?");

    collapse_whitespace(&text).trim().to_string()
}

/// Extract content sentences from raw document text
///
/// Applies the aggressive noise rules, splits on `.`, and keeps sentences
/// longer than 30 characters that read like content: no navigation words and
/// not shouted in all caps.
pub fn extract_content_sections(text: &str) -> Vec<String> {
    let mut cleaned = text.to_string();
    for rule in SECTION_RULES.iter() {
        cleaned = rule.strip(&cleaned);
    }
    let cleaned = collapse_whitespace(&cleaned);

    cleaned
        .trim()
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| is_content_sentence(s))
        .map(ToString::to_string)
        .collect()
}

/// Sentences from the lighter `clean_text` pass, for pages where
/// `extract_content_sections` finds nothing
pub fn fallback_sentences(text: &str, min_chars: usize) -> Vec<String> {
    clean_text(text)
        .split('.')
        .map(str::trim)
        .filter(|s| s.chars().count() > min_chars)
        .map(ToString::to_string)
        .collect()
}

fn is_content_sentence(sentence: &str) -> bool {
    if sentence.chars().count() <= MIN_SENTENCE_CHARS {
        return false;
    }
    let lower = sentence.to_lowercase();
    if NAVIGATION_WORDS.iter().any(|word| lower.contains(word)) {
        return false;
    }
    !is_all_caps(sentence)
}

/// True when the text has at least one cased letter and none are lower case
fn is_all_caps(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
