//! Fixed answers for questions about the ten principles
//!
//! These bypass retrieval entirely, but only fire when the knowledge base
//! actually holds a page that covers the principles.

use tracing::debug;

use super::synthesizer::source_link;
use crate::models::Document;

const PRINCIPLE_LIST_PHRASES: &[&str] = &[
    "what are the 10 principles",
    "ten principles",
    "burning man principles",
    "list the principles",
    "all principles",
    "principles of burning man",
];

/// A page mentioning at least this many principle names covers the list
const MIN_PRINCIPLES_MENTIONED: usize = 8;

/// The ten principles, in order, with their descriptions
pub const PRINCIPLES: [(&str, &str); 10] = [
    ("radical inclusion", "anyone may be a part of burning man. we welcome and respect the stranger. no prerequisites exist for participation in our community."),
    ("gifting", "burning man is devoted to acts of gift giving. the value of a gift is unconditional. gifting does not contemplate a return or an exchange for something of equal value."),
    ("decommodification", "in order to preserve the spirit of gifting, our community seeks to create social environments that are unmediated by commercial sponsorships, transactions, or advertising."),
    ("radical self-reliance", "burning man encourages the individual to discover, exercise and rely on their inner resources."),
    ("radical self-expression", "radical self-expression arises from the unique gifts of the individual. no one other than the individual or a collaborating group can determine its content."),
    ("communal effort", "our community values creative cooperation and collaboration. we strive to produce, promote and protect social networks, public spaces, works of art, and methods of communication that support such interaction."),
    ("civic responsibility", "we value civil society. community members who organize events should assume responsibility for public welfare and endeavor to communicate civic responsibilities to participants."),
    ("leaving no trace", "our community respects the environment. we are committed to leaving no physical trace of our activities wherever we gather."),
    ("participation", "our community is committed to a radically participatory ethic. we believe that transformative change, whether in the individual or in society, can occur only through the medium of deeply personal participation."),
    ("immediacy", "immediate experience is, in many ways, the most important touchstone of value in our culture. we seek to overcome barriers that stand between us and a recognition of our inner selves."),
];

/// Whether the lower-cased query asks for the whole list
pub fn is_principle_list_query(query: &str) -> bool {
    PRINCIPLE_LIST_PHRASES.iter().any(|p| query.contains(p))
}

/// Whether the lower-cased query asks about the first principle only
pub fn is_first_principle_query(query: &str) -> bool {
    let mentions_principle = ["principle", "principal"].iter().any(|t| query.contains(t));
    let mentions_first = ["first", "1st", "one", "1"].iter().any(|t| query.contains(t));
    let mentions_all = ["10", "ten", "all"].iter().any(|t| query.contains(t));
    mentions_principle && mentions_first && !mentions_all
}

/// Number of principle names that appear in the document
pub fn principles_mentioned(document: &Document) -> usize {
    let text = document.text.to_lowercase();
    PRINCIPLES
        .iter()
        .filter(|(name, _)| text.contains(name))
        .count()
}

/// The structured ten-principles answer
pub fn principle_list_response() -> String {
    let mut response = String::from("the 10 principles of burning man\n\n");
    response.push_str("burning man co-founder larry harvey wrote the 10 principles in 2004 as guidelines for the newly-formed regional network. ");
    response.push_str("they were crafted not as a dictate of how people should be and act, but as a reflection of the community's ethos and culture as it had organically developed since the event's inception.\n\n");

    for (i, (title, description)) in PRINCIPLES.iter().enumerate() {
        response.push_str(&format!("{}. {title}\n{description}\n\n", i + 1));
    }
    response
}

/// Answer "list the principles" style queries
///
/// `query` must already be lower-cased. Returns `None` when the query is not
/// a list query or no stored page covers the principles.
pub fn principle_list_answer(query: &str, documents: &[Document]) -> Option<String> {
    if !is_principle_list_query(query) {
        return None;
    }

    let primary = documents
        .iter()
        .filter(|d| principles_mentioned(d) >= MIN_PRINCIPLES_MENTIONED)
        .max_by_key(|d| d.char_len())?;

    debug!("Answering principle list query from {}", primary.url);
    Some(principle_list_response())
}

/// Answer "what is the first principle" style queries
///
/// `query` must already be lower-cased. Uses the first page mentioning
/// radical inclusion as the source.
pub fn first_principle_answer(query: &str, documents: &[Document]) -> Option<String> {
    if !is_first_principle_query(query) {
        return None;
    }

    let source = documents.iter().find(|d| d.mentions("radical inclusion"))?;

    let mut response = String::from("the first principle: radical inclusion\n\n");
    response.push_str("anyone may be a part of burning man. we welcome and respect the stranger. ");
    response.push_str("no prerequisites exist for participation in our community.\n\n");
    response.push_str(
        "this is the first of the 10 principles that guide the burning man community. ",
    );
    response.push_str("these principles were written by burning man co-founder larry harvey in 2004.\n\n");
    response.push_str(&format!("source: {}", source_link(&source.url)));
    Some(response)
}
