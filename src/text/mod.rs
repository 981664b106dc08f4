//! Text resegmentation: copied text in, translation-ready sentences out.

mod normalize;
/// Versioned protect/terminator rule table.
pub mod rules;
mod split;

pub use normalize::{SENTENCE_BREAK, TextNormalizer, normalize};
pub use rules::{DEFAULT_RULES, RULES_VERSION};
pub use split::SentenceSplitter;

/// Normalizes `raw` with the built-in rules and splits it into sentences.
pub fn sentences(raw: &str) -> Vec<String> {
    SentenceSplitter.split(&normalize(raw))
}
