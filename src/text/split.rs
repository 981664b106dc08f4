//! Sentence boundary detection over normalized text.

use unicode_segmentation::UnicodeSegmentation;

/// Splits normalized text into sentences using Unicode (UAX #29) sentence
/// boundaries.
///
/// The blank-line delimiters produced by the normalizer are paragraph
/// separators for UAX #29, so every one of them ends a sentence. The
/// segmenter may still break further after `?` or `!`. A boundary right
/// after an inline period is not taken: the normalizer already decided that
/// period (`Sec. 2`, `cf. A`) does not end the sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    /// Returns the trimmed, non-empty sentences of `normalized` in order.
    pub fn split(self, normalized: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut pending = String::new();

        for bound in normalized.split_sentence_bounds() {
            pending.push_str(bound);
            if bound.ends_with('\n') || !ends_with_period(bound) {
                push_trimmed(&mut sentences, &pending);
                pending.clear();
            }
        }
        push_trimmed(&mut sentences, &pending);

        sentences
    }
}

fn ends_with_period(fragment: &str) -> bool {
    fragment
        .trim_end()
        .trim_end_matches([')', ']', '"', '\'', '\u{201d}', '\u{2019}'])
        .ends_with('.')
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
    let sentence = fragment.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}
