//! Reformats copied text into running text with explicit sentence delimiters.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::rules::{DEFAULT_RULES, Pattern, Rule, RuleClass};

/// Placeholder for periods inside protected spans (Unicode private use area).
const MASK: char = '\u{E000}';
const MASK_STR: &str = "\u{E000}";

/// Inserted after every sentence terminator.
pub const SENTENCE_BREAK: &str = "\n\n";

static DEFAULT_NORMALIZER: OnceLock<TextNormalizer> = OnceLock::new();

/// Compiled form of a rule table.
///
/// Normalization runs six ordered passes:
///
/// 1. line breaks become single spaces, `word-<break>` rejoins the word
/// 2. periods inside protected spans are masked
/// 3. a [`SENTENCE_BREAK`] is inserted after each terminator (and closer)
/// 4. masked periods are restored
/// 5. a break followed by a lowercase letter, digit or `/` is undone
/// 6. spaces at the start of a line are trimmed
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    hyphen_wrap: Regex,
    line_break: Regex,
    blanks: Regex,
    protect: Vec<Regex>,
    terminator: Regex,
    false_break: Regex,
    leading_blanks: Regex,
}

impl TextNormalizer {
    /// Compiles `rules` plus any extra literal abbreviations (e.g. `"Dr."`).
    pub fn new(rules: &[Rule], extra_abbreviations: &[String]) -> Result<Self> {
        let mut protect = Vec::new();
        let mut terminators = String::new();
        let mut closers = String::new();

        for rule in rules {
            match (rule.class, rule.pattern) {
                (RuleClass::Protect, Pattern::Literal(text)) => {
                    protect.push(compile(&literal_pattern(text), rule.name)?);
                }
                (RuleClass::Protect, Pattern::Regex(pattern)) => {
                    protect.push(compile(pattern, rule.name)?);
                }
                (RuleClass::Terminator, Pattern::Chars(chars)) => terminators.push_str(chars),
                (RuleClass::Closer, Pattern::Chars(chars)) => closers.push_str(chars),
                (class, pattern) => {
                    anyhow::bail!(
                        "Rule '{}' has an unsupported pattern {pattern:?} for {class:?}",
                        rule.name
                    );
                }
            }
        }

        for abbreviation in extra_abbreviations {
            let abbreviation = abbreviation.trim();
            if abbreviation.is_empty() {
                continue;
            }
            protect.push(compile(&literal_pattern(abbreviation), abbreviation)?);
        }

        if terminators.is_empty() {
            anyhow::bail!("Rule table defines no sentence terminators");
        }

        let terminator = if closers.is_empty() {
            format!("{}+", char_class(&terminators))
        } else {
            format!("{}+{}?", char_class(&terminators), char_class(&closers))
        };

        Ok(Self {
            hyphen_wrap: compile(r"(\w)-(?:\r\n|\r|\n)[ \t]*", "hyphen-wrap")?,
            line_break: compile(r"\r\n|\r|\n", "line-break")?,
            blanks: compile(r"[ \t]{2,}|\t", "blanks")?,
            protect,
            terminator: compile(&terminator, "terminator")?,
            false_break: compile(r"\n\n( ?[\p{Ll}\p{Nd}/])", "false-break")?,
            leading_blanks: compile(r"\n\n[ \t]+", "leading-blanks")?,
        })
    }

    /// Normalizer for the built-in rule table, compiled once.
    #[allow(clippy::expect_used)]
    pub fn default_rules() -> &'static Self {
        // expect is safe: the built-in table is covered by tests
        DEFAULT_NORMALIZER
            .get_or_init(|| Self::new(DEFAULT_RULES, &[]).expect("built-in rules compile"))
    }

    pub fn normalize(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let text = self.unify_line_breaks(raw);
        let text = self.mask(&text);
        let text = self.terminator.replace_all(&text, "${0}\n\n");
        let text = text.replace(MASK, ".");
        let text = self.false_break.replace_all(&text, "${1}");
        let text = self.leading_blanks.replace_all(&text, SENTENCE_BREAK);

        text.trim_start().to_string()
    }

    fn unify_line_breaks(&self, raw: &str) -> String {
        let text = self.hyphen_wrap.replace_all(raw, "${1}");
        let text = self.line_break.replace_all(&text, " ");
        self.blanks.replace_all(&text, " ").into_owned()
    }

    fn mask(&self, text: &str) -> String {
        let mut masked = text.to_string();
        for pattern in &self.protect {
            masked = pattern
                .replace_all(&masked, |caps: &Captures<'_>| caps[0].replace('.', MASK_STR))
                .into_owned();
        }
        masked
    }
}

/// Normalizes with the built-in rule table.
pub fn normalize(raw: &str) -> String {
    TextNormalizer::default_rules().normalize(raw)
}

fn compile(pattern: &str, name: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Invalid normalization rule '{name}'"))
}

fn literal_pattern(text: &str) -> String {
    let escaped = regex::escape(text);
    if text.starts_with(char::is_alphanumeric) {
        format!(r"\b{escaped}")
    } else {
        escaped
    }
}

fn char_class(chars: &str) -> String {
    let escaped: String = chars
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    format!("[{escaped}]")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const MIXED: &str = "Deep learning has been applied to many do-\r\nmains, e.g. vision and speech.\rThe results in Fig. 2 show an improve-\rment of 3.5 points over the baseline (Smith et al. 2020).\nWe use the following setup: a transformer\nencoder with 12 layers; the\r\nmodel is trained for 10 epochs. See index.js for details.";

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \n\r\n "), "");
    }

    #[test]
    fn test_rejoins_hyphenated_word() {
        let text = normalize("exam-\npled");
        assert!(text.contains("exampled"));
        assert!(!text.contains('-'));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_rejoins_hyphenated_word_for_every_line_ending() {
        for raw in ["exam-\r\npled", "exam-\rpled", "exam-\npled", "exam-\n   pled"] {
            assert_eq!(normalize(raw), "exampled", "input {raw:?}");
        }
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        assert_eq!(normalize("one\r\ntwo\rthree\nfour"), "one two three four");
    }

    #[test]
    fn test_no_terminal_punctuation_is_one_unit() {
        let text = normalize("a heading without\npunctuation");
        assert_eq!(text, "a heading without punctuation");
        assert!(!text.contains(SENTENCE_BREAK));
    }

    #[test]
    fn test_inserts_break_after_terminators() {
        assert_eq!(
            normalize("First one. Second one; Third: Fourth."),
            "First one.\n\nSecond one;\n\nThird:\n\nFourth.\n\n"
        );
    }

    #[test]
    fn test_closing_mark_stays_with_terminator() {
        assert_eq!(
            normalize("He wrote \"stop.\" Then he left."),
            "He wrote \"stop.\"\n\nThen he left.\n\n"
        );
    }

    #[test]
    fn test_cf_is_not_a_sentence_end() {
        let text = normalize("cf. a study");
        assert!(!text.contains("cf.\n\n"));
        assert_eq!(text, "cf. a study");
    }

    #[test]
    fn test_protected_abbreviations_before_capitals() {
        let text = normalize("See Fig. A and Smith et al. Nature for Dr. Watson.");
        assert_eq!(
            text,
            "See Fig. A and Smith et al. Nature for Dr. Watson.\n\n"
        );
    }

    #[test]
    fn test_decimal_and_file_extension_are_kept() {
        assert_eq!(
            normalize("Accuracy rose to 93.5 percent. Open main.rs Now."),
            "Accuracy rose to 93.5 percent.\n\nOpen main.rs Now.\n\n"
        );
    }

    #[test]
    fn test_number_before_period_ends_a_sentence() {
        assert_eq!(
            normalize("It was released in 2020. Next came the sequel."),
            "It was released in 2020.\n\nNext came the sequel.\n\n"
        );
        assert_eq!(normalize("in 2020. then more"), "in 2020. then more");
    }

    #[test]
    fn test_lowercase_continuation_is_repaired() {
        assert_eq!(
            normalize("the ratio: about half. the rest"),
            "the ratio: about half. the rest"
        );
    }

    #[test]
    fn test_every_false_positive_is_repaired() {
        let text = normalize("approx. one, approx. two, approx. three. End.");
        assert_eq!(text, "approx. one, approx. two, approx. three.\n\nEnd.\n\n");
    }

    #[test]
    fn test_urls_survive() {
        assert_eq!(
            normalize("Visit https://example.com/docs. Thanks."),
            "Visit https://example.com/docs.\n\nThanks.\n\n"
        );
    }

    #[test]
    fn test_ellipsis_is_one_terminator() {
        assert_eq!(normalize("Wait... Go."), "Wait...\n\nGo.\n\n");
    }

    #[test]
    fn test_no_leading_spaces_on_lines() {
        let text = normalize("  One.   Two.\n Three.");
        for line in text.split(SENTENCE_BREAK) {
            assert!(!line.starts_with(' '), "line {line:?}");
        }
    }

    #[test]
    fn test_concrete_scenario() {
        let text = normalize(
            "This is sentence one. This is sentence two, with e.g. an abbreviation. Done.",
        );
        assert_eq!(
            text,
            "This is sentence one.\n\nThis is sentence two, with e.g. an abbreviation.\n\nDone.\n\n"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            MIXED,
            "exam-\npled",
            "cf. a study",
            "This is sentence one. This is sentence two, with e.g. an abbreviation. Done.",
            "Wait... Go.\r\n\r\nNew paragraph without end",
            "  leading spaces; and \"quoted.\" Then (bracketed.) More.",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_mixed_input_has_no_raw_line_breaks() {
        let text = normalize(MIXED);
        let without_breaks = text.replace(SENTENCE_BREAK, "");
        assert!(!without_breaks.contains('\n'));
        assert!(!without_breaks.contains('\r'));
        assert!(text.contains("domains, e.g. vision"));
        assert!(text.contains("improvement of 3.5 points"));
        assert!(text.contains("(Smith et al. 2020).\n\n"));
        assert!(text.contains("layers; the model"));
        assert!(text.contains("index.js for details."));
    }

    #[test]
    fn test_mask_placeholder_never_leaks() {
        let text = normalize(MIXED);
        assert!(!text.contains(MASK));
    }

    #[test]
    fn test_extra_abbreviations() {
        let normalizer =
            TextNormalizer::new(DEFAULT_RULES, &["Thm.".to_string(), "  ".to_string()]).unwrap();
        assert_eq!(
            normalizer.normalize("By Thm. A we are done."),
            "By Thm. A we are done.\n\n"
        );
        assert_eq!(normalize("By Thm. A we are done."), "By Thm.\n\nA we are done.\n\n");
    }

    #[test]
    fn test_rules_without_terminators_are_rejected() {
        let rules = [Rule {
            name: "only-closers",
            class: RuleClass::Closer,
            pattern: Pattern::Chars(")"),
        }];
        assert!(TextNormalizer::new(&rules, &[]).is_err());
    }

    #[test]
    fn test_mismatched_rule_is_rejected() {
        let rules = [Rule {
            name: "bad",
            class: RuleClass::Terminator,
            pattern: Pattern::Literal("."),
        }];
        let err = TextNormalizer::new(&rules, &[]).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
