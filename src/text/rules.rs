//! Versioned rule table driving the normalizer.
//!
//! Protect rules mark spans whose periods must not be read as sentence
//! terminators. Terminator rules list the punctuation that ends a sentence
//! and the closers that may trail it. Changing segmentation behavior is an
//! edit to [`DEFAULT_RULES`], not to the normalizer.

/// Bumped whenever [`DEFAULT_RULES`] changes segmentation output.
pub const RULES_VERSION: u32 = 3;

/// What a rule contributes to normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleClass {
    /// Periods inside matches are masked before terminator insertion.
    Protect,
    /// Characters that end a sentence.
    Terminator,
    /// Characters that may directly follow a terminator and stay with it.
    Closer,
}

/// How a rule's pattern is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Exact text, matched at a word boundary.
    Literal(&'static str),
    /// Regular expression (regex crate syntax).
    Regex(&'static str),
    /// A set of single characters.
    Chars(&'static str),
}

/// One entry of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub class: RuleClass,
    pub pattern: Pattern,
}

const fn protect(name: &'static str, pattern: Pattern) -> Rule {
    Rule {
        name,
        class: RuleClass::Protect,
        pattern,
    }
}

/// Built-in rules, applied in order.
pub const DEFAULT_RULES: &[Rule] = &[
    protect("et-al", Pattern::Literal("et al.")),
    protect("cf", Pattern::Literal("cf.")),
    protect("figure", Pattern::Literal("Fig.")),
    protect("figures", Pattern::Literal("Figs.")),
    protect("equation", Pattern::Literal("Eq.")),
    protect("equations", Pattern::Literal("Eqs.")),
    protect("etc", Pattern::Literal("etc.")),
    protect("versus", Pattern::Literal("vs.")),
    protect("videlicet", Pattern::Literal("viz.")),
    protect("section", Pattern::Literal("Sec.")),
    protect("reference", Pattern::Literal("Ref.")),
    protect("number", Pattern::Regex(r"\bNo\. ?\d")),
    protect("honorific", Pattern::Regex(r"\b(?:Mrs|Mr|Ms|Dr|Prof|St)\.")),
    // e.g., i.e., U.S., a.m.
    protect("dotted-letters", Pattern::Regex(r"\b(?:\p{L}\.){2,}")),
    protect("decimal", Pattern::Regex(r"\d\.\d")),
    protect(
        "file-extension",
        Pattern::Regex(r"\w\.(?:js|ts|jsx|tsx|py|rs|go|md|json|toml|yaml|yml|txt|html|css|csv|pdf)\b"),
    ),
    Rule {
        name: "sentence-end",
        class: RuleClass::Terminator,
        pattern: Pattern::Chars(".:;"),
    },
    Rule {
        name: "closing-mark",
        class: RuleClass::Closer,
        pattern: Pattern::Chars(")]\"'\u{201d}\u{2019}"),
    },
];
