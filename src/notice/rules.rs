//! Ordered line-classification rules for the notice extractor.
//!
//! Each [`Rule`] pairs a named predicate with the [`LineKind`] it assigns.
//! [`classify_line`] applies the table top to bottom and the first match
//! wins, so a suppressed line never reaches the copyright-signal rule.

use log::trace;

/// Substrings (matched against the lowercased line) marking code, test
/// scaffolding or license boilerplate rather than a notice.
pub const SUPPRESSION_SIGNALS: &[&str] = &[
    "func ",
    "type ",
    "var ",
    "const ",
    "package ",
    "import ",
    "return ",
    ":=",
    "if ",
    "test",
    "echo",
    "find_",
    "append",
    "error:",
    "grep",
    "egrep",
    "while ",
    "read ",
    "|",
    "grant of",
    "license",
    "permission",
    "permitted",
    "distribute",
    "notice",
    "provided",
    "conditions",
    "subject to",
    "you may",
    "you must",
    "shall",
    "retain",
    "reproduce",
];

/// Case-insensitive copyright signals (matched against the lowercased line).
pub const COPYRIGHT_SIGNALS: &[&str] = &["copyright", "©", "(c)"];

/// Case-sensitive copyright signal, matched against the line as written.
///
/// Lowercasing already folds `(C)` into `(c)`, so this never changes the
/// outcome today. It is kept as its own rule so the asymmetry stays visible.
pub const CASE_SENSITIVE_SIGNAL: &str = "(C)";

/// Lines mentioning copyright that are identifiers or boilerplate, not notices.
pub const SIGNAL_EXCLUSIONS: &[&str] = &[
    "copyrightadder",
    "copyrighttext",
    "addcopyright",
    "extractcopyright",
    "hascopyright",
    "copyright.sh",
    "copyright notice",
    "copyright owner",
    "copyright holder",
    "above copyright",
    "retain",
    "reproduce",
];

/// A trimmed, non-blank input line with its lowercase form cached.
#[derive(Debug)]
pub struct Line<'a> {
    pub raw: &'a str,
    pub lower: String,
}

impl<'a> Line<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lower: raw.to_lowercase(),
        }
    }
}

/// How the extractor should treat a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Suppressed,
    CopyrightSignal,
    Other,
}

pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&Line<'_>) -> bool,
    pub kind: LineKind,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "blank",
        matches: is_blank,
        kind: LineKind::Blank,
    },
    Rule {
        name: "suppression-signal",
        matches: has_suppression_signal,
        kind: LineKind::Suppressed,
    },
    Rule {
        name: "copyright-signal",
        matches: is_copyright_signal,
        kind: LineKind::CopyrightSignal,
    },
];

/// Classify a trimmed line by the first matching rule in [`RULES`].
pub fn classify_line(raw: &str) -> LineKind {
    match matching_rule(raw) {
        Some(rule) => {
            trace!("rule {} matched {:?}", rule.name, raw);
            rule.kind
        }
        None => LineKind::Other,
    }
}

/// First rule in [`RULES`] matching `raw`.
pub fn matching_rule(raw: &str) -> Option<&'static Rule> {
    let line = Line::new(raw);
    RULES.iter().find(|rule| (rule.matches)(&line))
}

pub fn is_blank(line: &Line<'_>) -> bool {
    line.raw.trim().is_empty()
}

pub fn has_suppression_signal(line: &Line<'_>) -> bool {
    SUPPRESSION_SIGNALS.iter().any(|s| line.lower.contains(s))
}

pub fn has_copyright_signal(line: &Line<'_>) -> bool {
    COPYRIGHT_SIGNALS.iter().any(|s| line.lower.contains(s))
        || line.raw.contains(CASE_SENSITIVE_SIGNAL)
}

pub fn has_signal_exclusion(line: &Line<'_>) -> bool {
    SIGNAL_EXCLUSIONS.iter().any(|s| line.lower.contains(s))
}

pub fn is_copyright_signal(line: &Line<'_>) -> bool {
    has_copyright_signal(line) && !has_signal_exclusion(line)
}
