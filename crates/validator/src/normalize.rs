//! Drive name normalization.
//!
//! Drive names reach us mangled by vendors and ripper versions alike
//! (`TSSTcorpCDDVDW`, `HL-DT-ST`, `MATSHITA`, trailing `(revision 1.0)` or
//! `Adapter` suffixes). [`normalize`] rewrites them into the lowercase,
//! single-spaced identifier stored in every [`DriveRecord`](riplog_core::DriveRecord).

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// One rewrite step. Rules run in table order.
enum Rule {
    /// Plain substring replacement
    Literal(&'static str, &'static str),
    /// Regex replacement; `$1` style group references are expanded
    Pattern(Regex, &'static str),
    Trim,
    Lowercase,
}

impl Rule {
    fn pattern(re: &str, replacement: &'static str) -> Self {
        Rule::Pattern(
            Regex::new(re).expect("built-in normalization patterns must compile"),
            replacement,
        )
    }

    fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            Rule::Literal(from, to) if name.contains(from) => Cow::Owned(name.replace(from, to)),
            Rule::Literal(..) => Cow::Borrowed(name),
            Rule::Pattern(re, replacement) => re.replace_all(name, *replacement),
            Rule::Trim => Cow::Borrowed(name.trim()),
            Rule::Lowercase => Cow::Owned(name.to_lowercase()),
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // Vendor aliases
        Rule::Literal("JLMS", "Lite-ON"),
        Rule::pattern("TSSTcorp(BD|CD|DVD)", "TSSTCorp$1"),
        Rule::pattern("HL-DT-ST(BD|CD|DVD)", "HL-DT-ST$1"),
        // Must follow the HL-DT-ST suffix rewrite
        Rule::Literal("HL-DT-ST", "LG Electronics"),
        Rule::Literal("Matshita", "Panasonic"),
        Rule::Literal("MATSHITA", "Panasonic"),
        // Punctuation and spacing
        Rule::pattern(r"^[ _-]+", ""),
        Rule::pattern(r"\s+-\s", " "),
        Rule::pattern(r"\s+", " "),
        // Suffixes
        Rule::pattern(r"\(revision [a-zA-Z0-9.,\-]*\)", ""),
        Rule::pattern(r" Adapter.*$", ""),
        Rule::Trim,
        Rule::Lowercase,
    ]
});

fn apply_rules(name: &str) -> String {
    RULES
        .iter()
        .fold(name.to_string(), |acc, rule| rule.apply(&acc).into_owned())
}

/// Canonicalize a raw drive name into a comparable identifier.
///
/// Total and deterministic. The rule table is re-applied until the output is
/// stable, so `normalize(normalize(x)) == normalize(x)` for every input.
pub fn normalize(raw: &str) -> String {
    let mut current = apply_rules(raw);
    // After one pass the text is lowercase, so only shrinking rules can fire.
    loop {
        let next = apply_rules(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
