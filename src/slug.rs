//! Slug generation compatible with Publii's own URL slugs

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Characters that do not decompose into ASCII, mapped case-preserving
const DIGRAPHS: &[(char, &str)] = &[
    ('ä', "ae"),
    ('Ä', "Ae"),
    ('ö', "oe"),
    ('Ö', "Oe"),
    ('ü', "ue"),
    ('Ü', "Ue"),
    ('ß', "ss"),
    ('ẞ', "SS"),
    ('æ', "ae"),
    ('Æ', "Ae"),
    ('œ', "oe"),
    ('Œ', "Oe"),
    ('ø', "oe"),
    ('Ø', "Oe"),
];

fn non_slug_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").expect("static regex"))
}

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s-]+").expect("static regex"))
}

/// Turn a title into a URL slug.
///
/// Umlauts and friends become digraphs, remaining accents are stripped via
/// NFD, everything else outside `[a-z0-9]` collapses into single hyphens.
/// Applying it to its own output is a no-op.
pub fn generate_slug(text: &str) -> String {
    let mut replaced = String::with_capacity(text.len());
    for c in text.chars() {
        match DIGRAPHS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => replaced.push_str(to),
            None => replaced.push(c),
        }
    }

    let ascii: String = replaced.nfd().filter(char::is_ascii).collect();
    let lowered = ascii.to_lowercase();
    let cleaned = non_slug_chars().replace_all(&lowered, "");
    let hyphenated = separator_runs().replace_all(&cleaned, "-");

    hyphenated.trim_matches('-').to_string()
}
