//! Text canonicalization applied to every lookup key and every query.
//!
//! Lowercases, drops punctuation that never disambiguates an address,
//! collapses whitespace, and folds long street-type words onto the
//! abbreviations the address corpus uses (`street` → `st`). A "the" in
//! front of "embarcadero" is dropped, since the city dataset writes "the
//! embarcadero" where people write "embarcadero". Numeric tokens and
//! directional words pass through untouched.
//!
//! Indexes and queries must both go through [`normalize`]; similarity scores
//! are only comparable when both sides were canonicalized the same way.

use once_cell::sync::Lazy;
use regex::Regex;

// Removed outright so "fisherman's" and "fishermans" agree.
static DROP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['’`".]"#).unwrap());
// Replaced by a space so "clay,market" still splits into two tokens.
static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;:!?()\[\]{}]").unwrap());

/// Long street-type spellings and the abbreviation they fold onto.
const STREET_TYPES: &[(&str, &str)] = &[
    ("street", "st"),
    ("avenue", "ave"),
    ("av", "ave"),
    ("boulevard", "blvd"),
    ("drive", "dr"),
    ("road", "rd"),
    ("place", "pl"),
    ("lane", "ln"),
    ("court", "ct"),
    ("terrace", "ter"),
    ("highway", "hwy"),
    ("alley", "aly"),
    ("parkway", "pkwy"),
];

/// Words that carry no location signal on their own.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "at", "between", "by", "for", "from", "in", "near", "of", "on", "the",
    "to", "&",
];

/// Canonicalize `text` into a lookup key. Total and idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let dropped = DROP_RE.replace_all(&lowered, "");
    let separated = SEPARATOR_RE.replace_all(&dropped, " ");

    let tokens: Vec<&str> = separated.split_whitespace().map(canonical_token).collect();
    drop_articles(tokens).join(" ")
}

/// Street names that the address corpus spells with a leading "the".
const ARTICLE_STREETS: &[&str] = &["embarcadero"];

/// Removes every "the" that directly precedes an [`ARTICLE_STREETS`] name,
/// repeated ones included, so the result is stable under re-normalization.
fn drop_articles(tokens: Vec<&str>) -> Vec<&str> {
    let mut kept: Vec<&str> = Vec::with_capacity(tokens.len());
    for token in tokens.into_iter().rev() {
        let before_street = kept.last().is_some_and(|next| ARTICLE_STREETS.contains(next));
        if token == "the" && before_street {
            continue;
        }
        kept.push(token);
    }
    kept.reverse();
    kept
}

/// Canonicalize a movie title for exact-key joins: case and whitespace only.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn canonical_token(token: &str) -> &str {
    STREET_TYPES
        .iter()
        .find(|(long, _)| *long == token)
        .map(|(_, short)| *short)
        .unwrap_or(token)
}

/// True for street-type abbreviations (`st`, `ave`, ...) in a normalized key.
pub fn is_street_type(token: &str) -> bool {
    STREET_TYPES.iter().any(|(_, short)| *short == token)
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Tokens of a normalized key that are worth blocking on: numbers and
/// words that are neither street types nor stop words.
pub fn significant_tokens(key: &str) -> impl Iterator<Item = &str> {
    key.split(' ')
        .filter(|t| !t.is_empty() && !is_street_type(t) && !is_stop_word(t))
}
