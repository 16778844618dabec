//! Ingredient text parsing and display formatting.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BULLET_RE: Regex = Regex::new(r"^\s*(?:[-*\x{2022}]+|\d+[.)])\s*").unwrap();
}

/// Split a delimited ingredient field into display lines.
///
/// Lines are the primary delimiter. A single-line field falls back to
/// semicolons, then commas. Bullets and list numbers are stripped and
/// each entry gets its first letter capitalized.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let pieces: Vec<&str> = match lines.as_slice() {
        [] => Vec::new(),
        [single] if single.contains(';') => single.split(';').collect(),
        [single] if single.contains(',') => single.split(',').collect(),
        _ => lines,
    };

    pieces
        .into_iter()
        .map(|p| BULLET_RE.replace(p, "").trim().to_owned())
        .filter(|p| !p.is_empty())
        .map(|p| capitalize(&p))
        .collect()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
