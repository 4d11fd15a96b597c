//! Venue-name normalization for registry matching. Pure string functions so
//! classification stays reproducible: no similarity scores, no locale state.

/// Corporate suffixes dropped before matching. Kept as standalone tokens so
/// "Sage Publications" is untouched while "Example Press Inc" loses "inc".
const CORPORATE_SUFFIXES: &[&str] = &[
    "ltd",
    "limited",
    "bv",
    "gmbh",
    "inc",
    "llc",
    "co",
    "corp",
    "corporation",
    "sarl",
    "sa",
    "pte",
    "pty",
    "plc",
    "ag",
    "sl",
    "srl",
];

/// Lowercases, replaces punctuation with spaces, collapses whitespace, and
/// strips corporate suffix tokens.
pub fn normalize_venue_name(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| !CORPORATE_SUFFIXES.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when `needle` appears in `haystack` on token boundaries. Both inputs
/// must already be normalized. Token-bounded so the registry key "sage" does
/// not match "usage analytics".
pub fn contains_token_phrase(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    format!(" {} ", haystack).contains(&format!(" {} ", needle))
}
