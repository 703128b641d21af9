//! Hotel code normalization
//!
//! Display names vary in casing, punctuation, and brand suffixes across
//! sources and across runs. The code derived here is the stable join key
//! between the log, the snapshot, and cross-source matching.

/// Brand suffixes that follow a comma in display names, lowercase word
/// sequences matched with flexible whitespace.
const BRAND_SUFFIXES: &[&[&str]] = &[
    &["an", "ihg", "hotel"],
    &["a", "luxury", "collection", "hotel"],
];

/// Derive the normalized join key for a hotel display name.
///
/// Lowercases, removes known brand suffixes, strips everything except
/// ASCII alphanumerics and whitespace, and collapses runs of whitespace.
/// Deterministic: equal names always produce equal codes.
///
/// ```
/// use staylow_store::hotel_code;
///
/// assert_eq!(
///     hotel_code("InterContinental Seoul COEX, an IHG Hotel"),
///     "intercontinental seoul coex"
/// );
/// ```
pub fn hotel_code(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = strip_brand_suffixes(&lowered);

    let mut cleaned = String::with_capacity(stripped.len());
    for ch in stripped.chars() {
        if ch.is_ascii_alphanumeric() || ch.is_whitespace() {
            cleaned.push(ch);
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove every `, <brand suffix>` occurrence from an already-lowercased name.
fn strip_brand_suffixes(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;

    'scan: while let Some(pos) = rest.find(',') {
        let head = &rest[..pos];
        let after = &rest[pos + 1..];

        for suffix in BRAND_SUFFIXES {
            if let Some(remainder) = match_words(after, suffix) {
                out.push_str(head);
                rest = remainder;
                continue 'scan;
            }
        }

        out.push_str(head);
        out.push(',');
        rest = after;
    }

    out.push_str(rest);
    out
}

/// Match a word sequence at the start of `text`, allowing any amount of
/// whitespace between words. Returns the text following the match.
fn match_words<'a>(text: &'a str, words: &[&str]) -> Option<&'a str> {
    let mut rest = text.trim_start();
    for word in words {
        rest = rest.strip_prefix(word)?.trim_start();
    }
    Some(rest)
}
