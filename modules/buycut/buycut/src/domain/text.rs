//! Slug and display-name helpers.

use sha2::{Digest, Sha256};

/// Derive a lowercase, URL-safe slug from a display name.
///
/// ASCII letters and digits are kept, Latin-1 accented letters are folded to
/// their base letter, and every other run of characters becomes a single `-`.
/// Names with nothing to keep get a short digest so the slug is still stable.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    let mut buf = [0; 4];

    for ch in name.chars().flat_map(char::to_lowercase) {
        let piece: &str = if ch.is_ascii_alphanumeric() {
            ch.encode_utf8(&mut buf)
        } else if let Some(folded) = fold_latin(ch) {
            folded
        } else {
            pending_dash = true;
            continue;
        };
        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.push_str(piece);
    }

    if slug.is_empty() {
        let digest = Sha256::digest(name.as_bytes());
        return hex::encode(&digest[..8]);
    }
    slug
}

fn fold_latin(ch: char) -> Option<&'static str> {
    let folded = match ch {
        '\u{e0}'..='\u{e5}' => "a",
        '\u{e6}' => "ae",
        '\u{e7}' => "c",
        '\u{e8}'..='\u{eb}' => "e",
        '\u{ec}'..='\u{ef}' => "i",
        '\u{f1}' => "n",
        '\u{f2}'..='\u{f6}' | '\u{f8}' => "o",
        '\u{f9}'..='\u{fc}' => "u",
        '\u{fd}' | '\u{ff}' => "y",
        '\u{df}' => "ss",
        '\u{153}' => "oe",
        _ => return None,
    };
    Some(folded)
}

/// Title-case a display name: first letter of each word upper, the rest lower.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
