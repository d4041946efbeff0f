// WHY: one place for the comparison canonicalization shared by the locator, the lemma
// lexicon and column-role resolution

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical composition (NFC) followed by Unicode lowercase
pub fn normalize(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Canonical decomposition (NFD) with every combining mark removed
/// Does not change case; callers fold first with `normalize` when they need both
pub fn strip_accents(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    strip_accents_into(text, &mut result);
    result
}

/// Strip accents into supplied buffer to avoid allocation
pub fn strip_accents_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());
    buffer.extend(text.nfd().filter(|ch| !is_combining_mark(*ch)));
}

/// `normalize` then `strip_accents`, the accent-insensitive comparison key
pub fn fold(text: &str) -> String {
    strip_accents(&normalize(text))
}

/// Header folding for column-role matching: accents stripped, lowercased,
/// trimmed and interior whitespace collapsed to single spaces
pub fn fold_header(header: &str) -> String {
    let folded = fold(header);
    let mut result = String::with_capacity(folded.len());
    for (i, part) in folded.split_whitespace().enumerate() {
        if i > 0 {
            result.push(' ');
        }
        result.push_str(part);
    }
    result
}
