// WHY: title abbreviations followed by a capitalized name look exactly like a sentence
// boundary ("Sr. Gómez"), so candidate boundaries after them are rejected

use std::collections::HashSet;

/// Title abbreviations that precede proper nouns in Spanish and English text
pub const TITLE_ABBREVIATIONS: &[&str] = &[
    "Sr.", "Sra.", "Srta.", "Dr.", "Dra.", "Lic.", "Ing.", "Prof.", "Profa.",
    "Ud.", "Uds.", "Vd.", "Vds.", "D.", "Dña.", "Sto.", "Sta.", "Mons.",
    "Mr.", "Mrs.", "Ms.", "Jr.",
];

/// Quote characters peeled off a word before lookup
fn is_quote(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}' | '\u{AB}' | '\u{BB}'
    )
}

/// Title abbreviation lookup
pub struct AbbreviationChecker {
    title_abbreviations: HashSet<&'static str>,
}

impl AbbreviationChecker {
    pub fn new() -> Self {
        Self {
            title_abbreviations: TITLE_ABBREVIATIONS.iter().copied().collect(),
        }
    }

    pub fn is_title_abbreviation(&self, word: &str) -> bool {
        self.title_abbreviations.contains(word)
    }

    /// Check if text ends with a title abbreviation that could cause a false boundary
    pub fn ends_with_title_abbreviation(&self, text: &str) -> bool {
        match text.split_whitespace().last() {
            Some(last_word) => self.is_title_abbreviation(last_word.trim_matches(is_quote)),
            None => false,
        }
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}
