// WHY: finds the first sentence holding the evaluative word
// Strategy cascade per sentence: token surface/lemma, accent-insensitive token, then a
// word-bounded literal search over the folded sentence text. The first sentence that
// matches under any strategy wins.

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::normalization::{normalize, strip_accents};
use crate::segmenter::{Sentence, Token};

/// Which step of the cascade produced the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Normalized token surface or lemma equals the normalized target
    Token,
    /// Same comparison with accents stripped on both sides
    AccentInsensitive,
    /// Word-bounded literal search in the folded sentence text
    TextFallback,
}

/// Outcome of locating a target word in one row's sentences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub found: bool,
    pub matched_surface: Option<String>,
    pub sentence_index: Option<usize>,
    pub strategy: Option<MatchStrategy>,
}

impl MatchResult {
    pub fn not_found() -> Self {
        Self {
            found: false,
            matched_surface: None,
            sentence_index: None,
            strategy: None,
        }
    }

    fn at(sentence_index: usize, matched_surface: &str, strategy: MatchStrategy) -> Self {
        Self {
            found: true,
            matched_surface: Some(matched_surface.to_string()),
            sentence_index: Some(sentence_index),
            strategy: Some(strategy),
        }
    }
}

/// Comparison keys for the target, computed once per row
struct Target<'a> {
    original: &'a str,
    normalized: String,
    stripped: String,
    boundary: Option<Regex>,
}

impl<'a> Target<'a> {
    fn new(original: &'a str) -> Self {
        let normalized = normalize(original.trim());
        let stripped = strip_accents(&normalized);
        // Target is a literal: escape before wrapping in word boundaries
        let boundary = match Regex::new(&format!(r"\b{}\b", regex::escape(&stripped))) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Text fallback disabled for target '{}': {}", original, e);
                None
            }
        };
        Self {
            original,
            normalized,
            stripped,
            boundary,
        }
    }

    fn matches_exact(&self, token: &Token) -> bool {
        normalize(&token.surface) == self.normalized || normalize(&token.lemma) == self.normalized
    }

    fn matches_accent_insensitive(&self, token: &Token) -> bool {
        strip_accents(&normalize(&token.surface)) == self.stripped
            || strip_accents(&normalize(&token.lemma)) == self.stripped
    }

    fn matches_text(&self, sentence_text: &str) -> bool {
        match &self.boundary {
            Some(re) => re.is_match(&strip_accents(&normalize(sentence_text))),
            None => false,
        }
    }
}

/// Match one sentence against the target, running the cascade in order
fn match_sentence(target: &Target<'_>, index: usize, sentence: &Sentence) -> Option<MatchResult> {
    if let Some(token) = sentence.tokens.iter().find(|t| target.matches_exact(t)) {
        return Some(MatchResult::at(index, &token.surface, MatchStrategy::Token));
    }
    if let Some(token) = sentence.tokens.iter().find(|t| target.matches_accent_insensitive(t)) {
        return Some(MatchResult::at(index, &token.surface, MatchStrategy::AccentInsensitive));
    }
    if target.matches_text(&sentence.text) {
        // The surface in the text was not isolated; report the input word as given
        return Some(MatchResult::at(index, target.original, MatchStrategy::TextFallback));
    }
    None
}

/// Locate the first sentence containing `target_word`
pub fn locate(target_word: &str, sentences: &[Sentence]) -> MatchResult {
    if target_word.trim().is_empty() || sentences.is_empty() {
        return MatchResult::not_found();
    }

    let target = Target::new(target_word);
    if target.stripped.trim().is_empty() {
        return MatchResult::not_found();
    }

    for (index, sentence) in sentences.iter().enumerate() {
        if let Some(result) = match_sentence(&target, index, sentence) {
            debug!(
                "Located '{}' in sentence {} via {:?}",
                target_word, index, result.strategy
            );
            return result;
        }
    }

    MatchResult::not_found()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sentence with whitespace tokens, lemma equal to surface
    fn sentence(text: &str) -> Sentence {
        let tokens = text
            .split_whitespace()
            .map(|w| Token::unlemmatized(w.trim_matches(|c: char| c.is_ascii_punctuation())))
            .collect();
        Sentence::new(text, tokens)
    }

    #[test]
    fn test_exact_surface_match() {
        let sentences = vec![sentence("Llegó muy rápido."), sentence("Se fue temprano.")];
        let result = locate("rápido", &sentences);
        assert!(result.found);
        assert_eq!(result.sentence_index, Some(0));
        assert_eq!(result.matched_surface.as_deref(), Some("rápido"));
        assert_eq!(result.strategy, Some(MatchStrategy::Token));
    }

    #[test]
    fn test_case_insensitive_match_keeps_token_surface() {
        let sentences = vec![sentence("BONITO era el coche.")];
        let result = locate("bonito", &sentences);
        assert_eq!(result.matched_surface.as_deref(), Some("BONITO"));
        assert_eq!(result.strategy, Some(MatchStrategy::Token));
    }

    #[test]
    fn test_lemma_match() {
        let sentences = vec![Sentence::new(
            "Eran rápidas.",
            vec![
                Token::unlemmatized("Eran"),
                Token::new("rápidas", "rápido"),
                Token::unlemmatized("."),
            ],
        )];
        let result = locate("Rápido", &sentences);
        assert!(result.found);
        assert_eq!(result.matched_surface.as_deref(), Some("rápidas"));
        assert_eq!(result.strategy, Some(MatchStrategy::Token));
    }

    #[test]
    fn test_accent_fallback() {
        let sentences = vec![sentence("Llegó muy rápido.")];
        let result = locate("rapido", &sentences);
        assert!(result.found);
        assert_eq!(result.matched_surface.as_deref(), Some("rápido"));
        assert_eq!(result.strategy, Some(MatchStrategy::AccentInsensitive));
    }

    #[test]
    fn test_exact_beats_accent_within_sentence() {
        // "rapido" appears first without accent, "rápido" later with it
        let sentences = vec![sentence("rapido y rápido")];
        let result = locate("rápido", &sentences);
        assert_eq!(result.matched_surface.as_deref(), Some("rápido"));
        assert_eq!(result.strategy, Some(MatchStrategy::Token));
    }

    #[test]
    fn test_text_fallback_for_multiword_target() {
        let sentences = vec![sentence("No estuvo mal."), sentence("Fue de lujo, la verdad.")];
        let result = locate("de lujo", &sentences);
        assert!(result.found);
        assert_eq!(result.sentence_index, Some(1));
        assert_eq!(result.matched_surface.as_deref(), Some("de lujo"));
        assert_eq!(result.strategy, Some(MatchStrategy::TextFallback));
    }

    #[test]
    fn test_text_fallback_is_accent_insensitive() {
        let sentences = vec![sentence("Quedó fatal por dentro.")];
        let result = locate("FATAL POR", &sentences);
        assert_eq!(result.sentence_index, Some(0));
        assert_eq!(result.matched_surface.as_deref(), Some("FATAL POR"));
    }

    #[test]
    fn test_text_fallback_respects_word_edges() {
        // "bien" only occurs inside "también" and "bienvenido"
        let sentences = vec![Sentence::new("También bienvenido.", vec![])];
        assert!(!locate("bien", &sentences).found);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let sentences = vec![
            Sentence::new("Nada de eso.", vec![]),
            Sentence::new("Le dio un 10 (sobre 10).", vec![]),
        ];
        let result = locate("(sobre", &sentences);
        // "\b(" cannot match after a space, so nothing is found and nothing panics
        assert!(!result.found);

        let result = locate("a.b", &[Sentence::new("axb", vec![])]);
        assert!(!result.found, "dot must not act as a wildcard");

        let result = locate("10", &sentences);
        assert_eq!(result.sentence_index, Some(1));
    }

    #[test]
    fn test_earlier_fuzzy_beats_later_exact() {
        let sentences = vec![sentence("Fue de lujo."), sentence("lujo total.")];
        let result = locate("de lujo", &sentences);
        assert_eq!(result.sentence_index, Some(0));
        assert_eq!(result.strategy, Some(MatchStrategy::TextFallback));
    }

    #[test]
    fn test_first_match_wins() {
        let sentences = vec![
            sentence("Nada aquí."),
            sentence("Era bonito."),
            sentence("Muy bonito también."),
        ];
        assert_eq!(locate("bonito", &sentences).sentence_index, Some(1));
    }

    #[test]
    fn test_no_match() {
        let sentences = vec![sentence("El cielo está despejado.")];
        assert_eq!(locate("feliz", &sentences), MatchResult::not_found());
    }

    #[test]
    fn test_blank_inputs() {
        let sentences = vec![sentence("Algo pasa.")];
        assert!(!locate("", &sentences).found);
        assert!(!locate("   ", &sentences).found);
        assert!(!locate("algo", &[]).found);
    }

    #[test]
    fn test_mark_only_target_never_matches_everything() {
        // A lone combining mark folds to the empty string
        let sentences = vec![sentence("Cualquier cosa.")];
        assert!(!locate("\u{0301}", &sentences).found);
    }
}
