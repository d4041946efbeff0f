// Core operations through the crate-root re-exports, with a hand-built segmenter
// standing in for an external one

use ctxwin::{
    extract, locate, normalize, segment, strip_accents, BatchProcessor, MatchStrategy, Row, Segmenter,
    Sentence, Token, WindowError,
};
use std::sync::Arc;

/// Splits on " | " and tokenizes on spaces; lemma is the surface with a trailing "s" dropped
struct PipeSegmenter;

impl Segmenter for PipeSegmenter {
    fn segment(&self, text: &str) -> anyhow::Result<Vec<Sentence>> {
        anyhow::ensure!(!text.contains("<<"), "unbalanced markup");
        Ok(text
            .split(" | ")
            .map(|part| {
                let tokens = part
                    .split(' ')
                    .filter(|t| !t.is_empty())
                    .map(|t| Token::new(t, t.trim_end_matches('s')))
                    .collect();
                Sentence::new(part, tokens)
            })
            .collect())
    }
}

fn sentences(text: &str) -> Vec<Sentence> {
    segment(&PipeSegmenter, text).expect("segments")
}

#[test]
fn test_normalization_contract() {
    assert_eq!(normalize(""), "");
    assert_eq!(strip_accents(""), "");
    assert_eq!(normalize("Cafe\u{301}"), "café");
    assert_eq!(strip_accents("Pingüino Ñandú"), "Pinguino Nandu");
}

#[test]
fn test_exact_and_lemma_matches() {
    let s = sentences("Hoy llueve | Los gatos duermen");
    let by_surface = locate("GATOS", &s);
    assert!(by_surface.found);
    assert_eq!(by_surface.sentence_index, Some(1));
    assert_eq!(by_surface.matched_surface.as_deref(), Some("gatos"));
    assert_eq!(by_surface.strategy, Some(MatchStrategy::Token));

    let by_lemma = locate("gato", &s);
    assert_eq!(by_lemma.sentence_index, Some(1));
    assert_eq!(by_lemma.matched_surface.as_deref(), Some("gatos"));
}

#[test]
fn test_accent_fallback_property() {
    let s = sentences("Llegó muy rápido");
    let result = locate("rapido", &s);
    assert!(result.found);
    assert_eq!(result.strategy, Some(MatchStrategy::AccentInsensitive));
    assert_eq!(result.matched_surface.as_deref(), Some("rápido"));
}

#[test]
fn test_text_fallback_returns_target_word() {
    let s = sentences("Nadie estaba a gusto | Luego no");
    let result = locate("A Gusto", &s);
    assert!(result.found);
    assert_eq!(result.sentence_index, Some(0));
    assert_eq!(result.strategy, Some(MatchStrategy::TextFallback));
    assert_eq!(result.matched_surface.as_deref(), Some("A Gusto"));
}

#[test]
fn test_window_boundaries() {
    let s = sentences("uno | dos | tres");
    let first = extract(&s, 0).unwrap();
    assert_eq!((first.left.as_str(), first.target.as_str(), first.right.as_str()), ("", "uno", "dos"));
    let last = extract(&s, 2).unwrap();
    assert_eq!((last.left.as_str(), last.target.as_str(), last.right.as_str()), ("dos", "tres", ""));
    assert_eq!(
        extract(&s, 3),
        Err(WindowError::InvariantViolation { index: 3, len: 3 })
    );
}

#[test]
fn test_segmentation_failure_skips_row_only() {
    let mut processor = BatchProcessor::new(Arc::new(PipeSegmenter));
    let rows = vec![
        Row::new("gato", "<<roto"),
        Row::new("gato", "Un gato | Otro perro"),
        Row::new("feliz", "Nada aquí"),
    ];

    let windows = processor.process(&rows).expect("segmentation failures never abort");
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].word, "gato");
    assert_eq!(windows[0].window.target, "Un gato");
    assert_eq!(windows[0].window.right, "Otro perro");

    let stats = processor.stats();
    assert_eq!(stats.rows_seen, 3);
    assert_eq!(stats.rows_matched, 1);
    assert_eq!(stats.segmentation_failures, 1);
    assert_eq!(stats.rows_unmatched, 1);
}

#[test]
fn test_blank_context_is_not_segmented() {
    assert!(segment(&PipeSegmenter, "   ").unwrap().is_empty());
    let err = segment(&PipeSegmenter, "<<").unwrap_err();
    assert!(err.is_row_recoverable());
}
