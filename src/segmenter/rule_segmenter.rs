// WHY: built-in rule-based segmenter so the CLI works without an external NLP service
// Boundary candidates come from one compiled regex; start-character and abbreviation
// checks are done in code on each candidate

use anyhow::Result;
use regex_automata::meta::Regex;
use tracing::{debug, info};
use unicode_segmentation::UnicodeSegmentation;

use super::{AbbreviationChecker, LemmaLexicon, Segmenter, Sentence, Token};

/// Configuration for sentence boundary detection rules
#[derive(Debug, Clone)]
pub struct SegmentationRules {
    /// Marks that can terminate a sentence
    pub terminal_marks: Vec<char>,
    /// Closing quotes/brackets allowed between the terminal mark and the whitespace
    pub closing_marks: Vec<char>,
    /// Characters that may open a sentence besides uppercase letters and digits
    pub opening_marks: Vec<char>,
}

impl Default for SegmentationRules {
    fn default() -> Self {
        Self {
            terminal_marks: vec!['.', '!', '?', '\u{2026}'],
            closing_marks: vec!['"', '\'', '\u{201D}', '\u{2019}', '\u{BB}', ')', ']'],
            opening_marks: vec![
                '"', '\'', '\u{201C}', '\u{2018}', '\u{AB}', '\u{BF}', '\u{A1}', '(', '[',
            ],
        }
    }
}

/// Regex character class with every member hex-escaped
fn char_class(chars: &[char]) -> String {
    let mut class = String::from("[");
    for c in chars {
        class.push_str(&format!("\\x{{{:X}}}", *c as u32));
    }
    class.push(']');
    class
}

pub struct RuleSegmenter {
    boundary: Regex,
    rules: SegmentationRules,
    abbreviation_checker: AbbreviationChecker,
    lemmas: LemmaLexicon,
}

impl RuleSegmenter {
    /// Compile boundary rules once at startup
    pub fn new(rules: SegmentationRules) -> Result<Self> {
        anyhow::ensure!(!rules.terminal_marks.is_empty(), "At least one terminal mark is required");

        let terminal = char_class(&rules.terminal_marks);
        let closing = if rules.closing_marks.is_empty() {
            String::new()
        } else {
            format!("{}*", char_class(&rules.closing_marks))
        };

        // Soft boundary: terminal marks, optional closers, whitespace
        // Hard boundary: blank line, with or without punctuation before it
        let soft_boundary = format!(r"{terminal}+{closing}\s+");
        let hard_boundary = r"\r?\n[ \t\r]*\n\s*";
        let pattern = format!("(?:{soft_boundary})|(?:{hard_boundary})");

        debug!("Compiling sentence boundary pattern: {}", pattern);
        let boundary = Regex::new(&pattern)?;
        info!("Compiled rule segmenter");

        Ok(Self {
            boundary,
            rules,
            abbreviation_checker: AbbreviationChecker::new(),
            lemmas: LemmaLexicon::new(),
        })
    }

    pub fn with_default_rules() -> Result<Self> {
        Self::new(SegmentationRules::default())
    }

    /// Attach a lemma lexicon used to fill token lemmas
    pub fn with_lemmas(mut self, lemmas: LemmaLexicon) -> Self {
        self.lemmas = lemmas;
        self
    }

    fn is_sentence_start(&self, c: char) -> bool {
        c.is_uppercase() || c.is_numeric() || self.rules.opening_marks.contains(&c)
    }

    /// Byte ranges of sentences, untrimmed, in text order
    pub fn sentence_spans(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut sentence_start = 0;

        for mat in self.boundary.find_iter(text) {
            let matched = &text[mat.start()..mat.end()];

            // Sentence ends where the separator whitespace begins
            let separator_offset = matched
                .char_indices()
                .find(|(_, c)| c.is_whitespace())
                .map(|(i, _)| i)
                .unwrap_or(matched.len());
            let sentence_end = mat.start() + separator_offset;
            let is_hard = matched[separator_offset..].matches('\n').count() >= 2;

            if !is_hard {
                let Some(next_char) = text[mat.end()..].chars().next() else {
                    // Trailing punctuation + whitespace, the final flush handles it
                    continue;
                };
                if !self.is_sentence_start(next_char) {
                    continue;
                }
                if self
                    .abbreviation_checker
                    .ends_with_title_abbreviation(&text[sentence_start..sentence_end])
                {
                    continue;
                }
            }

            if !text[sentence_start..sentence_end].trim().is_empty() {
                spans.push((sentence_start, sentence_end));
            }
            sentence_start = mat.end();
        }

        if sentence_start < text.len() && !text[sentence_start..].trim().is_empty() {
            spans.push((sentence_start, text.len()));
        }

        spans
    }

    fn tokenize(&self, sentence: &str) -> Vec<Token> {
        sentence
            .split_word_bounds()
            .filter(|piece| !piece.trim().is_empty())
            .map(|surface| match self.lemmas.lemma_for(surface) {
                Some(lemma) => Token::new(surface, lemma),
                None => Token::unlemmatized(surface),
            })
            .collect()
    }
}

impl Segmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Sentence>> {
        let sentences = self
            .sentence_spans(text)
            .into_iter()
            .map(|(start, end)| {
                let sentence_text = text[start..end].trim();
                Sentence::new(sentence_text, self.tokenize(sentence_text))
            })
            .collect();
        Ok(sentences)
    }
}
