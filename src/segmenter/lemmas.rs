use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::normalization::normalize;

/// Lemma lookup keyed by normalized surface form
#[derive(Debug, Clone, Default)]
pub struct LemmaLexicon {
    entries: HashMap<String, String>,
}

impl LemmaLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `surface<TAB>lemma` lines; blank lines and `#` comments are ignored
    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (surface, lemma) = line
                .split_once('\t')
                .map(|(s, l)| (s.trim(), l.trim()))
                .filter(|(s, l)| !s.is_empty() && !l.is_empty())
                .with_context(|| {
                    format!("Malformed lemma entry at line {}: expected surface<TAB>lemma", line_no + 1)
                })?;
            entries.insert(normalize(surface), lemma.to_string());
        }
        Ok(Self { entries })
    }

    /// Load lexicon from file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read lemma lexicon {}", path.display()))?;
        let lexicon = Self::parse(&content)
            .with_context(|| format!("Invalid lemma lexicon {}", path.display()))?;
        info!("Loaded {} lemma entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    pub fn insert(&mut self, surface: &str, lemma: &str) {
        self.entries.insert(normalize(surface), lemma.to_string());
    }

    pub fn lemma_for(&self, surface: &str) -> Option<&str> {
        self.entries.get(&normalize(surface)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
