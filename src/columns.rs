// WHY: input tables come from different tools with Spanish or English headers; roles
// are resolved by folded synonym match so "Oración objetivo" and "target" both work

use std::fmt;

use crate::error::WindowError;
use crate::normalization::fold_header;

/// Column roles used across the extract, score and entropy commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Word,
    Context,
    Left,
    Target,
    Right,
    Polarity,
}

impl ColumnRole {
    /// Canonical key, also used for the "header contains key" fallback
    pub fn key(&self) -> &'static str {
        match self {
            ColumnRole::Word => "palabra",
            ColumnRole::Context => "contexto",
            ColumnRole::Left => "izquierda",
            ColumnRole::Target => "objetivo",
            ColumnRole::Right => "derecha",
            ColumnRole::Polarity => "polaridad",
        }
    }

    /// Known header spellings for the role
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::Word => &["palabra", "evaluativa", "termino", "término", "word", "keyword"],
            ColumnRole::Context => &["contexto", "texto", "context", "concordance", "concordancia", "text"],
            ColumnRole::Left => &["izquierda", "izquierdo", "contexto izquierdo", "izq", "left"],
            ColumnRole::Target => &[
                "objetivo",
                "frase objetivo",
                "target",
                "oracion objetivo",
                "oración objetivo",
            ],
            ColumnRole::Right => &["derecha", "derecho", "contexto derecho", "der", "right"],
            ColumnRole::Polarity => &["polaridad", "polarity", "polaridad continua", "score"],
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn configuration_error(role: ColumnRole, headers: &[String]) -> WindowError {
    WindowError::Configuration {
        role: role.to_string(),
        available: headers.to_vec(),
    }
}

/// Resolve a role to a column index
/// Exact folded synonym first, then the first header containing the role key.
pub fn resolve_role(headers: &[String], role: ColumnRole) -> Result<usize, WindowError> {
    let folded: Vec<String> = headers.iter().map(|h| fold_header(h)).collect();
    let synonyms: Vec<String> = role.synonyms().iter().map(|s| fold_header(s)).collect();

    folded
        .iter()
        .position(|h| synonyms.contains(h))
        .or_else(|| folded.iter().position(|h| h.contains(role.key())))
        .ok_or_else(|| configuration_error(role, headers))
}

/// Resolve a role, honouring an explicit column name when one is given
/// An explicit name must match a header exactly.
pub fn resolve_column(
    headers: &[String],
    role: ColumnRole,
    explicit: Option<&str>,
) -> Result<usize, WindowError> {
    match explicit {
        Some(name) => headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| configuration_error(role, headers)),
        None => resolve_role(headers, role),
    }
}
