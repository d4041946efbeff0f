// Input tables with known windows

/// Rows covering token, accent, fallback and no-match outcomes
pub const RESENAS_CSV: &str = "\
palabra,contexto,fuente
rápido,Llegó muy rápido. Se fue temprano.,a
bonito,El coche era bonito. Costaba mucho. Lo vendieron rápido.,b
feliz,El cielo está despejado.,c
rapido,Todo fue rápido y limpio.,d
,Sin palabra.,e
a gusto,Nadie estaba a gusto. Luego cambió. Al final sí.,f
";

/// Windows expected for RESENAS_CSV, in input order
pub const RESENAS_WINDOWS: &str = "\
word,left,target,right
rápido,,Llegó muy rápido.,Se fue temprano.
bonito,,El coche era bonito.,Costaba mucho.
rapido,,Todo fue rápido y limpio.,
a gusto,,Nadie estaba a gusto.,Luego cambió.
";

/// Same rows as a TSV with English headers and a quoted multi-sentence context
pub const REVIEWS_TSV: &str = "\
keyword\tconcordance
lento\t\"Primero dudó. Después fue lento. Nadie esperó.\"
";

pub const REVIEWS_WINDOWS: &str = "\
word\tleft\ttarget\tright
lento\tPrimero dudó.\tDespués fue lento.\tNadie esperó.
";

/// Headers that no role resolves
pub const BAD_HEADERS_CSV: &str = "foo,bar\nx,y\n";

/// Small sentiment lexicon
pub const LEXICON_JSON: &str = r#"{"bonito": 2, "feo": -2, "rápido": 1, "lento": -1}"#;

/// Window table with a polarity column for the entropy command
pub const POLARITY_CSV: &str = "\
word,target,polaridad
bonito,Era bonito.,0.9
bonito,Muy bonito.,0.95
raro,Algo raro.,0.1
raro,Bastante raro.,0.5
raro,Tan raro.,0.9
";
