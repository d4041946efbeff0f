// WHY: output path derivation shared by the CLI and tests, plus the skip-if-done check
// that makes re-running a folder cheap

use std::path::{Path, PathBuf};

/// Output file name suffixes per command
pub const WINDOWS_SUFFIX: &str = "_windows";
pub const SCORED_SUFFIX: &str = "_scored";
pub const ENTROPY_SUFFIX: &str = "_entropy";

/// Output path for `source` inside `output_dir`: `<stem><suffix>.<ext>`
/// The input extension is kept so the delimiter round-trips; it defaults to csv.
pub fn generate_output_path(source_path: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let file_stem = source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    let extension = source_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("csv");
    output_dir.join(format!("{file_stem}{suffix}.{extension}"))
}

/// Output path next to the source file
pub fn sibling_output_path(source_path: &Path, suffix: &str) -> PathBuf {
    let dir = source_path.parent().unwrap_or_else(|| Path::new(""));
    generate_output_path(source_path, dir, suffix)
}

/// Whether a previous run already produced this output
pub fn output_exists(output_path: &Path) -> bool {
    output_path.is_file()
}

/// Decide whether a source needs processing
pub fn should_process(output_path: &Path, overwrite_all: bool) -> bool {
    overwrite_all || !output_exists(output_path)
}
