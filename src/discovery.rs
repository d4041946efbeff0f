use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extensions accepted as input tables
pub const TABLE_EXTENSIONS: &[&str] = &["csv", "tsv"];

/// Configuration for table discovery
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail on the first unreadable entry or log and continue
    pub fail_fast: bool,
}

/// Find `*.csv` and `*.tsv` files directly in `dir`, sorted by path
/// Output files of earlier runs (`*_windows.*` etc.) are left out.
pub fn find_tables(dir: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    anyhow::ensure!(dir.is_dir(), "Not a directory: {}", dir.display());

    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let mut found = Vec::new();

    for ext in TABLE_EXTENSIONS {
        let pattern = format!("{escaped_dir}/*.{ext}");
        debug!("Scanning with pattern {}", pattern);

        for entry in glob(&pattern).with_context(|| format!("Invalid glob pattern {pattern}"))? {
            match entry {
                Ok(path) if path.is_file() && !is_generated_output(&path) => found.push(path),
                Ok(path) => debug!("Skipping {}", path.display()),
                Err(e) => {
                    if config.fail_fast {
                        return Err(e).context("Failed to read directory entry");
                    }
                    warn!("Unreadable directory entry (continuing): {}", e);
                }
            }
        }
    }

    found.sort();
    info!("Found {} tables in {}", found.len(), dir.display());
    Ok(found)
}

fn is_generated_output(path: &Path) -> bool {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    [
        crate::incremental::WINDOWS_SUFFIX,
        crate::incremental::SCORED_SUFFIX,
        crate::incremental::ENTROPY_SUFFIX,
    ]
    .iter()
    .any(|suffix| stem.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_tables_sorted_and_filtered() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("b.csv"), "x").unwrap();
        fs::write(root.join("a.tsv"), "x").unwrap();
        fs::write(root.join("c.txt"), "x").unwrap();
        fs::write(root.join("a_windows.csv"), "x").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/d.csv"), "x").unwrap();

        let found = find_tables(root, &DiscoveryConfig::default()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.tsv", "b.csv"]);
    }

    #[test]
    fn test_find_tables_not_a_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("f.csv");
        fs::write(&file, "x").unwrap();
        assert!(find_tables(&file, &DiscoveryConfig::default()).is_err());
    }
}
