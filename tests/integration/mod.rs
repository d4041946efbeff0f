// Integration test utilities and common code

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub mod fixtures;

/// Temporary directory holding input tables for one test
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Write a table file, creating parent directories as needed
    pub fn create_table_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    pub fn path<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        self.root_path.join(relative_path)
    }

    pub fn read<P: AsRef<Path>>(&self, relative_path: P) -> String {
        fs::read_to_string(self.path(relative_path)).expect("Failed to read output file")
    }

    /// Run the ctxwin binary with logging quiet and progress bars off
    pub fn run_cli(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_ctxwin"))
            .current_dir(&self.root_path)
            .args(["--log-level", "warn", "--no-progress"])
            .args(args)
            .output()
            .expect("Failed to run ctxwin")
    }
}

/// Compare two strings line by line, reporting the first differing line
pub fn assert_lines_eq(actual: &str, expected: &str, context: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    for (i, (actual_line, expected_line)) in actual_lines.iter().zip(expected_lines.iter()).enumerate() {
        assert_eq!(
            actual_line, expected_line,
            "{}: line {} mismatch",
            context,
            i + 1
        );
    }
    assert_eq!(
        actual_lines.len(),
        expected_lines.len(),
        "{}: line count mismatch",
        context
    );
}
