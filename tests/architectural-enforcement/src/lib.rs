//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The core crate stays free of terminal UI dependencies
//! - Only the typing animator writes the placeholder
//! - No sleeping in production code; timers are deadlines the loop waits on
//! - No locks in the core; one owner mutates the state
//!
//! This library holds the source scanning helpers the tests share.

use std::fs;
use std::path::{Path, PathBuf};

/// One offending line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File, relative to the workspace root
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line, self.text)
    }
}

/// Workspace root (two levels above this package)
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// All `.rs` files under `dir` (relative to the workspace root)
#[must_use]
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// Production lines of a source file as `(line number, code)`
///
/// Comments are stripped and scanning stops at the first `#[cfg(test)]`,
/// since test modules sit at the end of each file.
#[must_use]
pub fn production_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .map(|(idx, line)| (idx + 1, line.split("//").next().unwrap_or(line)))
        .filter(|(_, code)| !code.trim().is_empty())
        .collect()
}

/// Scan production code under `dir`, reporting lines `offends` flags
pub fn scan<F>(dir: &str, offends: F) -> Vec<Violation>
where
    F: Fn(&Path, &str) -> bool,
{
    let root = workspace_root();
    let mut violations = Vec::new();

    for path in rust_files(dir) {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let relative = path.strip_prefix(&root).unwrap_or(&path).to_path_buf();
        for (line, code) in production_lines(&content) {
            if offends(&relative, code) {
                violations.push(Violation {
                    path: relative.clone(),
                    line,
                    text: code.trim().to_string(),
                });
            }
        }
    }
    violations
}

/// Fail with every violation listed
///
/// # Panics
///
/// Panics when `violations` is not empty.
pub fn assert_clean(rule: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    panic!("\n{rule}: found {} violation(s)", violations.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_skip_comments_and_tests() {
        let source = "\
use std::fmt;
// a comment line
let x = 1; // trailing
#[cfg(test)]
mod tests {
    fn sleep_here() {}
}";
        let lines = production_lines(source);
        assert_eq!(lines, vec![(1, "use std::fmt;"), (3, "let x = 1; ")]);
    }

    #[test]
    fn test_workspace_root_holds_the_workspace_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
        assert!(workspace_root().join("searchbar/core/src/lib.rs").exists());
    }

    #[test]
    fn test_rust_files_found() {
        let files = rust_files("searchbar/core/src");
        assert!(files.iter().any(|p| p.ends_with("controller.rs")));
    }
}
