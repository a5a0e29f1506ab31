//! Style enforcement tests
//!
//! Scans the workspace sources for convention violations clippy does not
//! cover: banned function prefixes and dead-code allowances in production
//! code. Test code is exempt.

use std::fs;
use std::path::{Path, PathBuf};

/// A convention violation found during the workspace scan
#[derive(Debug)]
struct Violation {
    file: String,
    line: usize,
    message: String,
}

/// Checker that walks the workspace crates and records violations
struct StyleChecker {
    violations: Vec<Violation>,
    files_checked: usize,
}

impl StyleChecker {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
            files_checked: 0,
        }
    }

    fn find_rust_files() -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        let mut files = Vec::new();
        Self::find_rust_files_recursive(Path::new(".."), &mut files, 0)?;
        Ok(files)
    }

    fn find_rust_files_recursive(
        dir: &Path,
        files: &mut Vec<PathBuf>,
        depth: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Safety limits
        if depth > 8 || files.len() > 200 {
            return Ok(());
        }

        // Skip build artifacts and hidden directories
        if let Some(name) = dir.file_name() {
            let name_str = name.to_string_lossy();
            if name_str == "target" || name_str.starts_with('.') {
                return Ok(());
            }
        }

        // Only process filmdex crates
        let dir_str = dir.to_string_lossy();
        if !dir_str.contains("filmdex") && depth > 1 {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                Self::find_rust_files_recursive(&path, files, depth + 1)?;
            } else if path.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(path);
            }
        }

        Ok(())
    }

    /// Test code and this checker itself are exempt; the checker's rule
    /// table spells out the banned patterns.
    fn is_exempt(path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        path_str.contains("filmdex-tests") || path_str.ends_with("style.rs")
    }

    fn check_function_prefixes(&mut self, path: &Path, content: &str) {
        let banned = [(
            "get_",
            "Use the noun directly: config.api_key() not config.get_api_key()",
        )];

        for (number, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("//") {
                continue;
            }

            for &(prefix, correction) in &banned {
                if trimmed.contains(&format!("fn {prefix}")) {
                    self.violations.push(Violation {
                        file: path.display().to_string(),
                        line: number + 1,
                        message: format!("Function uses banned prefix '{prefix}'. {correction}"),
                    });
                }
            }
        }
    }

    fn check_dead_code_allowances(&mut self, path: &Path, content: &str) {
        for (number, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.contains("#[allow(") && trimmed.contains("dead_code") {
                self.violations.push(Violation {
                    file: path.display().to_string(),
                    line: number + 1,
                    message: "Production code must not silence dead_code; delete the unused item instead".to_string(),
                });
            }
        }
    }

    fn check_workspace(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        for file in Self::find_rust_files()? {
            if Self::is_exempt(&file) {
                continue;
            }

            let content = fs::read_to_string(&file)?;
            self.files_checked += 1;
            self.check_function_prefixes(&file, &content);
            self.check_dead_code_allowances(&file, &content);
        }

        Ok(())
    }

    fn report_violations(&self) -> bool {
        if self.violations.is_empty() {
            return true;
        }

        println!("Style violations found:");
        for violation in &self.violations {
            println!(
                "  {}:{} - {}",
                violation.file, violation.line, violation.message
            );
        }

        false
    }
}

#[test]
fn test_production_code_follows_conventions() {
    let mut checker = StyleChecker::new();
    checker
        .check_workspace()
        .expect("workspace scan should succeed");

    assert!(
        checker.files_checked > 0,
        "expected production sources to be scanned"
    );
    assert!(
        checker.report_violations(),
        "style violations found; see output above"
    );
}
