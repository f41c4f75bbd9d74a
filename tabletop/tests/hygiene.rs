//! Hygiene — enforces coding standards at test time.
//!
//! Scans the production sources of this crate for antipatterns. Every
//! pattern has a budget of zero; if one must be introduced, an existing
//! hit has to be removed first so the budget never grows.

use std::fs;
use std::path::Path;

/// (needle, what it means) — all budgets are zero.
const FORBIDDEN: &[(&str, &str)] = &[
    // Panics crash the whole viewport.
    (".unwrap()", "panic on None/Err"),
    (".expect(", "panic with message"),
    ("panic!(", "explicit panic"),
    ("unreachable!(", "assumed-impossible branch"),
    ("todo!(", "unfinished stub"),
    ("unimplemented!(", "unfinished stub"),
    // Silent loss discards errors without inspecting them.
    ("let _ =", "silently discarded result"),
    (".ok()", "error converted to None and dropped"),
    // Structure.
    ("#[allow(dead_code)]", "unreachable production code"),
];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding `_test.rs` siblings.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no production sources found under src/");
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        if path.extension().is_none_or(|e| e != "rs") {
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits_for(files: &[SourceFile], needle: &str) -> Vec<String> {
    let mut hits = Vec::new();
    for file in files {
        for (lineno, line) in file.content.lines().enumerate() {
            if line.contains(needle) {
                hits.push(format!("  {}:{}: {}", file.path, lineno + 1, line.trim()));
            }
        }
    }
    hits
}

#[test]
fn forbidden_patterns_stay_at_zero() {
    let files = source_files();
    let mut report = String::new();
    for (needle, meaning) in FORBIDDEN {
        let hits = hits_for(&files, needle);
        if !hits.is_empty() {
            report.push_str(&format!("`{needle}` ({meaning}): {} hit(s)\n{}\n", hits.len(), hits.join("\n")));
        }
    }
    assert!(report.is_empty(), "hygiene violations:\n{report}");
}
