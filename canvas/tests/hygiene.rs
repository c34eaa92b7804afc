//! Hygiene: source-level rules for the layout engine, checked at test time.
//!
//! Each rule scans the production files under `src/` (sibling `_test.rs`
//! files are skipped) and has a budget. Budgets only go down.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

struct Rule {
    pattern: &'static str,
    budget: usize,
    why: &'static str,
}

const RULES: &[Rule] = &[
    Rule { pattern: ".unwrap()", budget: 0, why: "panics inside the browser tab" },
    Rule { pattern: ".expect(", budget: 0, why: "panics inside the browser tab" },
    Rule { pattern: "panic!(", budget: 0, why: "panics inside the browser tab" },
    Rule { pattern: "unreachable!(", budget: 0, why: "panics inside the browser tab" },
    Rule { pattern: "todo!(", budget: 0, why: "unfinished code path" },
    Rule { pattern: "unimplemented!(", budget: 0, why: "unfinished code path" },
    Rule { pattern: "let _ =", budget: 0, why: "discards a result without looking at it" },
    Rule { pattern: ".ok()", budget: 0, why: "discards an error without logging it" },
    Rule { pattern: "#[allow(dead_code)]", budget: 0, why: "delete unused code instead" },
    Rule { pattern: "println!(", budget: 0, why: "use the log facade" },
    Rule { pattern: "eprintln!(", budget: 0, why: "use the log facade" },
];

/// Files allowed to talk to the 2D canvas API directly.
const CANVAS_2D_FILES: &[&str] = &["render.rs", "engine.rs"];

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
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

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter().map(|(path, count)| format!("  {path}: {count}")).collect::<Vec<_>>().join("\n")
}

#[test]
fn source_tree_is_not_empty() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the canvas crate root");
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for rule in RULES {
        let found = hits(&files, rule.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > rule.budget {
            failures.push(format!(
                "`{}` found {count}, max {} ({})\n{}",
                rule.pattern,
                rule.budget,
                rule.why,
                format_hits(&found)
            ));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}

#[test]
fn canvas_2d_stays_in_render_layer() {
    let files = source_files();
    let offenders: Vec<(String, usize)> = hits(&files, "CanvasRenderingContext2d")
        .into_iter()
        .filter(|(path, _)| !CANVAS_2D_FILES.iter().any(|allowed| path.ends_with(allowed)))
        .collect();
    assert!(
        offenders.is_empty(),
        "CanvasRenderingContext2d used outside {CANVAS_2D_FILES:?}:\n{}",
        format_hits(&offenders)
    );
}
