use std::fs;
use std::path::Path;

use pt_core::DiffPage;
use serde::Serialize;

/// Printed after a diff page is written.
#[derive(Debug, Serialize)]
pub struct DiffSummary {
    pub old: String,
    pub new: String,
    pub old_lines: usize,
    pub new_lines: usize,
    pub changes: usize,
    pub output: String,
}

impl DiffSummary {
    pub fn new(old: &str, new: &str, page: &DiffPage, output: &Path) -> Self {
        Self {
            old: old.to_string(),
            new: new.to_string(),
            old_lines: page.old_line_count,
            new_lines: page.new_line_count,
            changes: page.change_count,
            output: output.display().to_string(),
        }
    }
}

pub fn write_page(path: &Path, html: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    fs::write(path, html)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}

pub fn print_summary(summary: &DiffSummary, json: bool) -> Result<(), String> {
    if json {
        let text = serde_json::to_string_pretty(summary)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    println!("Diff {} -> {} written to '{}'", summary.old, summary.new, summary.output);
    println!("  Lines:    {} -> {}", summary.old_lines, summary.new_lines);
    println!("  Changes:  {}", summary.changes);
    Ok(())
}
