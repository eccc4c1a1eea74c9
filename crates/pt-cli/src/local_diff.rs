use std::fs;
use std::path::{Path, PathBuf};

use pt_core::render_diff_page;

use crate::output::{self, DiffSummary};

pub struct LocalDiffOptions {
    pub old: String,
    pub new: String,
    pub output: String,
    pub json: bool,
}

/// Label a file by its name, falling back to the path as given.
fn label_for(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

pub fn run_local_diff(opts: LocalDiffOptions) -> Result<(), String> {
    let old_text = fs::read_to_string(&opts.old)
        .map_err(|e| format!("Failed to read '{}': {}", opts.old, e))?;
    let new_text = fs::read_to_string(&opts.new)
        .map_err(|e| format!("Failed to read '{}': {}", opts.new, e))?;

    let old_label = label_for(&opts.old);
    let new_label = label_for(&opts.new);
    let page = render_diff_page(&old_label, &new_label, &old_text, &new_text);

    let output_path = PathBuf::from(&opts.output);
    output::write_page(&output_path, &page.html)?;

    let summary = DiffSummary::new(&old_label, &new_label, &page, &output_path);
    output::print_summary(&summary, opts.json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_for() {
        assert_eq!(label_for("manifests/1200.xml"), "1200.xml");
        assert_eq!(label_for(".."), "..");
    }

    #[test]
    fn test_missing_input_is_reported() {
        let err = run_local_diff(LocalDiffOptions {
            old: "/nonexistent/pt-old.xml".to_string(),
            new: "/nonexistent/pt-new.xml".to_string(),
            output: "unused.html".to_string(),
            json: false,
        })
        .unwrap_err();
        assert!(err.starts_with("Failed to read '/nonexistent/pt-old.xml'"));
    }
}
