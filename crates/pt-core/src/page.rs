//! Self-contained HTML page for a manifest comparison

use crate::diff::{diff_lines, split_lines};
use crate::render::{escape_html, render_alignment, RenderedDiff};

const STYLE: &str = r#"        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: "SF Mono", "Fira Code", "Consolas", monospace;
            background: #1e1e2e;
            color: #cdd6f4;
            min-height: 100vh;
        }
        .header {
            background: linear-gradient(135deg, #313244 0%, #45475a 100%);
            padding: 16px 24px;
            display: flex;
            align-items: center;
            justify-content: space-between;
            border-bottom: 1px solid #45475a;
            position: sticky;
            top: 0;
            z-index: 100;
        }
        .header h1 { font-size: 18px; font-weight: 600; color: #cdd6f4; }
        .header .stats { display: flex; gap: 16px; align-items: center; }
        .header .stat { padding: 6px 12px; border-radius: 6px; font-size: 13px; font-weight: 500; }
        .stat.changes { background: #45475a; color: #f9e2af; }
        .diff-container { display: flex; overflow: hidden; }
        .diff-panel {
            flex: 1;
            overflow-x: auto;
            overflow-y: scroll;
            height: calc(100vh - 60px);
        }
        .diff-panel:first-child { border-right: 2px solid #45475a; }
        .panel-header {
            background: #313244;
            padding: 12px 16px;
            font-size: 14px;
            font-weight: 600;
            color: #89b4fa;
            position: sticky;
            top: 0;
            z-index: 10;
            border-bottom: 1px solid #45475a;
        }
        .line { display: flex; min-height: 22px; line-height: 22px; font-size: 13px; }
        .line-num {
            width: 60px;
            min-width: 60px;
            text-align: right;
            padding-right: 12px;
            color: #6c7086;
            user-select: none;
            background: rgba(0, 0, 0, 0.15);
        }
        .line-content { flex: 1; padding-left: 12px; white-space: pre; }
        .line.equal { background: transparent; }
        .line.added { background: rgba(166, 227, 161, 0.15); }
        .line.added .line-num { background: rgba(166, 227, 161, 0.25); color: #a6e3a1; }
        .line.added .line-content { color: #a6e3a1; }
        .line.removed { background: rgba(243, 139, 168, 0.15); }
        .line.removed .line-num { background: rgba(243, 139, 168, 0.25); color: #f38ba8; }
        .line.removed .line-content { color: #f38ba8; }
        .line.empty { background: rgba(0, 0, 0, 0.1); }
        .line.empty .line-num { background: rgba(0, 0, 0, 0.2); }
        .diff-panel::-webkit-scrollbar { width: 10px; }
        .diff-panel::-webkit-scrollbar-track { background: #1e1e2e; }
        .diff-panel::-webkit-scrollbar-thumb { background: #45475a; border-radius: 5px; }
        .diff-panel::-webkit-scrollbar-thumb:hover { background: #585b70; }
        .nav-hint {
            position: fixed;
            bottom: 20px;
            left: 50%;
            transform: translateX(-50%);
            background: #313244;
            padding: 8px 16px;
            border-radius: 8px;
            font-size: 12px;
            color: #a6adc8;
            border: 1px solid #45475a;
        }
        .nav-hint kbd { background: #45475a; padding: 2px 6px; border-radius: 4px; margin: 0 2px; }
"#;

const SCROLL_SYNC: &str = r#"    <script>
        var leftPanel = document.getElementById("left-panel");
        var rightPanel = document.getElementById("right-panel");
        var isSyncing = false;
        function mirror(from, to) {
            return function() {
                if (isSyncing) return;
                isSyncing = true;
                to.scrollTop = from.scrollTop;
                isSyncing = false;
            };
        }
        leftPanel.addEventListener("scroll", mirror(leftPanel, rightPanel));
        rightPanel.addEventListener("scroll", mirror(rightPanel, leftPanel));
    </script>
"#;

/// Summary of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPage {
    pub html: String,
    pub change_count: usize,
    pub old_line_count: usize,
    pub new_line_count: usize,
}

/// Diff two manifest bodies and render the comparison page.
///
/// `old_build` is the build the user navigated from, `new_build` the one they
/// asked to compare with. Labels are taken verbatim and escaped.
pub fn render_diff_page(
    old_build: &str,
    new_build: &str,
    old_text: &str,
    new_text: &str,
) -> DiffPage {
    let old_lines = split_lines(old_text);
    let new_lines = split_lines(new_text);
    let rendered = render_alignment(&diff_lines(&old_lines, &new_lines));

    let html = build_document(
        &escape_html(old_build),
        &escape_html(new_build),
        old_lines.len(),
        new_lines.len(),
        &rendered,
    );

    DiffPage {
        html,
        change_count: rendered.change_count,
        old_line_count: old_lines.len(),
        new_line_count: new_lines.len(),
    }
}

fn build_document(
    old_build: &str,
    new_build: &str,
    old_count: usize,
    new_count: usize,
    rendered: &RenderedDiff,
) -> String {
    let mut out = String::with_capacity(STYLE.len() + 256 * (rendered.left.len() + 8));

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n");
    out.push_str(&format!("    <title>Diff: Build {} vs {}</title>\n", old_build, new_build));
    out.push_str("    <style>\n");
    out.push_str(STYLE);
    out.push_str("    </style>\n</head>\n<body>\n");

    out.push_str("    <div class=\"header\">\n");
    out.push_str(&format!(
        "        <h1>\u{2696} Manifest Diff: Build {} \u{2192} Build {}</h1>\n",
        old_build, new_build
    ));
    out.push_str("        <div class=\"stats\">\n");
    out.push_str(&format!(
        "            <span class=\"stat changes\">{} changes</span>\n",
        rendered.change_count
    ));
    out.push_str("        </div>\n    </div>\n");

    out.push_str("    <div class=\"diff-container\">\n");
    push_panel(&mut out, "left-panel", old_build, old_count, &rendered.left_html());
    push_panel(&mut out, "right-panel", new_build, new_count, &rendered.right_html());
    out.push_str("    </div>\n");

    out.push_str("    <div class=\"nav-hint\">\n");
    out.push_str("        <kbd>\u{2191}</kbd><kbd>\u{2193}</kbd> Scroll");
    out.push_str(" &nbsp;|&nbsp; Panels scroll in sync\n");
    out.push_str("    </div>\n");
    out.push_str(SCROLL_SYNC);
    out.push_str("</body>\n</html>");

    out
}

fn push_panel(out: &mut String, id: &str, build: &str, line_count: usize, rows: &str) {
    out.push_str(&format!("        <div class=\"diff-panel\" id=\"{}\">\n", id));
    out.push_str(&format!(
        "            <div class=\"panel-header\">\u{1F4C4} Build {} ({} lines)</div>\n",
        build, line_count
    ));
    out.push_str("            ");
    out.push_str(rows);
    out.push_str("\n        </div>\n");
}
