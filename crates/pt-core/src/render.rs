//! Side-by-side rendering of an alignment
//!
//! Every record yields one row on each side. A record that exists on only one
//! side gets an empty placeholder row on the other, so both columns always
//! have the same height and scroll in lockstep.

use std::fmt;

use crate::diff::{Alignment, DiffRecord};

/// Visual classification of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Equal,
    Added,
    Removed,
    /// Placeholder opposite an added or removed line
    Empty,
}

impl RowKind {
    /// CSS class used by the diff page.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// One visual row. `text` is already HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub line: Option<usize>,
    pub text: String,
}

impl Row {
    fn numbered(kind: RowKind, line: usize, raw: &str) -> Self {
        Self {
            kind,
            line: Some(line),
            text: escape_html(raw),
        }
    }

    fn empty() -> Self {
        Self {
            kind: RowKind::Empty,
            line: None,
            text: String::new(),
        }
    }

    /// Append this row's markup to `out`.
    pub fn write_html(&self, out: &mut String) {
        out.push_str("<div class=\"line ");
        out.push_str(self.kind.css_class());
        out.push_str("\"><span class=\"line-num\">");
        if let Some(line) = self.line {
            out.push_str(&line.to_string());
        }
        out.push_str("</span><span class=\"line-content\">");
        out.push_str(&self.text);
        out.push_str("</span></div>");
    }

    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 96);
        self.write_html(&mut out);
        out
    }
}

/// Both columns of a rendered diff plus the number of changed records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDiff {
    pub left: Vec<Row>,
    pub right: Vec<Row>,
    pub change_count: usize,
}

impl RenderedDiff {
    pub fn left_html(&self) -> String {
        rows_html(&self.left)
    }

    pub fn right_html(&self) -> String {
        rows_html(&self.right)
    }
}

fn rows_html(rows: &[Row]) -> String {
    let mut out = String::new();
    for row in rows {
        row.write_html(&mut out);
    }
    out
}

/// Turn an alignment into two parallel row listings.
pub fn render_alignment(alignment: &Alignment) -> RenderedDiff {
    let mut rendered = RenderedDiff {
        left: Vec::with_capacity(alignment.len()),
        right: Vec::with_capacity(alignment.len()),
        change_count: 0,
    };

    for record in alignment {
        match record {
            DiffRecord::Equal { old_line, new_line, text } => {
                rendered.left.push(Row::numbered(RowKind::Equal, *old_line, text));
                rendered.right.push(Row::numbered(RowKind::Equal, *new_line, text));
            }
            DiffRecord::Removed { old_line, text } => {
                rendered.left.push(Row::numbered(RowKind::Removed, *old_line, text));
                rendered.right.push(Row::empty());
                rendered.change_count += 1;
            }
            DiffRecord::Added { new_line, text } => {
                rendered.left.push(Row::empty());
                rendered.right.push(Row::numbered(RowKind::Added, *new_line, text));
                rendered.change_count += 1;
            }
        }
    }

    rendered
}

/// Escape `&`, `<`, `>` and `"` for embedding in markup.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff_lines;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">&</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
        assert_eq!(escape_html("it's"), "it's");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_substitution_rows() {
        let rendered = render_alignment(&diff_lines(&["a", "b", "c"], &["a", "x", "c"]));
        assert_eq!(rendered.change_count, 2);

        let left: Vec<(RowKind, Option<usize>, &str)> =
            rendered.left.iter().map(|r| (r.kind, r.line, r.text.as_str())).collect();
        assert_eq!(
            left,
            vec![
                (RowKind::Equal, Some(1), "a"),
                (RowKind::Removed, Some(2), "b"),
                (RowKind::Empty, None, ""),
                (RowKind::Equal, Some(3), "c"),
            ]
        );

        let right: Vec<(RowKind, Option<usize>, &str)> =
            rendered.right.iter().map(|r| (r.kind, r.line, r.text.as_str())).collect();
        assert_eq!(
            right,
            vec![
                (RowKind::Equal, Some(1), "a"),
                (RowKind::Empty, None, ""),
                (RowKind::Added, Some(2), "x"),
                (RowKind::Equal, Some(3), "c"),
            ]
        );
    }

    #[test]
    fn test_columns_have_equal_height() {
        let rendered = render_alignment(&diff_lines(&["1", "2", "3"], &["4"]));
        assert_eq!(rendered.left.len(), rendered.right.len());
        assert_eq!(rendered.left.len(), 4);
        assert_eq!(rendered.change_count, 4);
    }

    #[test]
    fn test_empty_alignment() {
        let empty: [&str; 0] = [];
        let rendered = render_alignment(&diff_lines(&empty, &empty));
        assert!(rendered.left.is_empty());
        assert!(rendered.right.is_empty());
        assert_eq!(rendered.change_count, 0);
        assert_eq!(rendered.left_html(), "");
    }

    #[test]
    fn test_row_html() {
        let rendered = render_alignment(&diff_lines(&["<x/>"], &[]));
        assert_eq!(
            rendered.left[0].to_html(),
            "<div class=\"line removed\"><span class=\"line-num\">1</span><span class=\"line-content\">&lt;x/&gt;</span></div>"
        );
        assert_eq!(
            rendered.right[0].to_html(),
            "<div class=\"line empty\"><span class=\"line-num\"></span><span class=\"line-content\"></span></div>"
        );
    }
}
