//! LCS line differ
//!
//! Aligns two line sequences on exact text equality. Lines are compared as-is:
//! no trimming, no case folding, no line-ending normalization.
//!
//! # Algorithm
//!
//! A full `(m+1) x (n+1)` longest-common-subsequence table is filled, then
//! walked backward from `(m, n)`. When the two candidate moves tie, the walk
//! takes the insertion, so `["a","b"]` vs `["b","a"]` always yields
//! `Removed a, Equal b, Added a` and never the mirror alignment.
//!
//! # Complexity
//!
//! O(m * n) time and space. Manifests are a few thousand lines at most.

use log::debug;

/// One record of an alignment. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRecord {
    /// Line present in both documents
    Equal {
        old_line: usize,
        new_line: usize,
        text: String,
    },
    /// Line present only in the old document
    Removed { old_line: usize, text: String },
    /// Line present only in the new document
    Added { new_line: usize, text: String },
}

impl DiffRecord {
    pub fn text(&self) -> &str {
        match self {
            Self::Equal { text, .. } | Self::Removed { text, .. } | Self::Added { text, .. } => {
                text
            }
        }
    }

    pub fn old_line(&self) -> Option<usize> {
        match self {
            Self::Equal { old_line, .. } | Self::Removed { old_line, .. } => Some(*old_line),
            Self::Added { .. } => None,
        }
    }

    pub fn new_line(&self) -> Option<usize> {
        match self {
            Self::Equal { new_line, .. } | Self::Added { new_line, .. } => Some(*new_line),
            Self::Removed { .. } => None,
        }
    }

    #[inline]
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Equal { .. })
    }
}

/// Ordered alignment between an old and a new document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    records: Vec<DiffRecord>,
}

impl Alignment {
    pub fn records(&self) -> &[DiffRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffRecord> {
        self.records.iter()
    }

    pub fn added_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, DiffRecord::Added { .. }))
            .count()
    }

    pub fn removed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, DiffRecord::Removed { .. }))
            .count()
    }

    /// Added plus removed records.
    pub fn change_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_change()).count()
    }

    /// Old document lines, in order.
    pub fn old_text(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(|r| r.old_line().is_some())
            .map(DiffRecord::text)
    }

    /// New document lines, in order.
    pub fn new_text(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(|r| r.new_line().is_some())
            .map(DiffRecord::text)
    }
}

impl<'a> IntoIterator for &'a Alignment {
    type Item = &'a DiffRecord;
    type IntoIter = std::slice::Iter<'a, DiffRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Split a document into lines on `\n` only.
///
/// A trailing newline produces a trailing empty line and an empty document is
/// one empty line, matching how the line counts are shown in the diff page.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Compute the alignment between `old` and `new`.
pub fn diff_lines<S: AsRef<str>>(old: &[S], new: &[S]) -> Alignment {
    let m = old.len();
    let n = new.len();
    let width = n + 1;

    // Row-major (m+1) x (n+1), row/column 0 stay zero.
    let mut dp = vec![0u32; (m + 1) * width];
    for i in 1..=m {
        let old_line = old[i - 1].as_ref();
        for j in 1..=n {
            dp[i * width + j] = if old_line == new[j - 1].as_ref() {
                dp[(i - 1) * width + (j - 1)] + 1
            } else {
                dp[(i - 1) * width + j].max(dp[i * width + (j - 1)])
            };
        }
    }

    let mut records = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1].as_ref() == new[j - 1].as_ref() {
            records.push(DiffRecord::Equal {
                old_line: i,
                new_line: j,
                text: old[i - 1].as_ref().to_string(),
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || dp[i * width + (j - 1)] >= dp[(i - 1) * width + j]) {
            records.push(DiffRecord::Added {
                new_line: j,
                text: new[j - 1].as_ref().to_string(),
            });
            j -= 1;
        } else {
            records.push(DiffRecord::Removed {
                old_line: i,
                text: old[i - 1].as_ref().to_string(),
            });
            i -= 1;
        }
    }
    records.reverse();

    let alignment = Alignment { records };
    debug!(
        "diff {}x{} lines: {} records, {} changes",
        m,
        n,
        alignment.len(),
        alignment.change_count()
    );
    alignment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal(old_line: usize, new_line: usize, text: &str) -> DiffRecord {
        DiffRecord::Equal { old_line, new_line, text: text.to_string() }
    }

    fn added(new_line: usize, text: &str) -> DiffRecord {
        DiffRecord::Added { new_line, text: text.to_string() }
    }

    fn removed(old_line: usize, text: &str) -> DiffRecord {
        DiffRecord::Removed { old_line, text: text.to_string() }
    }

    #[test]
    fn test_empty_vs_empty() {
        let empty: [&str; 0] = [];
        let alignment = diff_lines(&empty, &empty);
        assert!(alignment.is_empty());
        assert_eq!(alignment.change_count(), 0);
    }

    #[test]
    fn test_empty_vs_single() {
        let alignment = diff_lines(&[], &["x"]);
        assert_eq!(alignment.records(), &[added(1, "x")]);
        assert_eq!(alignment.change_count(), 1);

        let alignment = diff_lines(&["x"], &[]);
        assert_eq!(alignment.records(), &[removed(1, "x")]);
        assert_eq!(alignment.change_count(), 1);
    }

    #[test]
    fn test_single_substitution() {
        let alignment = diff_lines(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(
            alignment.records(),
            &[equal(1, 1, "a"), removed(2, "b"), added(2, "x"), equal(3, 3, "c")]
        );
        assert_eq!(alignment.change_count(), 2);
        assert_eq!(alignment.added_count(), 1);
        assert_eq!(alignment.removed_count(), 1);
    }

    #[test]
    fn test_tie_prefers_insertion() {
        // Both "keep a" and "keep b" are minimal; the walk must keep "b".
        let alignment = diff_lines(&["a", "b"], &["b", "a"]);
        assert_eq!(
            alignment.records(),
            &[removed(1, "a"), equal(2, 1, "b"), added(2, "a")]
        );
    }

    #[test]
    fn test_self_diff_is_all_equal() {
        let lines = ["<manifest>", "  <project name=\"llvm\"/>", "", "</manifest>"];
        let alignment = diff_lines(&lines, &lines);
        assert_eq!(alignment.len(), lines.len());
        assert_eq!(alignment.change_count(), 0);
        for (idx, record) in alignment.iter().enumerate() {
            assert_eq!(record, &equal(idx + 1, idx + 1, lines[idx]));
        }
    }

    #[test]
    fn test_reconstructs_both_sides() {
        let old = ["a", "b", "c", "a", "b", "b", "a"];
        let new = ["c", "b", "a", "b", "a", "c"];
        let alignment = diff_lines(&old, &new);

        assert_eq!(alignment.old_text().collect::<Vec<_>>(), old);
        assert_eq!(alignment.new_text().collect::<Vec<_>>(), new);

        // LCS length is 4, so every other line is a change.
        assert_eq!(alignment.change_count(), old.len() + new.len() - 2 * 4);
    }

    #[test]
    fn test_line_numbers_are_monotonic() {
        let old = ["x", "y", "z", "y", "x"];
        let new = ["y", "x", "y", "z"];
        let alignment = diff_lines(&old, &new);

        let olds: Vec<usize> = alignment.iter().filter_map(DiffRecord::old_line).collect();
        let news: Vec<usize> = alignment.iter().filter_map(DiffRecord::new_line).collect();
        assert_eq!(olds, (1..=old.len()).collect::<Vec<_>>());
        assert_eq!(news, (1..=new.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_swapped_inputs_swap_roles() {
        let a = ["one", "two", "three", "four"];
        let b = ["zero", "two", "four", "five"];
        let forward = diff_lines(&a, &b);
        let backward = diff_lines(&b, &a);

        assert_eq!(forward.len(), backward.len());
        assert_eq!(forward.added_count(), backward.removed_count());
        assert_eq!(forward.removed_count(), backward.added_count());
    }

    #[test]
    fn test_no_whitespace_normalization() {
        let alignment = diff_lines(&["a\r", " b"], &["a", "b"]);
        assert_eq!(alignment.change_count(), 4);
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb\n"), vec!["a\r", "b", ""]);
    }

    #[test]
    fn test_accepts_owned_strings() {
        let old = vec!["a".to_string(), "b".to_string()];
        let new = vec!["a".to_string()];
        let alignment = diff_lines(&old, &new);
        assert_eq!(alignment.records(), &[equal(1, 1, "a"), removed(2, "b")]);
    }
}
