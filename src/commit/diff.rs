//! Parsing of raw `git diff` text into a file list and line counts.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Status of a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Added => write!(f, "Added"),
            FileStatus::Modified => write!(f, "Modified"),
            FileStatus::Deleted => write!(f, "Deleted"),
            FileStatus::Renamed => write!(f, "Renamed"),
        }
    }
}

/// A file that appears in the staged diff.
#[derive(Debug, Clone, Serialize)]
pub struct ChangedFile {
    pub path: String,
    pub status: FileStatus,
    /// Old path for renamed files (None for non-rename changes).
    pub old_path: Option<String>,
    pub additions: usize,
    pub deletions: usize,
}

impl ChangedFile {
    fn new(path: String) -> Self {
        Self {
            path,
            status: FileStatus::Modified,
            old_path: None,
            additions: 0,
            deletions: 0,
        }
    }

    /// Final path component, falling back to the full path.
    pub fn file_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.path)
    }

    pub fn changed_lines(&self) -> usize {
        self.additions + self.deletions
    }
}

/// Summary of the staged changes.
#[derive(Debug, Clone, Default)]
pub struct DiffSummary {
    pub diff_text: String,
    /// Files in diff order.
    pub changed_files: Vec<ChangedFile>,
    pub additions: usize,
    pub deletions: usize,
}

impl DiffSummary {
    /// True when the diff text has no content at all.
    pub fn is_empty(&self) -> bool {
        self.diff_text.trim().is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.changed_files.len()
    }

    /// The file with the most changed lines; the earliest wins a tie.
    pub fn primary_file(&self) -> Option<&ChangedFile> {
        self.changed_files
            .iter()
            .fold(None, |best: Option<&ChangedFile>, file| match best {
                Some(b) if b.changed_lines() >= file.changed_lines() => Some(b),
                _ => Some(file),
            })
    }

    pub fn files_with_status(&self, status: FileStatus) -> impl Iterator<Item = &ChangedFile> {
        self.changed_files.iter().filter(move |f| f.status == status)
    }
}

/// Parse unified diff text as produced by `git diff`.
///
/// Files come from `diff --git` headers. Status is read from the extended
/// header lines, and `+`/`-` lines are only counted inside hunks so the
/// `+++`/`---` file headers are never mistaken for content.
pub fn parse_diff(text: &str) -> DiffSummary {
    let mut files: Vec<ChangedFile> = Vec::new();
    let mut in_hunk = false;

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            let (old, new) = split_header_paths(rest);
            let mut file = ChangedFile::new(new.unwrap_or_else(|| old.clone()));
            file.old_path = Some(old);
            files.push(file);
            in_hunk = false;
            continue;
        }

        let Some(file) = files.last_mut() else {
            continue;
        };

        if line.starts_with("@@") {
            in_hunk = true;
            continue;
        }

        if in_hunk {
            match line.as_bytes().first() {
                Some(b'+') => file.additions += 1,
                Some(b'-') => file.deletions += 1,
                _ => {}
            }
            continue;
        }

        if line.starts_with("new file mode") {
            file.status = FileStatus::Added;
        } else if line.starts_with("deleted file mode") {
            file.status = FileStatus::Deleted;
        } else if let Some(from) = line.strip_prefix("rename from ") {
            file.status = FileStatus::Renamed;
            file.old_path = Some(unquote(from));
        } else if let Some(to) = line.strip_prefix("rename to ") {
            file.path = unquote(to);
        }
    }

    for file in &mut files {
        if file.status != FileStatus::Renamed {
            file.old_path = None;
        }
    }

    DiffSummary {
        diff_text: text.to_string(),
        additions: files.iter().map(|f| f.additions).sum(),
        deletions: files.iter().map(|f| f.deletions).sum(),
        changed_files: files,
    }
}

/// Split `a/<old> b/<new>` from a `diff --git` header.
fn split_header_paths(rest: &str) -> (String, Option<String>) {
    match rest.rfind(" b/").or_else(|| rest.rfind(" \"b/")) {
        Some(idx) => {
            let old = strip_side(&rest[..idx], "a/");
            let new = strip_side(&rest[idx + 1..], "b/");
            (old, Some(new))
        }
        None => (strip_side(rest, "a/"), None),
    }
}

fn strip_side(path: &str, prefix: &str) -> String {
    let path = unquote(path);
    path.strip_prefix(prefix).map(str::to_string).unwrap_or(path)
}

fn unquote(path: &str) -> String {
    path.trim().trim_matches('"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODIFY_AND_ADD: &str = "\
diff --git a/src/lib.rs b/src/lib.rs
index 3b18e51..a1b2c3d 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,3 +1,4 @@
 pub mod git;
-pub mod old;
+pub mod new;
+pub mod extra;
diff --git a/src/new.rs b/src/new.rs
new file mode 100644
index 0000000..e69de29
--- /dev/null
+++ b/src/new.rs
@@ -0,0 +1,2 @@
+pub fn hello() {}
+--- not a header
";

    #[test]
    fn test_file_status_display() {
        assert_eq!(FileStatus::Added.to_string(), "Added");
        assert_eq!(FileStatus::Modified.to_string(), "Modified");
        assert_eq!(FileStatus::Deleted.to_string(), "Deleted");
        assert_eq!(FileStatus::Renamed.to_string(), "Renamed");
    }

    #[test]
    fn test_parse_counts_exclude_file_headers() {
        let summary = parse_diff(MODIFY_AND_ADD);
        assert_eq!(summary.file_count(), 2);
        assert_eq!(summary.additions, 4);
        assert_eq!(summary.deletions, 1);

        let lib = &summary.changed_files[0];
        assert_eq!(lib.path, "src/lib.rs");
        assert_eq!(lib.status, FileStatus::Modified);
        assert_eq!((lib.additions, lib.deletions), (2, 1));
        assert!(lib.old_path.is_none());

        let new = &summary.changed_files[1];
        assert_eq!(new.status, FileStatus::Added);
        assert_eq!(new.additions, 2);
    }

    #[test]
    fn test_parse_deleted_file() {
        let diff = "\
diff --git a/old.txt b/old.txt
deleted file mode 100644
index e69de29..0000000
--- a/old.txt
+++ /dev/null
@@ -1 +0,0 @@
-gone
";
        let summary = parse_diff(diff);
        assert_eq!(summary.changed_files[0].status, FileStatus::Deleted);
        assert_eq!(summary.deletions, 1);
        assert_eq!(summary.additions, 0);
    }

    #[test]
    fn test_parse_rename() {
        let diff = "\
diff --git a/src/util.rs b/src/helpers.rs
similarity index 100%
rename from src/util.rs
rename to src/helpers.rs
";
        let summary = parse_diff(diff);
        let file = &summary.changed_files[0];
        assert_eq!(file.status, FileStatus::Renamed);
        assert_eq!(file.path, "src/helpers.rs");
        assert_eq!(file.old_path.as_deref(), Some("src/util.rs"));
    }

    #[test]
    fn test_parse_empty_text() {
        let summary = parse_diff("");
        assert!(summary.is_empty());
        assert_eq!(summary.file_count(), 0);
        assert!(summary.primary_file().is_none());
    }

    #[test]
    fn test_primary_file_prefers_most_changed() {
        let summary = parse_diff(MODIFY_AND_ADD);
        assert_eq!(summary.primary_file().unwrap().path, "src/lib.rs");
    }

    #[test]
    fn test_primary_file_tie_keeps_first() {
        let diff = "\
diff --git a/a.rs b/a.rs
@@ -1 +1 @@
-a
+b
diff --git a/b.rs b/b.rs
@@ -1 +1 @@
-c
+d
";
        let summary = parse_diff(diff);
        assert_eq!(summary.primary_file().unwrap().path, "a.rs");
    }

    #[test]
    fn test_file_name_strips_directories() {
        let summary = parse_diff(MODIFY_AND_ADD);
        assert_eq!(summary.changed_files[1].file_name(), "new.rs");
    }
}
