//! Structured report of the staged changes for the `analyze` command.

use std::fmt::Write;

use serde::Serialize;

use crate::commit::classify::matching_rules;
use crate::commit::diff::{DiffSummary, FileStatus};

/// Number of files listed in the "largest changes" section.
const LARGEST_FILES_SHOWN: usize = 5;

/// Per-file line in the report.
#[derive(Debug, Clone, Serialize)]
pub struct FileChangeLine {
    pub path: String,
    pub status: FileStatus,
    pub additions: usize,
    pub deletions: usize,
}

/// Counts and detected categories for a staged diff.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub files: usize,
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub renamed: usize,
    pub additions: usize,
    pub deletions: usize,
    /// Most-changed files first.
    pub largest: Vec<FileChangeLine>,
    /// Names of the classifier rules that matched, in priority order.
    pub signals: Vec<&'static str>,
}

/// Build the analysis for a diff.
pub fn analyze(summary: &DiffSummary) -> Analysis {
    let count = |status| summary.files_with_status(status).count();

    let mut largest: Vec<FileChangeLine> = summary
        .changed_files
        .iter()
        .map(|f| FileChangeLine {
            path: f.path.clone(),
            status: f.status,
            additions: f.additions,
            deletions: f.deletions,
        })
        .collect();
    // Stable sort keeps diff order among equals.
    largest.sort_by(|a, b| (b.additions + b.deletions).cmp(&(a.additions + a.deletions)));
    largest.truncate(LARGEST_FILES_SHOWN);

    Analysis {
        files: summary.file_count(),
        added: count(FileStatus::Added),
        modified: count(FileStatus::Modified),
        deleted: count(FileStatus::Deleted),
        renamed: count(FileStatus::Renamed),
        additions: summary.additions,
        deletions: summary.deletions,
        largest,
        signals: matching_rules(summary),
    }
}

impl Analysis {
    /// Plain-text rendering for the terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} file(s) staged: {} added, {} modified, {} deleted, {} renamed",
            self.files, self.added, self.modified, self.deleted, self.renamed
        );
        let _ = writeln!(out, "Lines: +{} -{}", self.additions, self.deletions);

        if !self.largest.is_empty() {
            let _ = writeln!(out, "Largest changes:");
            for file in &self.largest {
                let _ = writeln!(
                    out,
                    "  {:<9} {} (+{} -{})",
                    file.status.to_string(),
                    file.path,
                    file.additions,
                    file.deletions
                );
            }
        }

        let signals = if self.signals.is_empty() {
            "none".to_string()
        } else {
            self.signals.join(", ")
        };
        let _ = write!(out, "Detected categories: {}", signals);
        out
    }
}
