//! Heuristic classification of a staged diff into commit suggestions.
//!
//! A fixed table of rules is evaluated in priority order. Each rule that
//! matches contributes one suggestion; when none match, a generic
//! "update N files" suggestion is used instead.

use tracing::debug;

use crate::commit::diff::{ChangedFile, DiffSummary, FileStatus};
use crate::commit::message::Suggestion;
use crate::git::CommitType;

/// Hard upper bound on the number of suggestions ever returned.
pub const SUGGESTION_CAP: usize = 5;

/// Both added and removed line counts must exceed this for a rewrite to
/// count as a refactor.
pub const REFACTOR_MIN_LINES: usize = 10;

/// Dependency manifests and lockfiles.
const BUILD_FILES: &[&str] = &[
    "Cargo.toml",
    "Cargo.lock",
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "go.mod",
    "go.sum",
    "requirements.txt",
    "pyproject.toml",
    "Gemfile",
    "Gemfile.lock",
    "pom.xml",
    "build.gradle",
    "Makefile",
];

const DOC_EXTENSIONS: &[&str] = &[".md", ".rst", ".txt", ".adoc"];

/// Diff data shared by every rule, computed once per classification.
struct Facts<'a> {
    summary: &'a DiffSummary,
    lower: String,
}

impl<'a> Facts<'a> {
    fn new(summary: &'a DiffSummary) -> Self {
        Self {
            summary,
            lower: summary.diff_text.to_lowercase(),
        }
    }

    fn files(&self) -> &'a [ChangedFile] {
        &self.summary.changed_files
    }

    fn mentions(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }

    fn primary_name(&self) -> Option<&'a str> {
        self.summary.primary_file().map(ChangedFile::file_name)
    }

    /// `<action> in <primary file>`, or just `<action>` without files.
    fn about_primary(&self, action: &str, joiner: &str) -> String {
        match self.primary_name() {
            Some(name) => format!("{} {} {}", action, joiner, name),
            None => action.to_string(),
        }
    }
}

/// One entry of the rule table.
struct Rule {
    name: &'static str,
    applies: fn(&Facts<'_>) -> bool,
    suggest: fn(&Facts<'_>) -> Suggestion,
}

/// Rules in priority order.
const RULES: &[Rule] = &[
    Rule {
        name: "test",
        applies: |f| f.mentions(&["test"]) || f.files().iter().any(is_test_file),
        suggest: |f| {
            let tests: Vec<_> = f.files().iter().filter(|c| is_test_file(c)).collect();
            match tests.as_slice() {
                [only] => Suggestion::new(CommitType::Test, format!("update tests in {}", only.file_name())),
                _ => Suggestion::new(CommitType::Test, "add or update tests"),
            }
        },
    },
    Rule {
        name: "docs",
        applies: |f| f.summary.diff_text.contains("README") || f.files().iter().any(is_doc_file),
        suggest: |f| {
            let docs: Vec<_> = f.files().iter().filter(|c| is_doc_file(c)).collect();
            match docs.as_slice() {
                [only] => Suggestion::new(CommitType::Docs, format!("update {}", only.file_name())),
                _ => Suggestion::new(CommitType::Docs, "update documentation"),
            }
        },
    },
    Rule {
        name: "fix",
        applies: |f| f.mentions(&["fix", "bug"]),
        suggest: |f| Suggestion::new(CommitType::Fix, f.about_primary("resolve issue", "in")),
    },
    Rule {
        name: "feat",
        applies: |f| f.files().iter().any(|c| c.status == FileStatus::Added),
        suggest: |f| {
            let added: Vec<_> = f.summary.files_with_status(FileStatus::Added).collect();
            match added.as_slice() {
                [only] => Suggestion::new(CommitType::Feat, format!("add {}", only.file_name())),
                many => Suggestion::new(CommitType::Feat, format!("add {} new files", many.len())),
            }
        },
    },
    Rule {
        name: "ci",
        applies: |f| f.files().iter().any(is_ci_file),
        suggest: |_| Suggestion::new(CommitType::Ci, "update pipeline configuration"),
    },
    Rule {
        name: "build",
        applies: |f| f.files().iter().any(is_build_file),
        suggest: |_| Suggestion::new(CommitType::Build, "update dependencies"),
    },
    Rule {
        name: "perf",
        applies: |f| f.mentions(&["perf", "optimi", "cache"]),
        suggest: |f| Suggestion::new(CommitType::Perf, f.about_primary("improve performance", "of")),
    },
    Rule {
        name: "remove",
        applies: |f| {
            let s = f.summary;
            (s.deletions > 0 && s.additions == 0)
                || s.files_with_status(FileStatus::Deleted).next().is_some()
        },
        suggest: |f| {
            let deleted: Vec<_> = f.summary.files_with_status(FileStatus::Deleted).collect();
            match deleted.as_slice() {
                [] => Suggestion::new(CommitType::Refactor, "remove unused code"),
                [only] => Suggestion::new(CommitType::Chore, format!("remove {}", only.file_name())),
                many => Suggestion::new(CommitType::Chore, format!("remove {} files", many.len())),
            }
        },
    },
    Rule {
        name: "refactor",
        applies: |f| {
            let s = f.summary;
            let balanced_rewrite = s.additions > REFACTOR_MIN_LINES
                && s.deletions > REFACTOR_MIN_LINES
                && s.additions.max(s.deletions) <= 2 * s.additions.min(s.deletions);
            balanced_rewrite || s.files_with_status(FileStatus::Renamed).next().is_some()
        },
        suggest: |f| {
            let renamed: Vec<_> = f.summary.files_with_status(FileStatus::Renamed).collect();
            match renamed.as_slice() {
                [only] => {
                    let from = only.old_path.as_deref().unwrap_or(&only.path);
                    let from = std::path::Path::new(from)
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or(from);
                    Suggestion::new(CommitType::Refactor, format!("rename {} to {}", from, only.file_name()))
                }
                _ => {
                    let description = match f.primary_name() {
                        Some(name) => format!("restructure {}", name),
                        None => "restructure code".to_string(),
                    };
                    Suggestion::new(CommitType::Refactor, description)
                }
            }
        },
    },
    Rule {
        name: "style",
        applies: |f| f.mentions(&["fmt", "format", "lint"]),
        suggest: |_| Suggestion::new(CommitType::Style, "format code"),
    },
];

fn is_test_file(file: &ChangedFile) -> bool {
    let path = file.path.to_lowercase();
    path.contains("test") || path.contains("spec")
}

fn is_doc_file(file: &ChangedFile) -> bool {
    let path = file.path.to_lowercase();
    path.starts_with("docs/")
        || path.contains("/docs/")
        || DOC_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn is_build_file(file: &ChangedFile) -> bool {
    let name = file.file_name();
    BUILD_FILES.iter().any(|build| *build == name)
}

fn is_ci_file(file: &ChangedFile) -> bool {
    file.path.starts_with(".github/workflows/")
        || file.path.starts_with(".circleci/")
        || file.file_name() == ".gitlab-ci.yml"
}

fn fallback(summary: &DiffSummary) -> Suggestion {
    let description = match summary.file_count() {
        0 => "update files".to_string(),
        1 => "update 1 file".to_string(),
        n => format!("update {} files", n),
    };
    Suggestion::new(CommitType::Chore, description)
}

/// Names of the rules that match the diff, in priority order.
pub fn matching_rules(summary: &DiffSummary) -> Vec<&'static str> {
    let facts = Facts::new(summary);
    RULES
        .iter()
        .filter(|rule| (rule.applies)(&facts))
        .map(|rule| rule.name)
        .collect()
}

/// Run `rules` in order, keeping the first of any identical suggestions.
fn apply_rules(rules: &[Rule], facts: &Facts<'_>) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = Vec::new();

    for rule in rules {
        if !(rule.applies)(facts) {
            continue;
        }
        let suggestion = (rule.suggest)(facts);
        debug!("Rule '{}' matched: {}", rule.name, suggestion);
        if suggestions.contains(&suggestion) {
            debug!("Rule '{}' repeats an earlier suggestion, skipping", rule.name);
            continue;
        }
        suggestions.push(suggestion);
    }

    suggestions
}

/// Produce suggestions for a non-empty diff.
///
/// Suggestions keep rule priority order, duplicates are dropped, and the
/// result holds at most `limit` entries (clamped to `1..=SUGGESTION_CAP`).
/// An empty diff yields no suggestions.
pub fn suggest(summary: &DiffSummary, limit: usize) -> Vec<Suggestion> {
    if summary.is_empty() {
        return Vec::new();
    }

    let limit = limit.clamp(1, SUGGESTION_CAP);
    let mut suggestions = apply_rules(RULES, &Facts::new(summary));

    if suggestions.is_empty() {
        debug!("No rule matched, using fallback");
        suggestions.push(fallback(summary));
    }

    suggestions.truncate(limit);
    suggestions
}
