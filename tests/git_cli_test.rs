//! Integration tests for the git adapter against real repositories.

mod common;

use stagehint::git::CommitType;
use stagehint::{GitCli, GitError, Vcs, parse_diff, suggest};

use common::TestRepo;

fn git_for(repo: &TestRepo) -> GitCli {
    GitCli::new("git", repo.path())
}

#[test]
fn test_is_repository_inside_work_tree() {
    let repo = TestRepo::new();
    assert!(git_for(&repo).is_repository());
}

#[test]
fn test_is_repository_in_subdirectory() {
    let repo = TestRepo::new();
    repo.write("nested/dir/file.txt", "x\n");
    let git = GitCli::new("git", repo.path().join("nested/dir"));
    assert!(git.is_repository());
}

#[test]
fn test_is_repository_false_for_plain_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!GitCli::new("git", dir.path()).is_repository());
}

#[test]
fn test_staged_diff_empty_when_only_unstaged_changes() {
    let repo = TestRepo::new();
    repo.write("untracked.txt", "not staged\n");
    assert_eq!(git_for(&repo).staged_diff().unwrap(), "");
}

#[test]
fn test_staged_diff_contains_staged_file() {
    let repo = TestRepo::new();
    repo.write_staged("src/lib.rs", "pub fn answer() -> u32 { 42 }\n");

    let diff = git_for(&repo).staged_diff().unwrap();
    assert!(diff.contains("diff --git a/src/lib.rs b/src/lib.rs"));
    assert!(diff.contains("new file mode"));
    assert!(diff.contains("+pub fn answer() -> u32 { 42 }"));
}

#[test]
fn test_staged_diff_paths_survive_prefix_and_quoting_config() {
    for (key, value) in [("diff.mnemonicPrefix", "true"), ("diff.noprefix", "true")] {
        let repo = TestRepo::new();
        repo.set_config(key, value);
        repo.set_config("core.quotepath", "true");
        repo.write_staged(".github/workflows/ci.yml", "on: push\n");
        repo.write_staged("docs/café.md", "# Menu\n");

        let summary = parse_diff(&git_for(&repo).staged_diff().unwrap());
        let paths: Vec<&str> = summary.changed_files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec![".github/workflows/ci.yml", "docs/café.md"], "with {}={}", key, value);
        assert!(
            suggest(&summary, 5).iter().any(|s| s.category == CommitType::Ci),
            "ci suggestion missing with {}={}",
            key,
            value
        );
    }
}

#[test]
fn test_staged_diff_outside_repository_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = GitCli::new("git", dir.path()).staged_diff();
    assert!(
        matches!(result, Err(GitError::CommandFailed { ref operation, .. }) if operation == "diff"),
        "Expected CommandFailed, got: {:?}",
        result
    );
}

#[test]
fn test_commit_records_message() {
    let repo = TestRepo::new();
    repo.write_staged("notes.md", "hello\n");

    let output = git_for(&repo).commit("docs: update notes.md").unwrap();
    assert!(output.contains("docs: update notes.md"));
    assert_eq!(repo.head_message().trim(), "docs: update notes.md");
}

#[test]
fn test_commit_with_nothing_staged_fails() {
    let repo = TestRepo::new();
    let result = git_for(&repo).commit("chore: nothing");
    assert!(matches!(result, Err(GitError::CommandFailed { .. })));
}
