//! Git access by shelling out to the git binary.

pub mod cli;
pub mod commits;

pub use cli::{GitCli, GitOutput, Vcs, reports_failure};
pub use commits::{CommitType, ConventionalSubject, parse_subject};
