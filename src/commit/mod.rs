//! Heuristic commit messages from staged changes.

pub mod analysis;
pub mod classify;
pub mod diff;
pub mod message;

pub use analysis::{Analysis, analyze};
pub use classify::{SUGGESTION_CAP, matching_rules, suggest};
pub use diff::{ChangedFile, DiffSummary, FileStatus, parse_diff};
pub use message::{MessageReview, MessageStyle, Suggestion, review_message};
