//! Porcelain commands (user-facing operations)
//!
//! Each file extends `Repository` with one user-facing command. Commands
//! never print directly: all output goes through the repository's writer so
//! tests can capture it.
//!
//! ## Commands
//!
//! - `init`: create the history file with its initial commit
//! - `add`: stage working-directory changes as operation records
//! - `status`: show staged operations and unstaged changes
//! - `stats`: repository counters
//! - `commit`: seal the staged operations
//! - `reset`: drop the staged operations
//! - `stash` / `unstash`: park and restore staged operations
//! - `checkout`: reconcile the working directory with a tree state
//! - `ls`: list tracked paths
//! - `log`: show the commit chain
//! - `diff`: preview the operations `add` would stage
//! - `stage`: print the staged records verbatim
//! - `clone`: copy another repository's history file
//! - `from_git`: import a Git repository

pub mod add;
pub mod checkout;
pub mod clone;
pub mod commit;
pub mod diff;
pub mod from_git;
pub mod init;
pub mod log;
pub mod ls;
pub mod reset;
pub mod stage;
pub mod stash;
pub mod stats;
pub mod status;
pub mod unstash;

use crate::artifacts::objects::operation::Operation;
use colored::{ColoredString, Colorize};

/// One colored summary line per operation, shared by status/add/diff output
pub(crate) fn colored_summary(operation: &Operation) -> ColoredString {
    let summary = operation.to_string();
    match operation {
        Operation::Delete { .. } => summary.red(),
        Operation::Rename { .. } => summary.yellow(),
        Operation::Patch { .. } => summary.cyan(),
        _ => summary.green(),
    }
}
