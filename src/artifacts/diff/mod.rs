//! Tree comparison and change emission
//!
//! The differ turns two tree states (typically the folded staged tree and a
//! live working-directory scan) into the minimal operation list that folds
//! the first into the second.

pub mod tree_diff;
