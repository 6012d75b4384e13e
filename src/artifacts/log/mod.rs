//! History-file record grammar
//!
//! The history file is line-oriented: a record starts in column 0 with a cue
//! word, and its body (if any) is the run of following lines indented by one
//! space. Bodies nest by adding one more space per level, so a record sequence
//! can itself be stored verbatim as the body of another record.

pub mod record;
