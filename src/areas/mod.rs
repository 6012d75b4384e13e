//! Core repository components
//!
//! This module contains the building blocks of a sit repository:
//!
//! - `history`: the append-only history file on disk (locking, append,
//!   tail rewrite)
//! - `repository`: high-level repository operations and coordination
//! - `workspace`: working directory scanning and checkout reconciliation

pub(crate) mod history;
pub mod repository;
pub(crate) mod workspace;
