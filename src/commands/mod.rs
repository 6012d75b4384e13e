//! CLI command implementations

pub mod porcelain;
