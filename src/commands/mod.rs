//! Command implementations for the wikidoc CLI.

pub mod check;
pub mod config;
pub mod preview;
pub mod show;
