//! CLI commands

pub mod build;
pub mod clean;
pub mod import;
pub mod list;
pub mod render;
