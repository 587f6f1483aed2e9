//! CLI commands for precommit-release
//!
//! - **release**: validate, tag, package, and publish one release

pub mod release;

pub use release::run_release;
