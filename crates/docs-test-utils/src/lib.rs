//! Shared test fixtures for the docs-cms linter workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`cms`]: [`cms::TestCms`], a temporary repository with a `docs-cms/` tree
//! - [`docs`]: valid documents of each type, ready to be broken by a test
//! - [`git`]: real repositories with commits at fixed timestamps

pub mod cms;
pub mod docs;
pub mod git;

pub use cms::TestCms;
