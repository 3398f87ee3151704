//! Filesystem layer for the docs-cms linter
//!
//! Provides normalized path handling, atomic text I/O, format-agnostic
//! config loading and detection of the CMS root inside a repository.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use config::ConfigStore;
pub use constants::CmsPath;
pub use error::{Error, Result};
pub use layout::CmsLayout;
pub use path::NormalizedPath;
