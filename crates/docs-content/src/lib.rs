//! Frontmatter parsing, text-preserving editing and Markdown scanning
//!
//! Everything here works on in-memory text. File access and reporting
//! live in the layers above.

pub mod diff;
pub mod edit;
pub mod error;
pub mod frontmatter;
pub mod lines;
pub mod links;
pub mod markdown;
pub mod yaml;

pub use edit::FrontmatterEditor;
pub use error::{Error, Result};
pub use frontmatter::{Frontmatter, ParsedDocument, Split};
pub use lines::Line;
pub use links::RawLink;
pub use markdown::{FenceScan, LineRole};
