//! mdtoc - Table of contents for every markdown file in a repository
//!
//! Walks a directory tree, extracts ATX headings from each markdown file and
//! renders one nested bullet list with anchor links into every file.
//!
//! # Features
//!
//! - Include globs, gitignore-style ignore patterns and a depth limit
//! - `node_modules` and `.git` are always skipped
//! - GitHub-style anchors, de-duplicated per file
//! - Headings inside fenced code blocks are ignored
//! - JSON, YAML or TOML configuration
//! - Marker-based insertion into an existing file
//!
//! # Example
//!
//! ```rust,no_run
//! use mdtoc::{generate, Config};
//! use std::path::Path;
//!
//! let toc = generate(Path::new("."), &Config::default()).unwrap();
//! println!("{}", toc);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod output;
pub mod parser;
pub mod reporter;
pub mod scanner;

use std::path::Path;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TocError};
pub use models::{Heading, ParsedFile};
pub use parser::HeadingParser;

/// Build the table of contents document for `root`
pub fn generate(root: &Path, config: &Config) -> Result<String> {
    let files = scanner::scan_directory(root, config)?;
    Ok(reporter::render_toc(&files, config.title.as_deref()))
}
