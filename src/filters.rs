use crate::config::Config;
use crate::error::{Result, TocError};
use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Path segments that are never part of a table of contents
pub const BUILTIN_EXCLUDED_SEGMENTS: &[&str] = &["node_modules", ".git"];

/// Check whether any segment of a `/`-separated relative path is built-in excluded
pub fn is_builtin_excluded(relative_path: &str) -> bool {
    relative_path
        .split('/')
        .any(|segment| BUILTIN_EXCLUDED_SEGMENTS.contains(&segment))
}

/// Check whether the file name is `readme.md`, ignoring case
pub fn is_readme(relative_path: &str) -> bool {
    let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    name.eq_ignore_ascii_case("readme.md")
}

/// User ignore patterns with gitignore semantics
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    gitignore: Gitignore,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> Result<Self> {
        // Candidates are already root-relative; an empty base keeps the
        // builder from stripping a prefix that merely looks like the root
        let mut builder = GitignoreBuilder::new("");
        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .map_err(|e| TocError::Pattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
        }

        let gitignore = builder.build().map_err(|e| TocError::Pattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self { gitignore })
    }

    /// Check a relative file path (or any of its parent directories) against the patterns
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        self.gitignore
            .matched_path_or_any_parents(relative_path, false)
            .is_ignore()
    }
}

/// The filtering gates applied to every discovered candidate, in order
#[derive(Debug, Clone)]
pub struct PathFilter {
    ignore: IgnoreMatcher,
    exclude_readme: bool,
}

impl PathFilter {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            ignore: IgnoreMatcher::new(&config.ignore)?,
            exclude_readme: config.exclude_readme,
        })
    }

    pub fn allows(&self, relative_path: &str) -> bool {
        !is_builtin_excluded(relative_path)
            && !self.ignore.is_ignored(relative_path)
            && !(self.exclude_readme && is_readme(relative_path))
    }
}
