use crate::config::Config;
use crate::error::{Result, TocError};
use crate::filters::{self, PathFilter};
use crate::models::ParsedFile;
use crate::parser::HeadingParser;
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path};

/// Scan a directory and return every markdown file that has headings, sorted by path
pub fn scan_directory(root: &Path, config: &Config) -> Result<Vec<ParsedFile>> {
    let candidates = collect_files(root, config)?;
    log::debug!("{} candidate files after filtering", candidates.len());

    let parser = HeadingParser::new()?;

    // par_iter keeps candidate order in the collected Vec
    let parsed: Vec<ParsedFile> = candidates
        .par_iter()
        .map(|relative| parse_file(root, relative, &parser))
        .collect::<Result<_>>()?;

    let files: Vec<ParsedFile> = parsed
        .into_iter()
        .filter(|file| {
            if !file.has_headings() {
                log::debug!("Skipping {}: no headings", file.path);
            }
            file.has_headings()
        })
        .collect();

    log::info!("Found headings in {} files", files.len());
    Ok(files)
}

/// Discover and filter candidate files
///
/// Returns `/`-separated paths relative to `root`, de-duplicated and sorted.
pub fn collect_files(root: &Path, config: &Config) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(TocError::RootNotFound(root.to_path_buf()));
    }

    let include_set = IncludeSet::new(&config.include)?;
    let filter = PathFilter::new(config)?;

    let mut walker = WalkBuilder::new(root);
    walker
        .standard_filters(false)
        .max_depth(Some(config.max_depth));

    // Don't descend into directories that can never contribute
    walker.filter_entry(|entry| {
        entry.depth() == 0
            || !entry
                .file_name()
                .to_str()
                .is_some_and(|name| filters::BUILTIN_EXCLUDED_SEGMENTS.contains(&name))
    });

    let mut candidates = BTreeSet::new();
    for result in walker.build() {
        let entry = result?;

        // Follows symlinks, so linked files count and dangling links don't
        if !entry.path().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = to_slash_path(relative);

        if !include_set.is_match(&relative) {
            continue;
        }

        if filter.allows(&relative) {
            candidates.insert(relative);
        }
    }

    Ok(candidates.into_iter().collect())
}

/// Read one file and extract its headings
fn parse_file(root: &Path, relative: &str, parser: &HeadingParser) -> Result<ParsedFile> {
    let path = root.join(relative);
    let bytes = fs::read(&path).map_err(|source| TocError::Read {
        path: path.clone(),
        source,
    })?;

    let content = String::from_utf8_lossy(&bytes);
    let parsed = parser.parse(&content, relative);
    log::debug!("{}: {} headings", relative, parsed.headings.len());

    Ok(parsed)
}

/// Include globs where `*` does not cross `/`
///
/// Wildcards never match a segment with a leading `.`; a pattern reaches a
/// dot entry only by spelling that segment with a `.` itself, as in
/// `.github/*.md`.
struct IncludeSet {
    set: GlobSet,
    /// Per pattern, the pattern segments that start with `.`
    dot_segments: Vec<Vec<GlobMatcher>>,
}

impl IncludeSet {
    fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut dot_segments = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let normalized = pattern.strip_prefix("./").unwrap_or(pattern);
            let glob = GlobBuilder::new(normalized)
                .literal_separator(true)
                .build()
                .map_err(|e| TocError::Pattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            builder.add(glob);

            // A segment that doesn't compile alone (a split `{a/b}`) can't name a dot entry
            dot_segments.push(
                normalized
                    .split('/')
                    .filter(|segment| is_dot_segment(segment))
                    .filter_map(|segment| Glob::new(segment).ok())
                    .map(|glob| glob.compile_matcher())
                    .collect(),
            );
        }

        let set = builder.build().map_err(|e| TocError::Pattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self { set, dot_segments })
    }

    fn is_match(&self, relative_path: &str) -> bool {
        let hidden: Vec<&str> = relative_path
            .split('/')
            .filter(|segment| is_dot_segment(segment))
            .collect();

        if hidden.is_empty() {
            return self.set.is_match(relative_path);
        }

        self.set.matches(relative_path).into_iter().any(|index| {
            hidden.iter().all(|segment| {
                self.dot_segments[index]
                    .iter()
                    .any(|glob| glob.is_match(segment))
            })
        })
    }
}

fn is_dot_segment(segment: &str) -> bool {
    segment.starts_with('.') && segment != "." && segment != ".."
}

/// Join the normal components of a relative path with `/`
fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
