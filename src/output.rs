use crate::error::{Result, TocError};
use std::fmt;
use std::fs;
use std::path::Path;

/// How the TOC ended up in the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// An existing marker pair was refreshed
    Updated,
    /// A marker-wrapped block was added to an existing file
    Inserted,
    /// The file was (re)written with only the TOC
    Written,
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated => write!(f, "TOC updated in"),
            Self::Inserted => write!(f, "TOC inserted in"),
            Self::Written => write!(f, "TOC written to"),
        }
    }
}

/// Combine a freshly generated TOC with the current output file contents
///
/// `existing` is `None` when the output file does not exist yet.
pub fn merge_toc(existing: Option<&str>, toc: &str, marker: Option<&str>) -> (String, MergeOutcome) {
    let Some(marker) = marker.filter(|m| !m.is_empty()) else {
        return (toc.to_string(), MergeOutcome::Written);
    };

    let block = format!("{marker}\n{toc}\n{marker}");

    let Some(content) = existing else {
        return (block, MergeOutcome::Written);
    };

    if let Some((start, end)) = find_marker_pair(content, marker) {
        let mut merged = String::with_capacity(content.len() + toc.len());
        merged.push_str(&content[..start]);
        merged.push_str(&block);
        merged.push_str(&content[end..]);
        return (merged, MergeOutcome::Updated);
    }

    let mut lines: Vec<&str> = content.split('\n').collect();
    if lines.first().is_some_and(|first| first.starts_with('#')) {
        lines.insert(1, "");
        lines.insert(2, &block);
    } else {
        lines.insert(0, &block);
        lines.insert(1, "");
    }

    (lines.join("\n"), MergeOutcome::Inserted)
}

/// Byte range from the start of the first marker to the end of the second
fn find_marker_pair(content: &str, marker: &str) -> Option<(usize, usize)> {
    let start = content.find(marker)?;
    let after_first = start + marker.len();
    let second = content[after_first..].find(marker)?;
    Some((start, after_first + second + marker.len()))
}

/// Merge the TOC into the file at `path`, creating it if needed
pub fn write_toc(path: &Path, toc: &str, marker: Option<&str>) -> Result<MergeOutcome> {
    let existing = if path.exists() {
        Some(fs::read_to_string(path).map_err(|source| TocError::Read {
            path: path.to_path_buf(),
            source,
        })?)
    } else {
        None
    };

    let (contents, outcome) = merge_toc(existing.as_deref(), toc, marker);
    fs::write(path, contents).map_err(|source| TocError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("{:?} {}", outcome, path.display());
    Ok(outcome)
}
