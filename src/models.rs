/// A single ATX heading found in a markdown file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Number of leading `#` characters (1-6)
    pub level: usize,

    /// Heading text, trimmed
    pub text: String,

    /// URL fragment, unique within the file
    pub anchor: String,
}

/// Headings extracted from one markdown file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    /// Path relative to the scanned root, `/`-separated
    pub path: String,

    /// Headings in document order
    pub headings: Vec<Heading>,
}

impl ParsedFile {
    pub fn new(path: impl Into<String>, headings: Vec<Heading>) -> Self {
        Self {
            path: path.into(),
            headings,
        }
    }

    /// Directory part of the path, `.` for files at the root
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => ".",
        }
    }

    /// Final path segment
    pub fn file_name(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[idx + 1..],
            None => &self.path,
        }
    }

    pub fn has_headings(&self) -> bool {
        !self.headings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_and_file_name() {
        let root = ParsedFile::new("README.md", vec![]);
        assert_eq!(root.directory(), ".");
        assert_eq!(root.file_name(), "README.md");

        let nested = ParsedFile::new("docs/api/index.md", vec![]);
        assert_eq!(nested.directory(), "docs/api");
        assert_eq!(nested.file_name(), "index.md");
    }

    #[test]
    fn test_has_headings() {
        let empty = ParsedFile::new("a.md", vec![]);
        assert!(!empty.has_headings());

        let full = ParsedFile::new(
            "a.md",
            vec![Heading {
                level: 1,
                text: "A".to_string(),
                anchor: "a".to_string(),
            }],
        );
        assert!(full.has_headings());
    }
}
