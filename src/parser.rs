use crate::error::Result;
use crate::models::{Heading, ParsedFile};
use regex::Regex;
use std::collections::HashSet;

const FENCE: &str = "```";

/// Extracts ATX headings from markdown text
///
/// Holds the compiled patterns so one parser can be shared across files
/// (and threads). Anchor de-duplication state lives inside each `parse`
/// call and never carries over between files.
#[derive(Debug, Clone)]
pub struct HeadingParser {
    heading: Regex,
    disallowed: Regex,
    whitespace: Regex,
}

impl HeadingParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            heading: Regex::new(r"^(#{1,6})\s+(.+)$")?,
            // Word characters are ASCII only
            disallowed: Regex::new(r"[^A-Za-z0-9_\s-]")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Parse `content` into the headings of the file at `path`
    pub fn parse(&self, content: &str, path: &str) -> ParsedFile {
        let mut headings = Vec::new();
        let mut seen = HashSet::new();
        let mut in_code_block = false;

        for line in content.lines() {
            if line.starts_with(FENCE) {
                in_code_block = !in_code_block;
                continue;
            }

            if in_code_block {
                continue;
            }

            let Some(captures) = self.heading.captures(line) else {
                continue;
            };

            let level = captures[1].len();
            let text = captures[2].trim();
            if text.is_empty() {
                continue;
            }

            let anchor = self.unique_anchor(text, &mut seen);
            headings.push(Heading {
                level,
                text: text.to_string(),
                anchor,
            });
        }

        ParsedFile::new(path, headings)
    }

    /// Turn heading text into a URL fragment, without de-duplication
    pub fn slugify(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.disallowed.replace_all(&lowered, "");
        let hyphenated = self.whitespace.replace_all(&stripped, "-");
        hyphenated.trim_matches('-').to_string()
    }

    /// Slugify `text` and suffix `-1`, `-2`, ... until it is not in `seen`
    fn unique_anchor(&self, text: &str, seen: &mut HashSet<String>) -> String {
        let base = self.slugify(text);

        let anchor = if seen.contains(&base) {
            let mut counter = 1;
            while seen.contains(&format!("{}-{}", base, counter)) {
                counter += 1;
            }
            format!("{}-{}", base, counter)
        } else {
            base
        };

        seen.insert(anchor.clone());
        anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ParsedFile {
        HeadingParser::new().unwrap().parse(content, "test.md")
    }

    #[test]
    fn test_parse_all_levels() {
        let content = "# Header 1\n## Header 2\n### Header 3\n#### Header 4\n##### Header 5\n###### Header 6";
        let result = parse(content);

        assert_eq!(result.path, "test.md");
        assert_eq!(result.headings.len(), 6);
        assert_eq!(
            result.headings[0],
            Heading {
                level: 1,
                text: "Header 1".to_string(),
                anchor: "header-1".to_string(),
            }
        );
        assert_eq!(
            result.headings[5],
            Heading {
                level: 6,
                text: "Header 6".to_string(),
                anchor: "header-6".to_string(),
            }
        );
    }

    #[test]
    fn test_level_and_text_match_line() {
        let result = parse("###\t  Spaced   out  \n####### Too deep\n#NoSpace\n #Indented");

        assert_eq!(result.headings.len(), 1);
        assert_eq!(result.headings[0].level, 3);
        assert_eq!(result.headings[0].text, "Spaced   out");
        assert_eq!(result.headings[0].anchor, "spaced-out");
    }

    #[test]
    fn test_ignores_headings_in_code_blocks() {
        let content = "# Real Header\n```\n# This is not a header\n```\n## Another Real Header";
        let result = parse(content);

        assert_eq!(result.headings.len(), 2);
        assert_eq!(result.headings[0].text, "Real Header");
        assert_eq!(result.headings[1].text, "Another Real Header");
    }

    #[test]
    fn test_any_fence_line_toggles() {
        // An info string does not make a fence an "opening" fence
        let content = "```rust\n# hidden\n```python\n# Visible\n```\n# hidden too";
        let result = parse(content);

        assert_eq!(result.headings.len(), 1);
        assert_eq!(result.headings[0].text, "Visible");
    }

    #[test]
    fn test_duplicate_headings() {
        let result = parse("# Test\n## Test\n### Test");

        assert_eq!(result.headings[0].anchor, "test");
        assert_eq!(result.headings[1].anchor, "test-1");
        assert_eq!(result.headings[2].anchor, "test-2");
    }

    #[test]
    fn test_suffix_skips_taken_anchors() {
        let result = parse("# Test 1\n# Test\n# Test");

        assert_eq!(result.headings[0].anchor, "test-1");
        assert_eq!(result.headings[1].anchor, "test");
        assert_eq!(result.headings[2].anchor, "test-2");
    }

    #[test]
    fn test_anchors_reset_per_file() {
        let parser = HeadingParser::new().unwrap();
        let first = parser.parse("# Intro", "a.md");
        let second = parser.parse("# Intro", "b.md");

        assert_eq!(first.headings[0].anchor, "intro");
        assert_eq!(second.headings[0].anchor, "intro");
    }

    #[test]
    fn test_sanitizes_special_characters() {
        let result = parse("# Hello, World!\n## What's New?\n### 100% Complete");

        assert_eq!(result.headings[0].anchor, "hello-world");
        assert_eq!(result.headings[1].anchor, "whats-new");
        assert_eq!(result.headings[2].anchor, "100-complete");
    }

    #[test]
    fn test_punctuation_only_heading() {
        let result = parse("# !!!\n# - - -");

        assert_eq!(result.headings[0].anchor, "");
        assert_eq!(result.headings[1].anchor, "-1");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let parser = HeadingParser::new().unwrap();
        for text in [
            "Hello, World!",
            "  --Leading and trailing--  ",
            "snake_case and kebab-case",
            "Ünïcödé Tëxt",
            "100% Complete",
            "a -- b",
        ] {
            let once = parser.slugify(text);
            assert_eq!(parser.slugify(&once), once, "input: {:?}", text);
        }
    }

    #[test]
    fn test_crlf_line_endings() {
        let result = parse("# Title\r\n## Section\r\n");

        assert_eq!(result.headings.len(), 2);
        assert_eq!(result.headings[1].text, "Section");
    }

    #[test]
    fn test_no_headings() {
        let result = parse("This is just plain text.\nNo headers here.");
        assert!(result.headings.is_empty());
    }
}
