use crate::models::ParsedFile;
use std::collections::BTreeMap;

const INDENT: &str = "  ";
const ROOT_DIR: &str = ".";

/// Render parsed files as a nested markdown bullet list
///
/// Files are grouped by directory; directories are emitted in sorted order
/// and files keep the order they were given in.
pub fn render_toc(files: &[ParsedFile], title: Option<&str>) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        lines.push(format!("# {}", title));
        lines.push(String::new());
    }

    for (dir, dir_files) in group_by_directory(files) {
        let indent = INDENT.repeat(directory_level(dir));

        if dir != ROOT_DIR {
            lines.push(format!("{}- **{}/**", indent, dir));
        }

        let file_indent = if dir == ROOT_DIR { "" } else { INDENT };

        for file in dir_files {
            lines.push(format!(
                "{}{}- [{}]({})",
                indent,
                file_indent,
                file.file_name(),
                file.path
            ));

            for heading in &file.headings {
                let heading_indent = INDENT.repeat(heading.level.saturating_sub(1));
                lines.push(format!(
                    "{}{}{}{}- [{}]({}#{})",
                    indent,
                    file_indent,
                    INDENT,
                    heading_indent,
                    heading.text,
                    file.path,
                    heading.anchor
                ));
            }
        }
    }

    lines.join("\n")
}

/// Bucket files by directory, keeping input order within each bucket
fn group_by_directory(files: &[ParsedFile]) -> BTreeMap<&str, Vec<&ParsedFile>> {
    let mut by_dir: BTreeMap<&str, Vec<&ParsedFile>> = BTreeMap::new();
    for file in files.iter().filter(|f| f.has_headings()) {
        by_dir.entry(file.directory()).or_default().push(file);
    }
    by_dir
}

fn directory_level(dir: &str) -> usize {
    if dir == ROOT_DIR {
        0
    } else {
        dir.split('/').count()
    }
}
