//! Heading outlines.
//!
//! The outline is built from the document's top-level nodes only. Headings
//! nested inside lists or block quotes are not part of it.
//!
//! Nesting rule: after a heading of level `L`, the following siblings are
//! scanned with threshold `L + 1`, and any heading whose level is at least the
//! threshold is taken as a sub title. The scan ends at the first heading below
//! the threshold, which is left for the caller. So in `# A`, `### B`, `## C`
//! both `B` and `C` land directly under `A`: `C` ends `B`'s scan but still
//! meets `A`'s threshold of 2.

mod printer;

pub use printer::{print_titles, write_titles};

use crate::error::Result;
use crate::parser::{Document, NodeId, parse_file};
use crate::render::Console;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A heading and the headings nested under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Heading text with inline markup flattened away
    pub name: String,
    #[serde(rename = "subTitles")]
    pub sub_titles: Vec<Title>,
    /// Path of the file the heading came from
    pub location: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Parse `file` and build its outline.
///
/// `root_dir` is the base for relative paths, as for rendering.
pub fn get_titles(file: &Path, root_dir: &Path) -> Result<Vec<Title>> {
    let doc = parse_file(file)?;
    let location = file.display().to_string();
    titles_from_document(&doc, &location, &mut Console::plain(root_dir))
}

/// Build the outline of an already parsed document.
pub fn titles_from_document(
    doc: &Document,
    location: &str,
    console: &mut Console,
) -> Result<Vec<Title>> {
    let siblings: Vec<NodeId> = doc.children(doc.root()).collect();
    let (titles, _) = extract_titles(1, &siblings, 0, doc, location, console)?;
    tracing::debug!(location, count = titles.len(), "extracted outline");
    Ok(titles)
}

/// Collect titles from `siblings[index..]` whose level is at least `level`.
///
/// Stops without consuming the first heading shallower than `level` and
/// returns the index to resume from.
pub fn extract_titles(
    level: u8,
    siblings: &[NodeId],
    mut index: usize,
    doc: &Document,
    location: &str,
    console: &mut Console,
) -> Result<(Vec<Title>, usize)> {
    let mut titles = Vec::new();

    while let Some(&child) = siblings.get(index) {
        let Some(heading_level) = doc.kind(child).heading_level() else {
            index += 1;
            continue;
        };

        if heading_level < level {
            return Ok((titles, index));
        }

        let name = console
            .render_node_to_string(doc, child)?
            .trim_matches(|c| matches!(c, '\n' | '\t' | ' '))
            .to_string();
        let (sub_titles, next) = extract_titles(
            heading_level.saturating_add(1),
            siblings,
            index + 1,
            doc,
            location,
            console,
        )?;
        index = next;

        tracing::trace!(%name, heading_level, "outline title");
        titles.push(Title {
            name,
            sub_titles,
            location: location.to_string(),
            level: heading_level,
        });
    }

    Ok((titles, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    fn outline(md: &str) -> Vec<Title> {
        let doc = parse_markdown(md);
        titles_from_document(&doc, "README.md", &mut Console::plain(".")).unwrap()
    }

    /// Render titles as `name(level)[children]` for compact assertions.
    fn shape(titles: &[Title]) -> String {
        titles
            .iter()
            .map(|t| {
                if t.sub_titles.is_empty() {
                    format!("{}({})", t.name, t.level)
                } else {
                    format!("{}({})[{}]", t.name, t.level, shape(&t.sub_titles))
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn test_two_top_level_sections() {
        let titles = outline("# A\n## B\n## C\n# D\n");
        assert_eq!(shape(&titles), "A(1)[B(2),C(2)],D(1)");
        assert_eq!(titles[0].location, "README.md");
        assert!(titles[1].sub_titles.is_empty());
    }

    #[test]
    fn test_deeper_heading_nests_under_shallower() {
        let titles = outline("# Top\n## Mid\n### Low\n## Mid2\n");
        assert_eq!(shape(&titles), "Top(1)[Mid(2)[Low(3)],Mid2(2)]");
    }

    #[test]
    fn test_same_level_roots_without_h1_are_siblings() {
        let titles = outline("## First\n\ntext\n\n## Second\n");
        assert_eq!(shape(&titles), "First(2),Second(2)");
    }

    #[test]
    fn test_equal_levels_under_a_parent_are_siblings() {
        let titles = outline("## A\n### B\n### C\n");
        assert_eq!(shape(&titles), "A(2)[B(3),C(3)]");
    }

    #[test]
    fn test_shallower_heading_joins_deeper_siblings() {
        // C closes B's scan but still meets A's threshold, so it sits beside B.
        let titles = outline("# A\n### B\n## C\n");
        assert_eq!(shape(&titles), "A(1)[B(3),C(2)]");
    }

    #[test]
    fn test_shallower_than_start_ends_outline_branch() {
        let titles = outline("### Deep\n# Top\n## Child\n");
        assert_eq!(shape(&titles), "Deep(3),Top(1)[Child(2)]");
    }

    #[test]
    fn test_non_heading_siblings_are_ignored() {
        let titles = outline("intro\n\n# A\n\n- list\n\n```\ncode\n```\n\n## B\n");
        assert_eq!(shape(&titles), "A(1)[B(2)]");
    }

    #[test]
    fn test_inline_markup_is_flattened() {
        let titles = outline("# The `plan` *command*\n");
        assert_eq!(titles[0].name, "The plan command");
    }

    #[test]
    fn test_extract_returns_resume_index() {
        let doc = parse_markdown("## A\n# B\n");
        let siblings: Vec<_> = doc.children(doc.root()).collect();
        let mut console = Console::plain(".");

        let (titles, next) = extract_titles(2, &siblings, 0, &doc, "x.md", &mut console).unwrap();
        assert_eq!(titles.len(), 1);
        assert_eq!(next, 1);
    }

    #[test]
    fn test_get_titles_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let readme = dir.path().join("README.md");
        std::fs::write(&readme, "# Plan\n## build\n").unwrap();

        let titles = get_titles(&readme, dir.path()).unwrap();
        assert_eq!(shape(&titles), "Plan(1)[build(2)]");
        assert_eq!(titles[0].location, readme.display().to_string());
    }

    #[test]
    fn test_title_json_field_names() {
        let titles = outline("# A\n## B\n");
        let json = serde_json::to_value(&titles).unwrap();
        assert_eq!(json[0]["name"], "A");
        assert_eq!(json[0]["subTitles"][0]["level"], 2);
    }
}
