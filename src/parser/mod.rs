//! Markdown parsing into an arena-backed document tree.
//!
//! Parsing is delegated to `comrak` (CommonMark plus the GFM table,
//! strikethrough and autolink extensions). The resulting tree is copied into
//! a [`Document`] whose nodes carry a closed [`NodeKind`] set, which is what
//! the renderer and the outline extractor walk.

mod convert;
mod document;

pub use document::{Document, NodeKind};
pub use indextree::{NodeEdge, NodeId};

use crate::error::{Error, Result};
use comrak::{Arena, ComrakOptions, parse_document};
use std::path::Path;

/// Parse a markdown file.
///
/// # Errors
///
/// Returns [`Error::SourceUnreadable`] if the file cannot be read or is not
/// valid UTF-8.
pub fn parse_file(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_markdown(&content);
    tracing::debug!(path = %path.display(), nodes = doc.node_count(), "parsed markdown");
    Ok(doc)
}

/// Parse markdown content into a [`Document`].
pub fn parse_markdown(content: &str) -> Document {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, content, &options);
    convert::from_comrak(root)
}

fn default_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
}
