//! # mdhelp
//!
//! Markdown help pages for the terminal.
//!
//! This library parses a markdown document into a node tree, renders it as
//! ANSI-styled text sized to the terminal, and extracts the document's heading
//! outline. It powers the `mdhelp` command but is usable on its own.
//!
//! ## Features
//!
//! - Styled headings, emphasis, links, lists and block quotes
//! - Boxed code blocks wrapped to the terminal width
//! - Inline images for terminals that speak the iTerm2 image protocol
//! - Nested heading outlines, printable or serializable to JSON
//!
//! ## Example
//!
//! ```rust
//! use mdhelp::{Console, parse_markdown};
//! use mdhelp::outline::titles_from_document;
//!
//! let doc = parse_markdown("# Plan\n## build\n## test\n");
//! let titles = titles_from_document(&doc, "README.md", &mut Console::plain("."))?;
//!
//! assert_eq!(titles[0].name, "Plan");
//! assert_eq!(titles[0].sub_titles.len(), 2);
//! # Ok::<(), mdhelp::Error>(())
//! ```

/// Configuration file loading.
///
/// Settings live in `config.toml` under the platform config directory.
pub mod config;

pub mod error;

/// Subscriber setup for diagnostics on stderr.
pub mod logging;

/// Heading outline extraction and printing.
pub mod outline;

/// Parser module for markdown documents.
///
/// Provides functions to parse markdown files and content into node trees.
pub mod parser;

/// Terminal rendering.
///
/// Walks a parsed document and writes ANSI-styled text for a given width.
pub mod render;

pub mod terminal;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use outline::{Title, get_titles};
pub use parser::{Document, NodeKind, parse_file, parse_markdown};
pub use render::{Console, render_file};
