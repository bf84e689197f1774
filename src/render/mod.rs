//! Terminal rendering of a parsed markdown [`Document`].
//!
//! [`Console`] walks the document depth-first. Container nodes are visited
//! twice (entering and leaving), leaf nodes once, and each visit writes styled
//! text to the output sink. Layout state (open lists, block quote mode, open
//! styles) lives on the console and is reset at the start of every render.
//!
//! ## Example
//!
//! ```rust
//! use mdhelp::parser::parse_markdown;
//! use mdhelp::render::{Console, style::Palette};
//! use mdhelp::terminal::TerminalSize;
//!
//! let doc = parse_markdown("# Usage\n\nRun `plan build`.");
//! let mut console = Console::new(TerminalSize::new(80, 24), ".").with_palette(Palette::plain());
//! let mut out = Vec::new();
//! console.render(&doc, &mut out)?;
//! assert!(String::from_utf8(out)?.contains("Run plan build."));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod code_block;
pub mod image;
pub mod style;

use crate::error::{Error, Result};
use crate::parser::{Document, NodeEdge, NodeId, NodeKind, parse_file};
use crate::terminal::{TerminalCapabilities, TerminalSize};
use image::ImageHint;
use std::io::Write;
use std::path::{Path, PathBuf};
use style::{EmphasisTier, Palette};

/// Prefix written at every line start inside a block quote.
const QUOTE_BAR: &str = "  │ ";

/// Size used when rendering fragments that never depend on terminal width.
const NOMINAL_SIZE: TerminalSize = TerminalSize {
    columns: 80,
    rows: 24,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, Copy)]
struct ListContext {
    kind: ListKind,
    next_index: usize,
}

/// What the walker does after a node has been entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    GoToNext,
    SkipChildren,
}

/// Stateful markdown-to-terminal renderer.
#[derive(Debug, Clone)]
pub struct Console {
    lists: Vec<ListContext>,
    list_level: usize,
    is_block_quote: bool,
    at_line_start: bool,
    // Escapes of styles that are currently open, outermost first
    open_styles: Vec<String>,
    size: TerminalSize,
    root_dir: PathBuf,
    palette: Palette,
    inline_images: bool,
    image_hint: ImageHint,
}

impl Console {
    /// Create a console for a terminal of the given size.
    ///
    /// Relative image paths are resolved against `root_dir`. Colors are on
    /// and inline images are off until configured otherwise.
    pub fn new(size: TerminalSize, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            lists: Vec::new(),
            list_level: 0,
            is_block_quote: false,
            at_line_start: true,
            open_styles: Vec::new(),
            size,
            root_dir: root_dir.into(),
            palette: Palette::colored(),
            inline_images: false,
            image_hint: ImageHint::default(),
        }
    }

    /// Create a console sized and styled for the controlling terminal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalDimensionsUnavailable`] when the terminal size
    /// cannot be queried.
    pub fn for_terminal(root_dir: impl Into<PathBuf>) -> Result<Self> {
        let size = TerminalSize::query()?;
        let caps = TerminalCapabilities::detect();
        Ok(Self::new(size, root_dir)
            .with_palette(Palette::new(caps.supports_color))
            .with_inline_images(caps.inline_images))
    }

    /// An uncolored console for flattening inline content to plain text.
    pub fn plain(root_dir: impl Into<PathBuf>) -> Self {
        Self::new(NOMINAL_SIZE, root_dir).with_palette(Palette::plain())
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_inline_images(mut self, enabled: bool) -> Self {
        self.inline_images = enabled;
        self
    }

    pub fn with_image_hint(mut self, hint: ImageHint) -> Self {
        self.image_hint = hint;
        self
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Render a whole document to `w`.
    ///
    /// Output already written is not rolled back if a later node fails.
    pub fn render<W: Write>(&mut self, doc: &Document, w: &mut W) -> Result<()> {
        self.reset();
        tracing::debug!(
            columns = self.size.columns,
            rows = self.size.rows,
            "rendering document"
        );
        self.walk(doc, doc.root(), w)?;
        w.flush()?;
        Ok(())
    }

    /// Render the subtree rooted at `id` into a string.
    pub fn render_node_to_string(&mut self, doc: &Document, id: NodeId) -> Result<String> {
        self.reset();
        let mut buf = Vec::new();
        self.walk(doc, id, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn reset(&mut self) {
        self.lists.clear();
        self.list_level = 0;
        self.is_block_quote = false;
        self.at_line_start = true;
        self.open_styles.clear();
    }

    /// Drive enter / leave visits from the arena's edge iterator, so deep
    /// nesting costs no call stack.
    fn walk<W: Write>(&mut self, doc: &Document, id: NodeId, w: &mut W) -> Result<()> {
        let mut skipping: Option<NodeId> = None;

        for edge in doc.traverse(id) {
            match edge {
                NodeEdge::Start(node) => {
                    if skipping.is_some() {
                        continue;
                    }
                    let status = self.render_node(doc, node, true, w)?;
                    if status == WalkStatus::SkipChildren && !doc.kind(node).is_leaf() {
                        skipping = Some(node);
                    }
                }
                NodeEdge::End(node) => {
                    match skipping {
                        Some(skipped) if skipped == node => skipping = None,
                        Some(_) => continue,
                        None => {}
                    }
                    if !doc.kind(node).is_leaf() {
                        self.render_node(doc, node, false, w)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Handle one visit of a node. Leaf nodes only ever see `entering == true`.
    fn render_node<W: Write>(
        &mut self,
        doc: &Document,
        id: NodeId,
        entering: bool,
        w: &mut W,
    ) -> Result<WalkStatus> {
        match doc.kind(id) {
            NodeKind::Document | NodeKind::HtmlBlock(_) => {}
            NodeKind::Text(literal) => self.out(w, &collapse_whitespace(literal))?,
            NodeKind::SoftBreak | NodeKind::HardBreak => self.out(w, "\n")?,
            NodeKind::Code(literal) => self.styled(w, self.palette.paint(style::CODE), literal)?,
            NodeKind::HtmlSpan(literal) => {
                self.styled(w, self.palette.paint(style::HTML), literal)?
            }
            NodeKind::Emphasis | NodeKind::Strong => {
                if entering {
                    let escape = self.palette.emphasis(emphasis_tier(doc, id));
                    self.push_style(w, escape)?;
                } else {
                    self.pop_style(w)?;
                }
            }
            NodeKind::Strikethrough => {
                if entering {
                    self.push_style(w, self.palette.paint(style::STRIKETHROUGH))?;
                    self.out(w, "―")?;
                } else {
                    self.out(w, "―")?;
                    self.pop_style(w)?;
                }
            }
            NodeKind::Paragraph => {
                let hugs_marker = doc.parent_is_list_item(id) && doc.is_first_child(id);
                if !entering || !hugs_marker {
                    self.out(w, "\n")?;
                }
            }
            NodeKind::Heading { level } => {
                if entering {
                    if !doc.is_first_child(id) {
                        self.out(w, "\n\n")?;
                    }
                    self.push_style(w, self.palette.heading(*level))?;
                } else {
                    self.pop_style(w)?;
                    self.out(w, "\n\n")?;
                }
            }
            NodeKind::BlockQuote => {
                if entering {
                    self.is_block_quote = true;
                } else {
                    self.is_block_quote = false;
                    self.out(w, "\n\n")?;
                }
            }
            NodeKind::List { ordered, .. } => {
                let spacing = if doc.parent_is_list_item(id) { 1 } else { 2 };
                if entering {
                    self.lists.push(ListContext {
                        kind: if *ordered {
                            ListKind::Ordered
                        } else {
                            ListKind::Unordered
                        },
                        next_index: 1,
                    });
                    self.list_level += 1;
                } else {
                    self.lists.pop();
                    self.list_level = self.list_level.saturating_sub(1);
                }
                self.out(w, &"\n".repeat(spacing))?;
            }
            NodeKind::ListItem => {
                if entering {
                    self.list_item_marker(w)?;
                }
            }
            NodeKind::CodeBlock { literal, .. } => {
                self.out(w, &code_block::render(literal, self.size.columns))?
            }
            NodeKind::HorizontalRule => {
                self.out(w, &"─".repeat(usize::from(self.size.columns)))?
            }
            NodeKind::Link { destination, .. } => {
                let autolink = is_autolink(doc, id, destination);
                if entering {
                    if autolink {
                        self.push_style(w, self.palette.paint(style::LINK))?;
                    }
                } else if autolink {
                    self.pop_style(w)?;
                } else {
                    self.out(w, " (")?;
                    self.styled(w, self.palette.paint(style::LINK), destination)?;
                    self.out(w, ")")?;
                }
            }
            NodeKind::Image { destination, title } => {
                if entering {
                    self.image(w, destination, title)?;
                }
                return Ok(WalkStatus::SkipChildren);
            }
            NodeKind::Table => self.placeholder(w, entering, "TABLE")?,
            NodeKind::TableHeader => self.placeholder(w, entering, "TABLE HEADER")?,
            NodeKind::TableBody => self.placeholder(w, entering, "TABLE BODY")?,
            NodeKind::TableRow => self.placeholder(w, entering, "TABLE ROW")?,
            NodeKind::TableCell => self.placeholder(w, entering, "TABLE CELL")?,
            NodeKind::Unsupported(name) => return Err(Error::UnsupportedNodeKind(name.clone())),
        }
        Ok(WalkStatus::GoToNext)
    }

    fn list_item_marker<W: Write>(&mut self, w: &mut W) -> Result<()> {
        let ordered_index = match self.lists.last_mut() {
            Some(list) if list.kind == ListKind::Ordered => {
                let index = list.next_index;
                list.next_index += 1;
                Some(index)
            }
            _ => None,
        };

        self.out(w, &" ".repeat(self.list_level * 2))?;
        match ordered_index {
            Some(index) => self.out(w, &format!("{index}. ")),
            None => {
                self.styled(w, self.palette.paint(style::BULLET), "•")?;
                self.out(w, " ")
            }
        }
    }

    fn image<W: Write>(&mut self, w: &mut W, destination: &str, title: &str) -> Result<()> {
        if !self.inline_images {
            return self.out(w, &format!("![{title}]({destination})\n"));
        }

        match image::inline_image(destination, &self.root_dir, &self.image_hint) {
            Ok(sequence) => self.out(w, &sequence),
            Err(err) => {
                tracing::warn!(destination, error = %err, "inline image unavailable");
                self.out(
                    w,
                    &format!("Error showing: ![{title}]({destination})\nError: {err}\n"),
                )
            }
        }
    }

    fn placeholder<W: Write>(&mut self, w: &mut W, entering: bool, label: &str) -> Result<()> {
        if entering {
            self.out(w, label)?;
        }
        Ok(())
    }

    fn push_style<W: Write>(&mut self, w: &mut W, escape: String) -> Result<()> {
        self.out(w, &escape)?;
        self.open_styles.push(escape);
        Ok(())
    }

    /// Close the innermost style, then re-open whatever encloses it.
    fn pop_style<W: Write>(&mut self, w: &mut W) -> Result<()> {
        self.open_styles.pop();
        let restore = self.reset_sequence();
        self.out(w, &restore)
    }

    fn styled<W: Write>(&mut self, w: &mut W, escape: String, text: &str) -> Result<()> {
        self.push_style(w, escape)?;
        self.out(w, text)?;
        self.pop_style(w)
    }

    fn reset_sequence(&self) -> String {
        let mut sequence = self.palette.reset();
        for escape in &self.open_styles {
            sequence.push_str(escape);
        }
        sequence
    }

    /// Write `text`, prefixing each line start with the quote bar while inside
    /// a block quote.
    fn out<W: Write>(&mut self, w: &mut W, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if !self.is_block_quote {
            w.write_all(text.as_bytes())?;
            self.at_line_start = text.ends_with('\n');
            return Ok(());
        }

        for line in text.split_inclusive('\n') {
            if self.at_line_start {
                let bar = format!(
                    "{}{QUOTE_BAR}{}",
                    self.palette.paint(style::QUOTE),
                    self.reset_sequence()
                );
                w.write_all(bar.as_bytes())?;
            }
            w.write_all(line.as_bytes())?;
            self.at_line_start = line.ends_with('\n');
        }
        Ok(())
    }
}

/// Parse `file` and render it with `console`.
pub fn render_file(file: &Path, console: &mut Console) -> Result<String> {
    let doc = parse_file(file)?;
    let mut buf = Vec::new();
    console.render(&doc, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Collapse every run of whitespace into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    use regex::Regex;
    use std::sync::OnceLock;

    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    re.replace_all(text, " ").into_owned()
}

/// Emphasis directly inside strong (or strong inside emphasis) is the third tier.
fn emphasis_tier(doc: &Document, id: NodeId) -> EmphasisTier {
    let parent = doc.parent(id).map(|parent| doc.kind(parent));
    match (doc.kind(id), parent) {
        (NodeKind::Emphasis, Some(NodeKind::Strong)) => EmphasisTier::Triple,
        (NodeKind::Strong, Some(NodeKind::Emphasis)) => EmphasisTier::Triple,
        (NodeKind::Strong, _) => EmphasisTier::Strong,
        _ => EmphasisTier::Emphasis,
    }
}

/// A link whose only content is its own destination, e.g. `<https://x.io>`.
fn is_autolink(doc: &Document, id: NodeId, destination: &str) -> bool {
    let mut children = doc.children(id);
    match (children.next(), children.next()) {
        (Some(only), None) => match doc.kind(only) {
            NodeKind::Text(text) => {
                text == destination || destination.strip_prefix("mailto:") == Some(text.as_str())
            }
            _ => false,
        },
        _ => false,
    }
}
