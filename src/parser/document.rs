use indextree::{Arena, NodeEdge, NodeId};

/// The kind of a node in the document tree, together with its payload.
///
/// The set is closed: any parser construct without a mapping becomes
/// [`NodeKind::Unsupported`], which the renderer treats as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading { level: u8 },
    BlockQuote,
    List { ordered: bool, tight: bool },
    ListItem,
    CodeBlock { info: String, literal: String },
    HtmlBlock(String),
    HorizontalRule,
    Table,
    TableHeader,
    TableBody,
    TableRow,
    TableCell,
    Text(String),
    Code(String),
    SoftBreak,
    HardBreak,
    Emphasis,
    Strong,
    Strikethrough,
    HtmlSpan(String),
    Link { destination: String, title: String },
    Image { destination: String, title: String },
    /// A construct the parser produced but this crate does not model.
    Unsupported(String),
}

impl NodeKind {
    /// Leaf kinds are visited once; every other kind is visited on entry and exit.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeKind::Text(_)
                | NodeKind::Code(_)
                | NodeKind::SoftBreak
                | NodeKind::HardBreak
                | NodeKind::CodeBlock { .. }
                | NodeKind::HtmlBlock(_)
                | NodeKind::HtmlSpan(_)
                | NodeKind::HorizontalRule
                | NodeKind::Unsupported(_)
        )
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            NodeKind::Heading { level } => Some(*level),
            _ => None,
        }
    }
}

/// A parsed markdown document.
///
/// Nodes live in an arena; the parent link is the arena's own index and is
/// only ever read, never used to mutate or own a node.
#[derive(Debug, Clone)]
pub struct Document {
    arena: Arena<NodeKind>,
    root: NodeId,
}

impl Document {
    /// Create a document containing only its root node.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeKind::Document);
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new node of `kind` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.arena.new_node(kind);
        parent.append(id, &mut self.arena);
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        self.arena[id].get()
    }

    /// Children of `id` in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Enter and leave edges of the subtree rooted at `id`, depth first.
    pub fn traverse(&self, id: NodeId) -> impl Iterator<Item = NodeEdge> + '_ {
        id.traverse(&self.arena)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    /// True when `id` is the first child of its parent (or has no parent).
    pub fn is_first_child(&self, id: NodeId) -> bool {
        match self.parent(id) {
            Some(parent) => self.arena[parent].first_child() == Some(id),
            None => true,
        }
    }

    /// True when the parent of `id` is a list item.
    pub fn parent_is_list_item(&self, id: NodeId) -> bool {
        self.parent(id)
            .is_some_and(|parent| matches!(self.kind(parent), NodeKind::ListItem))
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
