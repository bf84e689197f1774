//! Conversion from comrak's AST into the arena-backed [`Document`].

use comrak::nodes::{AstNode, ListType, NodeValue};
use indextree::NodeId;

use super::document::{Document, NodeKind};

/// Copy the children of a comrak document root into a fresh [`Document`].
///
/// Uses an explicit work stack so nesting depth is bounded by the heap,
/// not the call stack.
pub(super) fn from_comrak<'a>(root: &'a AstNode<'a>) -> Document {
    let mut doc = Document::new();
    let mut stack: Vec<(&'a AstNode<'a>, NodeId)> = Vec::new();
    push_children(root.reverse_children(), doc.root(), &mut stack);

    while let Some((node, parent)) = stack.pop() {
        if matches!(node.data.borrow().value, NodeValue::Table(_)) {
            convert_table(node, parent, &mut doc, &mut stack);
            continue;
        }

        let kind = node_kind(&node.data.borrow().value);
        let id = doc.append(parent, kind);
        push_children(node.reverse_children(), id, &mut stack);
    }
    doc
}

/// Queue children (given last first) under `parent` so they pop in
/// document order.
fn push_children<'a>(
    reversed: impl Iterator<Item = &'a AstNode<'a>>,
    parent: NodeId,
    stack: &mut Vec<(&'a AstNode<'a>, NodeId)>,
) {
    stack.extend(reversed.map(|child| (child, parent)));
}

/// Tables are regrouped into a header section followed by a body section.
fn convert_table<'a>(
    node: &'a AstNode<'a>,
    parent: NodeId,
    doc: &mut Document,
    stack: &mut Vec<(&'a AstNode<'a>, NodeId)>,
) {
    let table = doc.append(parent, NodeKind::Table);
    let mut body = None;
    let mut rows = Vec::new();

    for row in node.children() {
        let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
        let section = if is_header {
            doc.append(table, NodeKind::TableHeader)
        } else {
            *body.get_or_insert_with(|| doc.append(table, NodeKind::TableBody))
        };
        rows.push((row, section));
    }
    stack.extend(rows.into_iter().rev());
}

fn node_kind(value: &NodeValue) -> NodeKind {
    match value {
        NodeValue::Document => NodeKind::Document,
        NodeValue::Paragraph => NodeKind::Paragraph,
        NodeValue::Heading(heading) => NodeKind::Heading {
            level: heading.level,
        },
        NodeValue::BlockQuote => NodeKind::BlockQuote,
        NodeValue::List(list) => NodeKind::List {
            ordered: list.list_type == ListType::Ordered,
            tight: list.tight,
        },
        NodeValue::Item(_) => NodeKind::ListItem,
        NodeValue::CodeBlock(code) => NodeKind::CodeBlock {
            info: code.info.clone(),
            literal: code.literal.clone(),
        },
        NodeValue::HtmlBlock(html) => NodeKind::HtmlBlock(html.literal.clone()),
        NodeValue::ThematicBreak => NodeKind::HorizontalRule,
        NodeValue::Table(_) => NodeKind::Table,
        NodeValue::TableRow(_) => NodeKind::TableRow,
        NodeValue::TableCell => NodeKind::TableCell,
        NodeValue::Text(text) => NodeKind::Text(text.clone()),
        NodeValue::Code(code) => NodeKind::Code(code.literal.clone()),
        NodeValue::SoftBreak => NodeKind::SoftBreak,
        NodeValue::LineBreak => NodeKind::HardBreak,
        NodeValue::Emph => NodeKind::Emphasis,
        NodeValue::Strong => NodeKind::Strong,
        NodeValue::Strikethrough => NodeKind::Strikethrough,
        NodeValue::HtmlInline(html) => NodeKind::HtmlSpan(html.clone()),
        NodeValue::Link(link) => NodeKind::Link {
            destination: link.url.clone(),
            title: link.title.clone(),
        },
        NodeValue::Image(link) => NodeKind::Image {
            destination: link.url.clone(),
            title: link.title.clone(),
        },
        other => NodeKind::Unsupported(variant_name(other)),
    }
}

/// The bare variant name of a comrak node, e.g. `DescriptionList`.
fn variant_name(value: &NodeValue) -> String {
    let debug = format!("{value:?}");
    debug
        .split(|c: char| !c.is_alphanumeric())
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_nesting_does_not_exhaust_the_stack() {
        let arena = comrak::Arena::new();
        let md = format!("{}x", "> ".repeat(10_000));
        let root = comrak::parse_document(&arena, &md, &comrak::ComrakOptions::default());

        let doc = from_comrak(root);
        let mut id = doc.root();
        let mut depth = 0;
        while let Some(child) = doc.children(id).next() {
            id = child;
            depth += 1;
        }
        assert_eq!(doc.kind(id), &NodeKind::Text("x".into()));
        assert_eq!(depth, 10_002);
    }

    #[test]
    fn test_variant_name_strips_payload() {
        assert_eq!(variant_name(&NodeValue::DescriptionList), "DescriptionList");
        assert_eq!(
            variant_name(&NodeValue::FrontMatter("---\n---".into())),
            "FrontMatter"
        );
    }
}
