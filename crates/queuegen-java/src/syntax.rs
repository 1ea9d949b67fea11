//! Java syntax trees and the node helpers the rewrite passes share.
//!
//! A [`SourceUnit`] pairs the text of one compilation unit with its
//! tree-sitter parse. Passes read the tree and emit span edits against the
//! text; applying them yields the text of the next unit.

use queuegen_core::error::{GenError, GenResult};
use queuegen_core::patch::{BatchSpanEditor, EditPrimitive, Span};
use tree_sitter::{Node, Parser, Tree};

/// One parsed Java compilation unit.
pub struct SourceUnit {
    file_name: String,
    text: String,
    tree: Tree,
}

impl SourceUnit {
    /// Parse `text`, rejecting sources the grammar cannot fully account for.
    pub fn parse(file_name: impl Into<String>, text: impl Into<String>) -> GenResult<Self> {
        let file_name = file_name.into();
        let text = text.into();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .map_err(|_| GenError::Parse {
                file: file_name.clone(),
                line: 0,
                col: 0,
            })?;
        let tree = parser.parse(&text, None).ok_or_else(|| GenError::Parse {
            file: file_name.clone(),
            line: 0,
            col: 0,
        })?;

        if let Some(bad) = first_error(tree.root_node()) {
            let at = bad.start_position();
            return Err(GenError::Parse {
                file: file_name,
                line: at.row as u32 + 1,
                col: at.column as u32 + 1,
            });
        }

        Ok(SourceUnit {
            file_name,
            text,
            tree,
        })
    }

    /// Name of the file this unit was read from.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the unit, keeping only its text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// The `program` node.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn node_text(&self, node: Node<'_>) -> &str {
        &self.text[node.start_byte()..node.end_byte()]
    }

    /// Text of the node's `name` field, if any.
    pub fn name_of(&self, node: Node<'_>) -> Option<&str> {
        node.child_by_field_name("name").map(|n| self.node_text(n))
    }

    /// Apply `edits` to this unit's text.
    pub fn apply(&self, edits: Vec<EditPrimitive>) -> GenResult<String> {
        let mut editor = BatchSpanEditor::new(&self.text);
        editor.add_all(edits);
        editor.apply().map_err(|source| GenError::Edit {
            file: self.file_name.clone(),
            source,
        })
    }

    /// The comment attached to `node`: the sibling comment directly before it
    /// that starts its own line.
    pub fn leading_comment<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        let prev = node.prev_sibling()?;
        if !is_comment(prev) {
            return None;
        }
        let line_start = line_start(&self.text, prev.start_byte());
        if self.text[line_start..prev.start_byte()].trim().is_empty() {
            Some(prev)
        } else {
            None
        }
    }

    /// The attached comment of `node` when its content is exactly `marker`.
    pub fn marker_comment<'t>(&self, node: Node<'t>, marker: &str) -> Option<Node<'t>> {
        self.leading_comment(node)
            .filter(|c| comment_content(self.node_text(*c)).trim() == marker)
    }

    /// Whether the node's `modifiers` child carries `keyword`.
    pub fn has_modifier(&self, node: Node<'_>, keyword: &str) -> bool {
        modifier_token(node, keyword).is_some()
    }

    /// Leading whitespace of the line `node` starts on.
    pub fn indent_of(&self, node: Node<'_>) -> &str {
        line_indent(&self.text, node.start_byte())
    }

    /// Indentation used by the members of a class or interface body.
    pub fn member_indent(&self, decl: Node<'_>) -> String {
        body_members(decl)
            .into_iter()
            .find(|m| !is_comment(*m))
            .map(|m| self.indent_of(m).to_string())
            .unwrap_or_else(|| format!("{}{}", self.indent_of(decl), crate::codegen::INDENT_LEVEL))
    }

    /// Span of `node` widened to whole lines when nothing else shares them.
    pub fn line_extent(&self, node: Node<'_>) -> Span {
        line_extent(&self.text, Span::new(node.start_byte(), node.end_byte()))
    }
}

// ============================================================================
// Node Queries
// ============================================================================

/// Whether `node` is a Java comment of any style.
pub fn is_comment(node: Node<'_>) -> bool {
    matches!(node.kind(), "comment" | "line_comment" | "block_comment")
}

/// Whether `node` declares a class or an interface.
pub fn is_type_declaration(node: Node<'_>) -> bool {
    matches!(node.kind(), "class_declaration" | "interface_declaration")
}

/// Named children of `node`, comments included.
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// All descendants of `node` (itself included) in document order.
pub fn descendants(node: Node<'_>) -> Vec<Node<'_>> {
    let mut result = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        result.push(current);
        let mut cursor = current.walk();
        let children: Vec<Node<'_>> = current.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    result
}

/// All descendants of `node` whose kind is `kind`.
pub fn descendants_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    descendants(node)
        .into_iter()
        .filter(|n| n.kind() == kind)
        .collect()
}

/// Every class and interface declaration under `node`, outermost first.
pub fn type_declarations(node: Node<'_>) -> Vec<Node<'_>> {
    descendants(node)
        .into_iter()
        .filter(|n| is_type_declaration(*n))
        .collect()
}

/// Members of a type declaration's body, comments included.
pub fn body_members(decl: Node<'_>) -> Vec<Node<'_>> {
    decl.child_by_field_name("body")
        .map(named_children)
        .unwrap_or_default()
}

/// The keyword token `keyword` inside the node's `modifiers` child.
pub fn modifier_token<'t>(node: Node<'t>, keyword: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let modifiers = node
        .children(&mut cursor)
        .find(|c| c.kind() == "modifiers")?;
    let mut cursor = modifiers.walk();
    let found = modifiers.children(&mut cursor).find(|c| c.kind() == keyword);
    found
}

/// First direct child of `node` with kind `kind`, named or not.
pub fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// The identifier node that carries the simple name of a class type.
///
/// `Foo`, `Foo<E>` and `a.b.Foo<E>` all yield the `Foo` identifier; primitive
/// and array types yield nothing.
pub fn type_name_node(ty: Node<'_>) -> Option<Node<'_>> {
    match ty.kind() {
        "type_identifier" => Some(ty),
        "generic_type" => ty.named_child(0).and_then(type_name_node),
        "scoped_type_identifier" => {
            let count = ty.named_child_count();
            ty.named_child(count.checked_sub(1)?)
                .filter(|n| n.kind() == "type_identifier")
        }
        _ => None,
    }
}

/// Depth-first search for the first error or missing node.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    descendants(root)
        .into_iter()
        .find(|n| n.is_error() || n.is_missing())
        .or(Some(root))
}

// ============================================================================
// Text Helpers
// ============================================================================

/// Strip comment delimiters: `//`, `/*`, `/**` and `*/`.
pub fn comment_content(comment: &str) -> &str {
    if let Some(rest) = comment.strip_prefix("//") {
        return rest;
    }
    let inner = comment
        .strip_prefix("/**")
        .or_else(|| comment.strip_prefix("/*"))
        .unwrap_or(comment);
    inner.strip_suffix("*/").unwrap_or(inner)
}

/// Byte offset of the start of the line containing `pos`.
pub fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Leading whitespace of the line containing `pos`.
pub fn line_indent(text: &str, pos: usize) -> &str {
    let start = line_start(text, pos);
    let line = &text[start..];
    let width = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..width]
}

/// Widen `span` to cover its full lines, trailing newline included, when the
/// lines hold nothing but the span and whitespace. Otherwise return it as is.
pub fn line_extent(text: &str, span: Span) -> Span {
    let start = line_start(text, span.start);
    if !text[start..span.start].trim().is_empty() {
        return span;
    }
    let rest = &text[span.end..];
    let line_end = rest.find('\n').map(|i| span.end + i + 1).unwrap_or(text.len());
    if !text[span.end..line_end].trim().is_empty() {
        return span;
    }
    Span::new(start, line_end)
}
