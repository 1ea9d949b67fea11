//! Swaps the plain linked-node type for the atomic one.
//!
//! Only the outermost declared type of a parameter (varargs included),
//! variable, field, method return or object creation is inspected. `LinkedQueueNode`, raw or with
//! any type arguments, becomes `LinkedQueueAtomicNode<E>`.

use queuegen_core::error::GenResult;
use queuegen_core::naming::PLAIN_NODE_TYPE;
use queuegen_core::patch::{EditPrimitive, Span};
use tree_sitter::Node;

use super::{Pass, PassContext};
use crate::codegen::atomic_node_type;
use crate::syntax::{descendants, named_children, type_name_node, SourceUnit};

/// Node kinds whose `type` field declares a type the substitution applies to.
const TYPED_DECLARATIONS: [&str; 7] = [
    "formal_parameter",
    "local_variable_declaration",
    "field_declaration",
    "constant_declaration",
    "enhanced_for_statement",
    "method_declaration",
    "object_creation_expression",
];

/// Rewrites declared types naming the plain node type.
pub struct TypeSubstitutionPass;

impl TypeSubstitutionPass {
    /// The declared type of `node`, if it is a declaration the substitution covers.
    ///
    /// A varargs parameter carries its type as an unnamed child after any modifiers.
    fn declared_type<'t>(node: Node<'t>) -> Option<Node<'t>> {
        if node.kind() == "spread_parameter" {
            return named_children(node)
                .into_iter()
                .find(|child| child.kind() != "modifiers");
        }
        if TYPED_DECLARATIONS.contains(&node.kind()) {
            return node.child_by_field_name("type");
        }
        None
    }

    fn is_plain_node(unit: &SourceUnit, ty: Node<'_>) -> bool {
        type_name_node(ty).is_some_and(|name| unit.node_text(name) == PLAIN_NODE_TYPE)
    }
}

impl Pass for TypeSubstitutionPass {
    fn name(&self) -> &'static str {
        "types"
    }

    fn edits(&self, unit: &SourceUnit, _ctx: &mut PassContext<'_>) -> GenResult<Vec<EditPrimitive>> {
        let replacement = atomic_node_type();
        let edits = descendants(unit.root())
            .into_iter()
            .filter_map(Self::declared_type)
            .filter(|ty| Self::is_plain_node(unit, *ty))
            .map(|ty| EditPrimitive::Replace {
                span: Span::new(ty.start_byte(), ty.end_byte()),
                new_text: replacement.clone(),
            })
            .collect();
        Ok(edits)
    }
}
