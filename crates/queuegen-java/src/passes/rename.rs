//! Moves a unit into the atomic family's namespace.
//!
//! Renames type declarations, constructors, supertypes and bare-name field
//! access scopes through the naming rules, and rewrites the package
//! declaration to the configured target package.

use queuegen_core::error::GenResult;
use queuegen_core::naming::{translate_queue_name, translate_supertype_name};
use queuegen_core::patch::{EditPrimitive, Span};
use tree_sitter::Node;

use super::{Pass, PassContext};
use crate::syntax::{
    child_of_kind, descendants, named_children, type_name_node, SourceUnit,
};

/// Applies the unsafe-to-atomic naming translation.
pub struct RenamePass;

impl RenamePass {
    fn replace_if_changed(
        unit: &SourceUnit,
        node: Node<'_>,
        translate: fn(&str) -> String,
        edits: &mut Vec<EditPrimitive>,
    ) {
        let old = unit.node_text(node);
        let new = translate(old);
        if new != old {
            edits.push(EditPrimitive::Replace {
                span: Span::new(node.start_byte(), node.end_byte()),
                new_text: new,
            });
        }
    }

    /// The type nodes listed after `extends` / `implements`.
    fn supertypes(decl: Node<'_>) -> Vec<Node<'_>> {
        let mut types = Vec::new();
        let superclass = decl
            .child_by_field_name("superclass")
            .or_else(|| child_of_kind(decl, "superclass"));
        if let Some(superclass) = superclass {
            types.extend(named_children(superclass));
        }
        let lists = [
            decl.child_by_field_name("interfaces")
                .or_else(|| child_of_kind(decl, "super_interfaces")),
            child_of_kind(decl, "extends_interfaces"),
        ];
        for list in lists.into_iter().flatten() {
            if let Some(type_list) = child_of_kind(list, "type_list") {
                types.extend(named_children(type_list));
            }
        }
        types
    }
}

impl Pass for RenamePass {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn edits(&self, unit: &SourceUnit, ctx: &mut PassContext<'_>) -> GenResult<Vec<EditPrimitive>> {
        let mut edits = Vec::new();

        for node in descendants(unit.root()) {
            match node.kind() {
                "package_declaration" => {
                    let name = named_children(node)
                        .into_iter()
                        .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"));
                    if let Some(name) = name {
                        if unit.node_text(name) != ctx.config.target_package {
                            edits.push(EditPrimitive::Replace {
                                span: Span::new(name.start_byte(), name.end_byte()),
                                new_text: ctx.config.target_package.clone(),
                            });
                        }
                    }
                }
                "class_declaration" | "interface_declaration" => {
                    if let Some(name) = node.child_by_field_name("name") {
                        Self::replace_if_changed(unit, name, translate_queue_name, &mut edits);
                    }
                    for ty in Self::supertypes(node) {
                        if let Some(name) = type_name_node(ty) {
                            Self::replace_if_changed(
                                unit,
                                name,
                                translate_supertype_name,
                                &mut edits,
                            );
                        }
                    }
                }
                "constructor_declaration" => {
                    if let Some(name) = node.child_by_field_name("name") {
                        Self::replace_if_changed(unit, name, translate_queue_name, &mut edits);
                    }
                }
                "field_access" => {
                    if let Some(scope) = node
                        .child_by_field_name("object")
                        .filter(|o| o.kind() == "identifier")
                    {
                        Self::replace_if_changed(unit, scope, translate_queue_name, &mut edits);
                    }
                }
                _ => {}
            }
        }

        Ok(edits)
    }
}
