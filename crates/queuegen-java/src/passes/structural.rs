//! Class-level edits that do not depend on field accessors.
//!
//! - Methods tagged `$gen:ignore` are removed together with their marker.
//! - `MpscLinkedAtomicQueue` is made concrete and final.

use queuegen_core::error::GenResult;
use queuegen_core::patch::{EditPrimitive, Span};
use tree_sitter::Node;

use super::{Pass, PassContext};
use crate::syntax::{body_members, child_of_kind, modifier_token, type_declarations, SourceUnit};

/// Marker comment on a method with no atomic-family equivalent.
pub const IGNORE_MARKER: &str = "$gen:ignore";

/// The one translated class that needs no further subclassing.
pub const FINAL_CLASS_NAME: &str = "MpscLinkedAtomicQueue";

/// Removes ignored methods and finalizes the special-cased class.
pub struct StructuralPass;

impl StructuralPass {
    fn remove_ignored_methods(unit: &SourceUnit, decl: Node<'_>, edits: &mut Vec<EditPrimitive>) {
        for method in body_members(decl)
            .into_iter()
            .filter(|m| m.kind() == "method_declaration")
        {
            if let Some(marker) = unit.marker_comment(method, IGNORE_MARKER) {
                tracing::debug!(
                    "removing ignored method {}",
                    unit.name_of(method).unwrap_or("<anonymous>")
                );
                edits.push(EditPrimitive::Delete {
                    span: unit.line_extent(marker),
                });
                edits.push(EditPrimitive::Delete {
                    span: unit.line_extent(method),
                });
            }
        }
    }

    fn finalize(unit: &SourceUnit, decl: Node<'_>, edits: &mut Vec<EditPrimitive>) {
        let is_final = modifier_token(decl, "final").is_some();
        match modifier_token(decl, "abstract") {
            Some(abstract_kw) if is_final => {
                let end = unit.text()[abstract_kw.end_byte()..]
                    .find(|c: char| !c.is_whitespace())
                    .map(|offset| abstract_kw.end_byte() + offset)
                    .unwrap_or(abstract_kw.end_byte());
                edits.push(EditPrimitive::Delete {
                    span: Span::new(abstract_kw.start_byte(), end),
                });
            }
            Some(abstract_kw) => edits.push(EditPrimitive::Replace {
                span: Span::new(abstract_kw.start_byte(), abstract_kw.end_byte()),
                new_text: "final".to_string(),
            }),
            None if is_final => {}
            None => {
                if let Some(class_kw) = child_of_kind(decl, "class") {
                    edits.push(EditPrimitive::InsertBefore {
                        anchor_span: Span::new(class_kw.start_byte(), class_kw.end_byte()),
                        text: "final ".to_string(),
                    });
                }
            }
        }
    }
}

impl Pass for StructuralPass {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn edits(&self, unit: &SourceUnit, _ctx: &mut PassContext<'_>) -> GenResult<Vec<EditPrimitive>> {
        let mut edits = Vec::new();
        for decl in type_declarations(unit.root()) {
            Self::remove_ignored_methods(unit, decl, &mut edits);
            if decl.kind() == "class_declaration" && unit.name_of(decl) == Some(FINAL_CLASS_NAME) {
                Self::finalize(unit, decl, &mut edits);
            }
        }
        Ok(edits)
    }
}
