//! Import normalization.
//!
//! Imports of the raw-offset utilities are dropped and the updater primitive
//! plus the queue interface are added once each. Surviving imports keep
//! their order; additions go after them.

use queuegen_core::error::GenResult;
use queuegen_core::patch::{EditPrimitive, Span};
use tree_sitter::Node;

use super::{Pass, PassContext};
use crate::codegen::{import_line, FIELD_UPDATER_IMPORT, QUEUE_INTERFACE_IMPORT};
use crate::syntax::{child_of_kind, named_children, SourceUnit};

/// Imports under this prefix refer to the raw-offset utilities.
pub const UNSAFE_IMPORT_PREFIX: &str = "org.jctools.util.Unsafe";

/// Imports every atomic-family unit needs.
const REQUIRED_IMPORTS: [&str; 2] = [FIELD_UPDATER_IMPORT, QUEUE_INTERFACE_IMPORT];

/// Drops unsafe utility imports and adds the atomic ones.
pub struct ImportPass;

impl ImportPass {
    /// Qualified name of an import declaration, `static` and `.*` excluded.
    fn imported_name<'s>(unit: &'s SourceUnit, import: Node<'_>) -> Option<&'s str> {
        named_children(import)
            .into_iter()
            .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"))
            .map(|n| unit.node_text(n))
    }
}

impl Pass for ImportPass {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn edits(&self, unit: &SourceUnit, _ctx: &mut PassContext<'_>) -> GenResult<Vec<EditPrimitive>> {
        let root = unit.root();
        let mut edits = Vec::new();
        let mut surviving: Vec<(Node<'_>, &str)> = Vec::new();
        let mut first_removed: Option<Span> = None;

        for import in named_children(root)
            .into_iter()
            .filter(|n| n.kind() == "import_declaration")
        {
            let Some(name) = Self::imported_name(unit, import) else {
                continue;
            };
            if name.starts_with(UNSAFE_IMPORT_PREFIX) {
                tracing::debug!("dropping import {}", name);
                let span = unit.line_extent(import);
                first_removed.get_or_insert(span);
                edits.push(EditPrimitive::Delete { span });
            } else {
                surviving.push((import, name));
            }
        }

        let missing: Vec<String> = REQUIRED_IMPORTS
            .iter()
            .filter(|required| !surviving.iter().any(|(_, name)| name == *required))
            .map(|&required| import_line(required))
            .collect();
        if missing.is_empty() {
            return Ok(edits);
        }

        let addition = if let Some((last, _)) = surviving.last() {
            EditPrimitive::InsertAfter {
                anchor_span: Span::new(last.start_byte(), last.end_byte()),
                text: missing.iter().map(|line| format!("\n{line}")).collect(),
            }
        } else if let Some(removed) = first_removed {
            EditPrimitive::InsertAt {
                position: removed.start,
                text: missing.iter().map(|line| format!("{line}\n")).collect(),
            }
        } else if let Some(package) = child_of_kind(root, "package_declaration") {
            EditPrimitive::InsertAfter {
                anchor_span: Span::new(package.start_byte(), package.end_byte()),
                text: format!("\n\n{}", missing.join("\n")),
            }
        } else {
            EditPrimitive::InsertAt {
                position: 0,
                text: format!("{}\n\n", missing.join("\n")),
            }
        };
        edits.push(addition);

        Ok(edits)
    }
}
