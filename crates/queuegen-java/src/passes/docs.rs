//! Generated-file notice on every class and interface.

use queuegen_core::error::GenResult;
use queuegen_core::patch::{EditPrimitive, Span};
use tree_sitter::Node;

use super::{Pass, PassContext};
use crate::codegen::{generated_notice, javadoc};
use crate::syntax::{comment_content, type_declarations, SourceUnit};

/// Prepends the generated-file notice to type declaration javadocs.
pub struct DocumentationPass;

impl DocumentationPass {
    fn existing_javadoc<'t>(unit: &SourceUnit, decl: Node<'t>) -> Option<Node<'t>> {
        unit.leading_comment(decl)
            .filter(|c| unit.node_text(*c).starts_with("/**"))
    }
}

impl Pass for DocumentationPass {
    fn name(&self) -> &'static str {
        "docs"
    }

    fn edits(&self, unit: &SourceUnit, ctx: &mut PassContext<'_>) -> GenResult<Vec<EditPrimitive>> {
        let notice = generated_notice(
            &ctx.config.generator_name,
            &ctx.config.source_module,
            ctx.source_file,
        );

        let mut edits = Vec::new();
        for decl in type_declarations(unit.root()) {
            ctx.stats.classes += 1;
            match Self::existing_javadoc(unit, decl) {
                Some(doc) => {
                    let indent = unit.indent_of(doc);
                    let content = comment_content(unit.node_text(doc));
                    edits.push(EditPrimitive::Replace {
                        span: Span::new(doc.start_byte(), doc.end_byte()),
                        new_text: javadoc(indent, &notice, Some(content)),
                    });
                }
                None => {
                    let indent = unit.indent_of(decl);
                    edits.push(EditPrimitive::InsertBefore {
                        anchor_span: Span::new(decl.start_byte(), decl.end_byte()),
                        text: format!("{}\n{}", javadoc(indent, &notice, None), indent),
                    });
                }
            }
        }
        Ok(edits)
    }
}
