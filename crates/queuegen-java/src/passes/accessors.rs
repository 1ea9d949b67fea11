//! Field accessor rewriting for classes tagged `$gen:ordered-fields`.
//!
//! The unsafe family encodes the memory ordering of every field access in
//! the accessor's name: `so`/`sp` (ordered/plain store), `cas`, `sv`
//! (volatile store), `lv`/`lp` (volatile/plain load), followed by the
//! capitalized field name. Field updaters are coarser than raw offsets, so
//! the mapping is lossy:
//!
//! | Prefix | Kind | Rewritten body |
//! |--------|------|----------------|
//! | `so`, `sp` | [`AccessorKind::LazyStore`] | `U.lazySet(this, newValue)` |
//! | `cas` | [`AccessorKind::CompareAndSet`] | `return U.compareAndSet(this, expect, newValue)` |
//! | `sv` | [`AccessorKind::VolatileStore`] | `field = newValue` |
//! | `lv`, `lp` | [`AccessorKind::Load`] | `return field` |
//!
//! Any other prefix is fatal. Tagged classes also lose their static fields
//! and static initializers, which only exist to compute raw offsets.

use std::collections::BTreeMap;

use queuegen_core::error::{GenError, GenResult};
use queuegen_core::naming::{capitalize, NodeRole};
use queuegen_core::patch::{EditPrimitive, Span};
use tree_sitter::Node;

use super::{Pass, PassContext};
use crate::codegen;
use crate::syntax::{body_members, child_of_kind, line_start, type_declarations, SourceUnit};

/// Marker comment on a class whose field accessors follow the naming convention.
pub const ORDERED_FIELDS_MARKER: &str = "$gen:ordered-fields";

/// What an accessor method does to its field, decided by its name prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessorKind {
    /// `so` or `sp`: store with at most release ordering.
    LazyStore,
    /// `cas`: compare and swap.
    CompareAndSet,
    /// `sv`: volatile store.
    VolatileStore,
    /// `lv` or `lp`: load.
    Load,
    /// A prefix outside the convention.
    Unknown(String),
}

impl AccessorKind {
    /// Classify a method prefix.
    pub fn from_prefix(prefix: &str) -> AccessorKind {
        match prefix {
            "so" | "sp" => AccessorKind::LazyStore,
            "cas" => AccessorKind::CompareAndSet,
            "sv" => AccessorKind::VolatileStore,
            "lv" | "lp" => AccessorKind::Load,
            other => AccessorKind::Unknown(other.to_string()),
        }
    }

    /// Classify `method` as an accessor of `field`.
    ///
    /// Returns `None` when the method name does not end with the capitalized
    /// field name, i.e. the method is not an accessor of this field.
    pub fn classify(method: &str, field: &str) -> Option<AccessorKind> {
        let prefix = method.strip_suffix(capitalize(field).as_str())?;
        Some(AccessorKind::from_prefix(prefix))
    }

    /// Whether the rewritten body goes through the field's updater.
    pub fn uses_updater(&self) -> bool {
        matches!(self, AccessorKind::LazyStore | AccessorKind::CompareAndSet)
    }
}

/// Rewrites accessors of tagged classes onto atomic field updaters.
pub struct AccessorPass;

/// Edits planned for one tagged class.
struct ClassPlan<'t> {
    class_name: String,
    member_indent: String,
    /// Body replacements keyed by body start; a later field wins a shared method.
    bodies: BTreeMap<usize, (Node<'t>, String)>,
    updaters: Vec<String>,
    volatile_fields: Vec<Node<'t>>,
    exchange: bool,
}

impl AccessorPass {
    fn resolve_role(class_name: &str, field: &str) -> GenResult<NodeRole> {
        NodeRole::from_field_name(field).ok_or_else(|| GenError::UnrecognizedUpdaterField {
            class: class_name.to_string(),
            field: field.to_string(),
        })
    }

    fn plan_class<'t>(unit: &SourceUnit, decl: Node<'t>) -> GenResult<ClassPlan<'t>> {
        let class_name = unit.name_of(decl).unwrap_or_default().to_string();
        let members = body_members(decl);
        let methods: Vec<Node<'t>> = members
            .iter()
            .copied()
            .filter(|m| m.kind() == "method_declaration")
            .collect();
        let fields = members
            .iter()
            .copied()
            .filter(|m| m.kind() == "field_declaration" && !unit.has_modifier(*m, "static"));

        let mut plan = ClassPlan {
            member_indent: unit.member_indent(decl),
            class_name,
            bodies: BTreeMap::new(),
            updaters: Vec::new(),
            volatile_fields: Vec::new(),
            exchange: false,
        };

        for field in fields {
            let mut cursor = field.walk();
            let declarators: Vec<Node<'t>> =
                field.children_by_field_name("declarator", &mut cursor).collect();

            let mut declaration_needs_volatile = false;
            for declarator in declarators {
                let Some(name) = unit.name_of(declarator) else {
                    continue;
                };
                if Self::plan_field(unit, &methods, name, &mut plan)? {
                    declaration_needs_volatile = true;
                }
            }

            if declaration_needs_volatile && !unit.has_modifier(field, "volatile") {
                plan.volatile_fields.push(field);
            }
        }

        Ok(plan)
    }

    /// Plan the accessor rewrites for one field. Returns whether it needs an updater.
    fn plan_field<'t>(
        unit: &SourceUnit,
        methods: &[Node<'t>],
        field: &str,
        plan: &mut ClassPlan<'t>,
    ) -> GenResult<bool> {
        let mut needs_updater = false;

        for method in methods {
            let Some(method_name) = unit.name_of(*method) else {
                continue;
            };
            let Some(kind) = AccessorKind::classify(method_name, field) else {
                continue;
            };

            let indent = unit.indent_of(*method);
            let body = match &kind {
                AccessorKind::LazyStore => {
                    let role = Self::resolve_role(&plan.class_name, field)?;
                    codegen::lazy_set_body(role.updater_name(), indent)
                }
                AccessorKind::CompareAndSet => {
                    let role = Self::resolve_role(&plan.class_name, field)?;
                    codegen::compare_and_set_body(role.updater_name(), indent)
                }
                AccessorKind::VolatileStore => codegen::assignment_body(field, indent),
                AccessorKind::Load => codegen::return_field_body(field, indent),
                AccessorKind::Unknown(prefix) => {
                    return Err(GenError::UnrecognizedAccessorConvention {
                        class: plan.class_name.clone(),
                        method: method_name.to_string(),
                        prefix: prefix.clone(),
                    });
                }
            };
            needs_updater |= kind.uses_updater();

            tracing::debug!(
                "rewriting {}.{} as {:?}",
                plan.class_name,
                method_name,
                kind
            );
            if let Some(block) = method.child_by_field_name("body") {
                plan.bodies.insert(block.start_byte(), (block, body));
            }
        }

        if NodeRole::from_field_name(field) == Some(NodeRole::Producer) {
            needs_updater = true;
            plan.exchange = true;
        }

        if needs_updater {
            let role = Self::resolve_role(&plan.class_name, field)?;
            plan.updaters.push(codegen::updater_field(&plan.class_name, role));
        }

        Ok(needs_updater)
    }

    fn class_edits(
        unit: &SourceUnit,
        decl: Node<'_>,
        marker: Node<'_>,
        plan: ClassPlan<'_>,
        edits: &mut Vec<EditPrimitive>,
    ) {
        edits.push(EditPrimitive::Delete {
            span: unit.line_extent(marker),
        });

        for member in body_members(decl) {
            let is_static_field =
                member.kind() == "field_declaration" && unit.has_modifier(member, "static");
            if is_static_field || member.kind() == "static_initializer" {
                edits.push(EditPrimitive::Delete {
                    span: unit.line_extent(member),
                });
            }
        }

        for (block, body) in plan.bodies.into_values() {
            edits.push(EditPrimitive::Replace {
                span: Span::new(block.start_byte(), block.end_byte()),
                new_text: body,
            });
        }

        for field in plan.volatile_fields {
            if let Some(ty) = field.child_by_field_name("type") {
                edits.push(EditPrimitive::InsertBefore {
                    anchor_span: Span::new(ty.start_byte(), ty.end_byte()),
                    text: "volatile ".to_string(),
                });
            }
        }

        let Some(body) = decl.child_by_field_name("body") else {
            return;
        };

        if let Some(open) = child_of_kind(body, "{") {
            let text: String = plan
                .updaters
                .iter()
                .map(|u| format!("\n{}{}", plan.member_indent, u))
                .collect();
            if !text.is_empty() {
                edits.push(EditPrimitive::InsertAfter {
                    anchor_span: Span::new(open.start_byte(), open.end_byte()),
                    text,
                });
            }
        }

        if plan.exchange {
            let count = body.child_count();
            if let Some(close) = count.checked_sub(1).and_then(|i| body.child(i)) {
                let close_line = line_start(unit.text(), close.start_byte());
                let method = codegen::exchange_method(&plan.member_indent);
                if unit.text()[close_line..close.start_byte()].trim().is_empty() {
                    edits.push(EditPrimitive::InsertAt {
                        position: close_line,
                        text: format!("\n{}{}\n", plan.member_indent, method),
                    });
                } else {
                    // Brace shares a line with code: give the method its own line.
                    let code_end = unit.text()[..close.start_byte()].trim_end().len();
                    edits.push(EditPrimitive::Replace {
                        span: Span::new(code_end, close.start_byte()),
                        new_text: format!(
                            "\n{}{}\n{}",
                            plan.member_indent,
                            method,
                            unit.indent_of(decl)
                        ),
                    });
                }
            }
        }
    }
}

impl Pass for AccessorPass {
    fn name(&self) -> &'static str {
        "accessors"
    }

    fn edits(&self, unit: &SourceUnit, ctx: &mut PassContext<'_>) -> GenResult<Vec<EditPrimitive>> {
        let mut edits = Vec::new();
        for decl in type_declarations(unit.root()) {
            let Some(marker) = unit.marker_comment(decl, ORDERED_FIELDS_MARKER) else {
                continue;
            };
            let plan = Self::plan_class(unit, decl)?;
            tracing::debug!(
                "{}: {} accessors, {} updaters",
                plan.class_name,
                plan.bodies.len(),
                plan.updaters.len()
            );
            ctx.stats.accessors += plan.bodies.len();
            ctx.stats.updaters += plan.updaters.len();
            Self::class_edits(unit, decl, marker, plan, &mut edits);
        }
        Ok(edits)
    }
}
