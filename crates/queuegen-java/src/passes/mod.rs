//! Rewrite passes.
//!
//! Each pass inspects one parsed [`SourceUnit`] and returns the span edits
//! that produce the next one. Passes do not see each other's edits until the
//! generator re-parses, so every pass works on a consistent tree.

use queuegen_core::config::GeneratorConfig;
use queuegen_core::error::GenResult;
use queuegen_core::patch::EditPrimitive;

use crate::syntax::SourceUnit;

pub mod accessors;
pub mod docs;
pub mod imports;
pub mod rename;
pub mod structural;
pub mod types;

pub use accessors::{AccessorKind, AccessorPass, ORDERED_FIELDS_MARKER};
pub use docs::DocumentationPass;
pub use imports::{ImportPass, UNSAFE_IMPORT_PREFIX};
pub use rename::RenamePass;
pub use structural::{StructuralPass, FINAL_CLASS_NAME, IGNORE_MARKER};
pub use types::TypeSubstitutionPass;

/// Counters accumulated while a unit moves through the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Class and interface declarations seen.
    pub classes: usize,
    /// Accessor method bodies rewritten.
    pub accessors: usize,
    /// Updater fields synthesized.
    pub updaters: usize,
}

/// Shared, read-mostly state handed to every pass.
pub struct PassContext<'a> {
    /// Generator settings.
    pub config: &'a GeneratorConfig,
    /// File name of the original input, quoted in generated notices.
    pub source_file: &'a str,
    /// Counters for the report.
    pub stats: GenerationStats,
}

impl<'a> PassContext<'a> {
    /// Create a context for one input file.
    pub fn new(config: &'a GeneratorConfig, source_file: &'a str) -> Self {
        PassContext {
            config,
            source_file,
            stats: GenerationStats::default(),
        }
    }
}

/// A single tree-rewrite stage.
pub trait Pass {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Collect the edits this pass makes to `unit`.
    fn edits(&self, unit: &SourceUnit, ctx: &mut PassContext<'_>) -> GenResult<Vec<EditPrimitive>>;

    /// Run the pass and return the rewritten text.
    fn run(&self, unit: &SourceUnit, ctx: &mut PassContext<'_>) -> GenResult<String> {
        let edits = self.edits(unit, ctx)?;
        tracing::debug!(
            "{} pass: {} edits in {}",
            self.name(),
            edits.len(),
            unit.file_name()
        );
        unit.apply(edits)
    }
}
