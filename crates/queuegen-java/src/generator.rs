//! The pass pipeline for one compilation unit.

use queuegen_core::config::GeneratorConfig;
use queuegen_core::error::GenResult;
use queuegen_core::naming::translate_file_name;

use crate::passes::{
    AccessorPass, DocumentationPass, GenerationStats, ImportPass, Pass, PassContext, RenamePass,
    StructuralPass, TypeSubstitutionPass,
};
use crate::syntax::SourceUnit;

/// A rewritten compilation unit, ready to be written out.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    /// Output file name (translated from the input name).
    pub file_name: String,
    /// Rewritten source.
    pub text: String,
    /// What the pipeline did.
    pub stats: GenerationStats,
}

/// Derives atomic-family queue sources from unsafe-family ones.
pub struct AtomicQueueGenerator<'a> {
    config: &'a GeneratorConfig,
    passes: Vec<Box<dyn Pass>>,
}

impl<'a> AtomicQueueGenerator<'a> {
    /// Create a generator with the standard pass order.
    ///
    /// Ignored methods are removed before accessor dispatch, so a method
    /// tagged `$gen:ignore` never has to follow the accessor convention.
    pub fn new(config: &'a GeneratorConfig) -> Self {
        AtomicQueueGenerator {
            config,
            passes: vec![
                Box::new(RenamePass),
                Box::new(TypeSubstitutionPass),
                Box::new(StructuralPass),
                Box::new(AccessorPass),
                Box::new(DocumentationPass),
                Box::new(ImportPass),
            ],
        }
    }

    /// Names of the configured passes, in run order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Rewrite `source`, read from a file called `file_name`.
    ///
    /// `file_name` is the base name of the input; it is quoted in the
    /// generated notice and translated into the output name.
    pub fn generate(&self, file_name: &str, source: &str) -> GenResult<GeneratedUnit> {
        let mut ctx = PassContext::new(self.config, file_name);
        let mut unit = SourceUnit::parse(file_name, source)?;

        for pass in &self.passes {
            let text = pass.run(&unit, &mut ctx)?;
            unit = SourceUnit::parse(file_name, text)?;
        }

        let output_name = translate_file_name(file_name);
        tracing::debug!(
            "generated {} from {}: {:?}",
            output_name,
            file_name,
            ctx.stats
        );

        Ok(GeneratedUnit {
            file_name: output_name,
            text: unit.into_text(),
            stats: ctx.stats,
        })
    }
}
