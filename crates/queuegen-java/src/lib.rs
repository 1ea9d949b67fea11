//! Java rewrite engine for queuegen.
//!
//! Derives the field-updater ("atomic") variant of a linked queue class from
//! its raw-offset ("unsafe") original. The source is parsed with
//! tree-sitter-java, run through an ordered list of rewrite passes, and
//! re-parsed between passes.
//!
//! ```
//! use queuegen_core::config::GeneratorConfig;
//! use queuegen_java::generator::AtomicQueueGenerator;
//!
//! let config = GeneratorConfig::default();
//! let generator = AtomicQueueGenerator::new(&config);
//! let unit = generator
//!     .generate("SpscLinkedQueue.java", "package org.jctools.queues;\n\npublic class SpscLinkedQueue<E> {}\n")
//!     .unwrap();
//! assert_eq!(unit.file_name, "SpscLinkedAtomicQueue.java");
//! assert!(unit.text.contains("public class SpscLinkedAtomicQueue<E> {}"));
//! ```

pub mod codegen;
pub mod generator;
pub mod passes;
pub mod syntax;

pub use generator::{AtomicQueueGenerator, GeneratedUnit};
