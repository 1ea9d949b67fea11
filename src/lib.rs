//! queuegen: derives atomic field-updater linked queues from unsafe-offset ones.
//!
//! The unsafe linked queue family reads and writes its node references by
//! raw memory offset. queuegen rewrites those sources into an equivalent
//! family that only uses `AtomicReferenceFieldUpdater`, so the two families
//! never have to be maintained by hand.

// Core infrastructure - re-exported from queuegen-core
pub use queuegen_core::config;
pub use queuegen_core::error;
pub use queuegen_core::naming;
pub use queuegen_core::output;
pub use queuegen_core::patch;

// Java rewrite engine - re-exported from queuegen-java
pub use queuegen_java::codegen;
pub use queuegen_java::generator;
pub use queuegen_java::passes;
pub use queuegen_java::syntax;

// Front door for build scripts
pub mod cli;
