//! Core infrastructure for queuegen.
//!
//! This crate provides the language-agnostic pieces of the generator:
//! - Span-based batch edits used to print a rewritten tree
//! - Naming rules between the unsafe and atomic queue families
//! - Error types and exit code mapping
//! - Generator configuration
//! - JSON output types for CLI responses

pub mod config;
pub mod error;
pub mod naming;
pub mod output;
pub mod patch;
