//! Core utilities and types for stubforge.
//!
//! This crate provides the file-writing rules and identifier helpers shared
//! by the catalog loader, the code generator and the CLI.

mod file;
mod naming;

// File operations
pub use file::{File, FileRules, Overwrite, WriteResult};
// Identifier utilities
pub use naming::{KEYWORDS, escape_identifier, is_keyword, validate_identifier};
