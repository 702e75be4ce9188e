//! TOML type catalog for the stubforge source generator.
//!
//! A catalog describes the types generation can refer to, plus formatting
//! preferences:
//!
//! ```toml
//! [render]
//! indent = 4
//!
//! [types."Demo.Shapes.Shape"]
//! abstract = true
//!
//! [[types."Demo.Shapes.Shape".properties]]
//! name = "Name"
//! type = "string"
//! get = { abstract = true }
//! ```
//!
//! Parsing validates identifiers, type expressions, access levels and base
//! chains, and reports problems as [`miette`] diagnostics pointing into the
//! file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod catalog;
mod error;
pub mod type_expr;

pub use catalog::*;
pub use error::{Error, Result, SourceContext};
