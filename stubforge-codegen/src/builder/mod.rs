//! Pretty-printing primitives.
//!
//! - [`CodeBuilder`] - Indentation-aware text buffer
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Renderable`] - Trait for types that can be converted to code fragments
//! - [`Indent`], [`BraceStyle`] - Layout configuration

mod code_builder;
mod fragment;
mod indent;

pub use code_builder::CodeBuilder;
pub use fragment::{BraceStyle, CodeFragment, Renderable};
pub use indent::Indent;
