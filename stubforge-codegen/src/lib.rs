//! Override-stub generation for stubforge.
//!
//! Given a [`TypeUniverse`](stubforge_types::TypeUniverse) and a base type,
//! this crate produces the source of a class that overrides every abstract
//! member of the base with a body throwing `NotImplementedException`.
//!
//! # Pipeline
//!
//! ```text
//! StubRequest → CompilationUnit (+ TypeResolver, OverrideSynthesizer)
//!             → Renderer (raw text) → normalize (final text)
//! ```
//!
//! - [`model`] - The document model of a generated file
//! - [`builder`] - Indentation-aware pretty-printing primitives
//! - [`TypeResolver`] - Descriptor to source reference, registering imports
//! - [`OverrideSynthesizer`] - Stubs for abstract members
//! - [`Renderer`] / [`normalize`] - Text output
//! - [`Generator`] - The whole pipeline in one call

pub mod builder;
mod error;
mod generator;
pub mod model;
mod normalize;
mod render;
mod resolve;
mod synth;

pub use error::{Error, Result};
pub use generator::{Generator, StubRequest};
pub use model::*;
pub use normalize::normalize;
pub use render::{RenderOptions, Renderer};
pub use resolve::TypeResolver;
pub use synth::{OverrideSynthesizer, synthesize_overrides};
