//! Type universe for the stubforge source generator.
//!
//! The generator never inspects a live program. Instead, every type it can
//! reference is described here: a [`TypeUniverse`] holds [`TypeDef`]s keyed
//! by fully-qualified name, and use sites point at them through
//! [`TypeDescriptor`]s.
//!
//! # Architecture
//!
//! ```text
//! stubforge.toml → stubforge-catalog (parsing) → stubforge-types (universe) → codegen
//! ```
//!
//! The universe starts out with the dialect's built-in types (`System.Object`,
//! `System.String`, the primitives, `System.Attribute`, ...) and is read-only
//! once generation starts.

mod access;
mod attributes;
pub mod builtins;
mod definition;
mod descriptor;
mod error;
mod members;
mod universe;

pub use access::Access;
pub use attributes::AttributeMatch;
pub use definition::{
    AccessorDef, AttributeUse, MemberDef, MethodDef, MethodKind, ParameterDef, PropertyDef,
    TypeDef, TypeKind,
};
pub use descriptor::TypeDescriptor;
pub use error::{Error, Result};
pub use members::{DeclaredMember, MemberFilter, Members};
pub use universe::TypeUniverse;
