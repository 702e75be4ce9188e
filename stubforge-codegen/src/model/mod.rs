//! Document model of a generated compilation unit.
//!
//! Everything here is plain data built during one generation call and
//! rendered once by the [`Renderer`](crate::Renderer).

mod declaration;
mod imports;
mod member;
mod reference;
mod unit;

pub use declaration::{DeclarationKind, TypeDeclaration};
pub use imports::ImportSection;
pub use member::{
    Direction, MemberAttributes, MemberDeclaration, MemberModifier, MethodDeclaration,
    ParameterDeclaration, PropertyDeclaration, Statement,
};
pub use reference::TypeReference;
pub use unit::{CompilationUnit, NamespaceSection, SectionId};
