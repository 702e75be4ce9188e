use stubforge_types::Access;

use super::{MemberDeclaration, TypeReference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeclarationKind {
    #[default]
    Class,
    Interface,
    Struct,
}

impl DeclarationKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Struct => "struct",
        }
    }
}

/// A type declared in the generated compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub access: Access,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub generic_params: Vec<String>,
    /// Base class first (if any), then interfaces.
    pub base_types: Vec<TypeReference>,
    pub members: Vec<MemberDeclaration>,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            access: Access::Public,
            is_abstract: false,
            is_sealed: false,
            generic_params: Vec::new(),
            base_types: Vec::new(),
            members: Vec::new(),
        }
    }

    /// A public class.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Class)
    }

    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn generic(mut self, name: impl Into<String>) -> Self {
        self.generic_params.push(name.into());
        self
    }

    pub fn base(mut self, base: TypeReference) -> Self {
        self.base_types.push(base);
        self
    }

    pub fn member(mut self, member: impl Into<MemberDeclaration>) -> Self {
        self.members.push(member.into());
        self
    }

    /// Whether a member colliding with `candidate` is already declared.
    pub fn declares(&self, candidate: &MemberDeclaration) -> bool {
        self.members.iter().any(|m| m.conflicts_with(candidate))
    }
}
