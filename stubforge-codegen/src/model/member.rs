//! Member declarations of a generated type.

use stubforge_types::Access;

use super::TypeReference;
use crate::builder::{CodeFragment, Renderable};

/// Visibility plus the inheritance modifier of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberAttributes {
    pub access: Access,
    pub modifier: MemberModifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberModifier {
    /// Non-virtual; nothing is emitted.
    #[default]
    Final,
    Override,
}

impl MemberAttributes {
    /// `public`, non-virtual. Satisfies an interface member.
    pub fn public_final() -> Self {
        Self {
            access: Access::Public,
            modifier: MemberModifier::Final,
        }
    }

    /// `<access> override`
    pub fn overriding(access: Access) -> Self {
        Self {
            access,
            modifier: MemberModifier::Override,
        }
    }

    pub fn is_override(&self) -> bool {
        self.modifier == MemberModifier::Override
    }

    /// Keywords in declaration order (`protected override`).
    pub fn keywords(&self) -> String {
        match self.modifier {
            MemberModifier::Final => self.access.as_str().to_string(),
            MemberModifier::Override => format!("{} override", self.access),
        }
    }
}

/// A statement inside a member body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `throw new <exception>();`
    ThrowNotImplemented(TypeReference),
    /// `return <expr>;`
    Return(String),
}

impl Renderable for Statement {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let line = match self {
            Self::ThrowNotImplemented(exception) => format!("throw new {}();", exception),
            Self::Return(expr) => format!("return {};", expr),
        };
        vec![CodeFragment::Line(line)]
    }
}

/// How an argument is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    In,
    Out,
    ByRef,
    #[default]
    ByValue,
}

impl Direction {
    /// Parameter modifier keyword, if any.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::In => Some("in"),
            Self::Out => Some("out"),
            Self::ByRef => Some("ref"),
            Self::ByValue => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDeclaration {
    pub name: String,
    pub ty: TypeReference,
    pub direction: Direction,
}

impl ParameterDeclaration {
    pub fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            name: name.into(),
            ty,
            direction: Direction::ByValue,
        }
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

/// A property. `None` accessors are absent; an empty body renders as an
/// auto-accessor (`get;`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    pub name: String,
    pub ty: TypeReference,
    pub attributes: MemberAttributes,
    pub getter: Option<Vec<Statement>>,
    pub setter: Option<Vec<Statement>>,
}

impl PropertyDeclaration {
    pub fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            name: name.into(),
            ty,
            attributes: MemberAttributes::default(),
            getter: None,
            setter: None,
        }
    }

    pub fn attributes(mut self, attributes: MemberAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn getter(mut self, body: Vec<Statement>) -> Self {
        self.getter = Some(body);
        self
    }

    pub fn setter(mut self, body: Vec<Statement>) -> Self {
        self.setter = Some(body);
        self
    }

    pub fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }
}

/// A method. A `None` body renders as a bodyless signature (`void Run();`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: String,
    pub return_type: TypeReference,
    pub attributes: MemberAttributes,
    pub generic_params: Vec<String>,
    pub params: Vec<ParameterDeclaration>,
    pub body: Option<Vec<Statement>>,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>, return_type: TypeReference) -> Self {
        Self {
            name: name.into(),
            return_type,
            attributes: MemberAttributes::default(),
            generic_params: Vec::new(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn attributes(mut self, attributes: MemberAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn generic(mut self, name: impl Into<String>) -> Self {
        self.generic_params.push(name.into());
        self
    }

    pub fn param(mut self, param: ParameterDeclaration) -> Self {
        self.params.push(param);
        self
    }

    pub fn body(mut self, body: Vec<Statement>) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberDeclaration {
    Property(PropertyDeclaration),
    Method(MethodDeclaration),
}

impl MemberDeclaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Property(p) => &p.name,
            Self::Method(m) => &m.name,
        }
    }

    pub fn attributes(&self) -> &MemberAttributes {
        match self {
            Self::Property(p) => &p.attributes,
            Self::Method(m) => &m.attributes,
        }
    }

    /// Whether `other` would collide with this member in the same type.
    ///
    /// Properties collide by name, methods by name, generic arity and
    /// parameter types.
    pub fn conflicts_with(&self, other: &MemberDeclaration) -> bool {
        match (self, other) {
            (Self::Property(a), Self::Property(b)) => a.name == b.name,
            (Self::Method(a), Self::Method(b)) => {
                a.name == b.name
                    && a.generic_params.len() == b.generic_params.len()
                    && a.params.len() == b.params.len()
                    && a.params.iter().zip(&b.params).all(|(x, y)| {
                        x.ty == y.ty
                            && (x.direction == Direction::ByValue)
                                == (y.direction == Direction::ByValue)
                    })
            }
            _ => false,
        }
    }
}

impl From<PropertyDeclaration> for MemberDeclaration {
    fn from(property: PropertyDeclaration) -> Self {
        Self::Property(property)
    }
}

impl From<MethodDeclaration> for MemberDeclaration {
    fn from(method: MethodDeclaration) -> Self {
        Self::Method(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_keywords() {
        assert_eq!(MemberAttributes::public_final().keywords(), "public");
        assert_eq!(
            MemberAttributes::overriding(Access::ProtectedInternal).keywords(),
            "protected internal override"
        );
        assert!(MemberAttributes::overriding(Access::Public).is_override());
    }

    #[test]
    fn test_statement_lines() {
        let throw = Statement::ThrowNotImplemented(TypeReference::new("NotImplementedException"));
        assert_eq!(
            throw.to_fragments(),
            vec![CodeFragment::line("throw new NotImplementedException();")]
        );
        assert_eq!(
            Statement::Return("0".into()).to_fragments(),
            vec![CodeFragment::line("return 0;")]
        );
    }

    #[test]
    fn test_method_conflicts() {
        let int = TypeReference::new("int");
        let a = MemberDeclaration::from(
            MethodDeclaration::new("Run", TypeReference::new("void"))
                .param(ParameterDeclaration::new("x", int.clone())),
        );
        let b = MemberDeclaration::from(
            MethodDeclaration::new("Run", TypeReference::new("void"))
                .param(ParameterDeclaration::new("y", int.clone())),
        );
        let c = MemberDeclaration::from(
            MethodDeclaration::new("Run", TypeReference::new("void"))
                .param(ParameterDeclaration::new("x", int).direction(Direction::Out)),
        );
        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
    }
}
