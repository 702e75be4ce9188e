//! Type and member definitions held by the universe.

use serde::Serialize;

use crate::{Access, TypeDescriptor};

/// Kind of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    /// Built-in value types with a language keyword (`int`, `bool`, ...).
    Primitive,
    /// The `void` pseudo-type.
    Void,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Primitive => "primitive",
            Self::Void => "void",
        }
    }
}

/// An attribute applied to a type or member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeUse {
    /// Attribute type.
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Positional arguments, as source text.
    pub args: Vec<String>,
}

impl AttributeUse {
    pub fn new(ty: TypeDescriptor) -> Self {
        Self {
            ty,
            args: Vec::new(),
        }
    }

    /// Add a positional argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }
}

/// A type definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDef {
    pub namespace: String,
    pub name: String,
    pub kind: TypeKind,
    pub is_abstract: bool,
    pub is_sealed: bool,
    /// Base class. `None` for interfaces and for `System.Object`.
    pub base: Option<TypeDescriptor>,
    /// Implemented (or, for interfaces, inherited) interfaces.
    pub interfaces: Vec<TypeDescriptor>,
    /// Generic parameter names, in declaration order.
    pub generic_params: Vec<String>,
    pub members: Vec<MemberDef>,
    pub attributes: Vec<AttributeUse>,
}

impl TypeDef {
    /// Create a definition of the given kind.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            is_abstract: false,
            is_sealed: false,
            base: None,
            interfaces: Vec::new(),
            generic_params: Vec::new(),
            members: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Create a class deriving from `System.Object`.
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, TypeKind::Class)
            .base(TypeDescriptor::named("System", "Object"))
    }

    /// Create an interface.
    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, TypeKind::Interface)
    }

    /// Mark as abstract.
    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Mark as sealed.
    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// Set the base class.
    pub fn base(mut self, base: TypeDescriptor) -> Self {
        self.base = Some(base);
        self
    }

    /// Clear the base class.
    pub fn no_base(mut self) -> Self {
        self.base = None;
        self
    }

    /// Add an implemented interface.
    pub fn implements(mut self, interface: TypeDescriptor) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a generic parameter.
    pub fn generic(mut self, name: impl Into<String>) -> Self {
        self.generic_params.push(name.into());
        self
    }

    /// Add a property.
    pub fn property(mut self, property: PropertyDef) -> Self {
        self.members.push(MemberDef::Property(property));
        self
    }

    /// Add a method.
    pub fn method(mut self, method: MethodDef) -> Self {
        self.members.push(MemberDef::Method(method));
        self
    }

    /// Add an attribute.
    pub fn attribute(mut self, attribute: AttributeUse) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Fully-qualified name, the universe key.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Descriptor of the open type, with its own parameters as arguments.
    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::generic(
            self.namespace.clone(),
            self.name.clone(),
            self.generic_params
                .iter()
                .map(|p| TypeDescriptor::param(p.clone()))
                .collect(),
        )
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
}

/// A member of a type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "member", rename_all = "lowercase")]
pub enum MemberDef {
    Property(PropertyDef),
    Method(MethodDef),
}

impl MemberDef {
    pub fn name(&self) -> &str {
        match self {
            Self::Property(p) => &p.name,
            Self::Method(m) => &m.name,
        }
    }

    pub fn attributes(&self) -> &[AttributeUse] {
        match self {
            Self::Property(p) => &p.attributes,
            Self::Method(m) => &m.attributes,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            Self::Property(p) => p.is_static,
            Self::Method(m) => m.is_static,
        }
    }

    /// Whether every part of the member is abstract.
    pub fn is_abstract(&self) -> bool {
        match self {
            Self::Property(p) => p.is_abstract(),
            Self::Method(m) => m.is_abstract,
        }
    }

    /// Most visible access among the member's parts.
    pub fn access(&self) -> Access {
        match self {
            Self::Property(p) => p
                .accessors()
                .map(|a| a.access)
                .min_by_key(|a| *a as u8)
                .unwrap_or(Access::Private),
            Self::Method(m) => m.access,
        }
    }

    /// Key used to decide whether a derived declaration hides this one.
    pub fn signature(&self) -> String {
        match self {
            Self::Property(p) => format!("P:{}", p.name),
            Self::Method(m) => {
                let params: Vec<String> = m
                    .params
                    .iter()
                    .map(|p| {
                        if p.by_ref {
                            format!("{}&", p.ty)
                        } else {
                            p.ty.to_string()
                        }
                    })
                    .collect();
                format!("M:{}`{}({})", m.name, m.generic_params.len(), params.join(","))
            }
        }
    }

    /// Apply a generic substitution to every type the member mentions.
    pub fn substitute(&self, map: &std::collections::HashMap<String, TypeDescriptor>) -> Self {
        if map.is_empty() {
            return self.clone();
        }
        match self {
            Self::Property(p) => Self::Property(PropertyDef {
                ty: p.ty.substitute(map),
                ..p.clone()
            }),
            Self::Method(m) => {
                // Method-level generic parameters shadow type-level ones.
                let mut map = map.clone();
                for g in &m.generic_params {
                    map.remove(g);
                }
                Self::Method(MethodDef {
                    return_type: m.return_type.substitute(&map),
                    params: m
                        .params
                        .iter()
                        .map(|p| ParameterDef {
                            ty: p.ty.substitute(&map),
                            ..p.clone()
                        })
                        .collect(),
                    ..m.clone()
                })
            }
        }
    }
}

/// A property accessor (`get` or `set`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessorDef {
    pub access: Access,
    pub is_abstract: bool,
}

impl AccessorDef {
    /// An abstract accessor.
    pub fn abstract_(access: Access) -> Self {
        Self {
            access,
            is_abstract: true,
        }
    }

    /// An accessor with a body.
    pub fn concrete(access: Access) -> Self {
        Self {
            access,
            is_abstract: false,
        }
    }
}

/// A property definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    pub getter: Option<AccessorDef>,
    pub setter: Option<AccessorDef>,
    pub is_static: bool,
    pub attributes: Vec<AttributeUse>,
}

impl PropertyDef {
    /// Create a property with no accessors yet.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            getter: None,
            setter: None,
            is_static: false,
            attributes: Vec::new(),
        }
    }

    /// Set the getter.
    pub fn get(mut self, accessor: AccessorDef) -> Self {
        self.getter = Some(accessor);
        self
    }

    /// Set the setter.
    pub fn set(mut self, accessor: AccessorDef) -> Self {
        self.setter = Some(accessor);
        self
    }

    /// Mark as static.
    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Add an attribute.
    pub fn attribute(mut self, attribute: AttributeUse) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Declared accessors, getter first.
    pub fn accessors(&self) -> impl Iterator<Item = &AccessorDef> {
        self.getter.iter().chain(self.setter.iter())
    }

    /// True when the property declares at least one accessor and every
    /// declared accessor is abstract.
    pub fn is_abstract(&self) -> bool {
        let mut accessors = self.accessors().peekable();
        accessors.peek().is_some() && accessors.all(|a| a.is_abstract)
    }
}

/// What kind of callable a method definition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    #[default]
    Ordinary,
    Constructor,
    Operator,
    /// Property or event accessor surfaced as a method.
    Accessor,
}

/// A method definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDef {
    pub name: String,
    pub return_type: TypeDescriptor,
    pub access: Access,
    pub kind: MethodKind,
    pub is_abstract: bool,
    pub is_static: bool,
    pub generic_params: Vec<String>,
    pub params: Vec<ParameterDef>,
    pub attributes: Vec<AttributeUse>,
}

impl MethodDef {
    /// Create a public, concrete, ordinary method.
    pub fn new(name: impl Into<String>, return_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            return_type,
            access: Access::Public,
            kind: MethodKind::Ordinary,
            is_abstract: false,
            is_static: false,
            generic_params: Vec::new(),
            params: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Set the access level.
    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Set the method kind.
    pub fn kind(mut self, kind: MethodKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark as abstract.
    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Mark as static.
    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Add a generic parameter.
    pub fn generic(mut self, name: impl Into<String>) -> Self {
        self.generic_params.push(name.into());
        self
    }

    /// Add a parameter.
    pub fn param(mut self, param: ParameterDef) -> Self {
        self.params.push(param);
        self
    }

    /// Add an attribute.
    pub fn attribute(mut self, attribute: AttributeUse) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDef {
    pub name: String,
    /// Parameter type. For by-reference parameters this is the referenced
    /// element type.
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    pub by_ref: bool,
    pub is_in: bool,
    pub is_out: bool,
}

impl ParameterDef {
    /// Create a by-value parameter.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            by_ref: false,
            is_in: false,
            is_out: false,
        }
    }

    /// Pass by reference (`ref`).
    pub fn by_ref(mut self) -> Self {
        self.by_ref = true;
        self
    }

    /// Pass by reference as an output (`out`).
    pub fn out(mut self) -> Self {
        self.by_ref = true;
        self.is_out = true;
        self
    }

    /// Pass by read-only reference (`in`).
    pub fn in_(mut self) -> Self {
        self.by_ref = true;
        self.is_in = true;
        self
    }
}
