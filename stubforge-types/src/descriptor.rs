//! Use-site references to types.

use std::{collections::HashMap, fmt};

use serde::{Serialize, Serializer};

/// A reference to a type as it appears at a use site.
///
/// Descriptors are cheap values; the definition they name (kind, base type,
/// members) lives in the [`TypeUniverse`](crate::TypeUniverse).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A named type, possibly constructed with generic arguments.
    Named {
        /// Declaring namespace (empty for the global namespace).
        namespace: String,
        /// Simple name without generic arguments.
        name: String,
        /// Generic type arguments, in declaration order.
        args: Vec<TypeDescriptor>,
    },
    /// A single-dimensional array of the element type.
    Array(Box<TypeDescriptor>),
    /// A generic type parameter (`T`).
    Param(String),
}

impl TypeDescriptor {
    /// Create a non-generic named type.
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            namespace: namespace.into(),
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create a constructed generic type.
    pub fn generic(
        namespace: impl Into<String>,
        name: impl Into<String>,
        args: Vec<TypeDescriptor>,
    ) -> Self {
        Self::Named {
            namespace: namespace.into(),
            name: name.into(),
            args,
        }
    }

    /// Create a named type from a dotted full name (`System.String`).
    pub fn from_full_name(full_name: &str) -> Self {
        match full_name.rsplit_once('.') {
            Some((namespace, name)) => Self::named(namespace, name),
            None => Self::named("", full_name),
        }
    }

    /// Create an array of the given element type.
    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array(Box::new(element))
    }

    /// Create a generic type parameter reference.
    pub fn param(name: impl Into<String>) -> Self {
        Self::Param(name.into())
    }

    /// Simple name of the type (`String`, `Int32[]`, `T`).
    pub fn name(&self) -> String {
        match self {
            Self::Named { name, .. } => name.clone(),
            Self::Array(element) => format!("{}[]", element.name()),
            Self::Param(name) => name.clone(),
        }
    }

    /// Fully-qualified name without generic arguments.
    ///
    /// This is the key of the definition in the universe for named types.
    pub fn full_name(&self) -> String {
        match self {
            Self::Named {
                namespace, name, ..
            } if namespace.is_empty() => name.clone(),
            Self::Named {
                namespace, name, ..
            } => format!("{}.{}", namespace, name),
            Self::Array(element) => format!("{}[]", element.full_name()),
            Self::Param(name) => name.clone(),
        }
    }

    /// Declaring namespace. Arrays report their element's namespace and
    /// generic parameters have none.
    pub fn namespace(&self) -> &str {
        match self {
            Self::Named { namespace, .. } => namespace,
            Self::Array(element) => element.namespace(),
            Self::Param(_) => "",
        }
    }

    /// Generic type arguments (empty for non-generic and non-named types).
    pub fn type_args(&self) -> &[TypeDescriptor] {
        match self {
            Self::Named { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_param(&self) -> bool {
        matches!(self, Self::Param(_))
    }

    /// Element type of an array.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Strip every array layer, returning the innermost element and the
    /// number of layers removed.
    pub fn innermost(&self) -> (&TypeDescriptor, usize) {
        let mut current = self;
        let mut depth = 0;
        while let Self::Array(element) = current {
            current = element;
            depth += 1;
        }
        (current, depth)
    }

    /// Replace generic parameters according to `map`.
    ///
    /// Parameters without an entry are left untouched.
    pub fn substitute(&self, map: &HashMap<String, TypeDescriptor>) -> TypeDescriptor {
        if map.is_empty() {
            return self.clone();
        }
        match self {
            Self::Named {
                namespace,
                name,
                args,
            } => Self::Named {
                namespace: namespace.clone(),
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(map)).collect(),
            },
            Self::Array(element) => Self::array(element.substitute(map)),
            Self::Param(name) => map.get(name).cloned().unwrap_or_else(|| self.clone()),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { args, .. } => {
                write!(f, "{}", self.full_name())?;
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
            Self::Array(element) => write!(f, "{}[]", element),
            Self::Param(name) => f.write_str(name),
        }
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
