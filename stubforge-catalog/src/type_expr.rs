//! Type expressions as written in catalog entries.
//!
//! ```text
//! type  := path args? "[]"*
//! path  := ident ("." ident)*
//! args  := "<" type ("," type)* ">"
//! ```
//!
//! Parsing is purely syntactic; [`TypeExpr::resolve`] turns the result into
//! a [`TypeDescriptor`] against a [`TypeScope`].

use std::{collections::HashMap, fmt, str::FromStr};

use stubforge_types::{TypeDescriptor, builtins};

/// A parsed, unresolved type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub path: Vec<String>,
    pub args: Vec<TypeExpr>,
    pub array_depth: usize,
}

/// Why a type expression was rejected, with the byte offset of the problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExprError {
    pub offset: usize,
    pub reason: String,
}

impl TypeExprError {
    fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            offset,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TypeExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.reason, self.offset)
    }
}

impl std::error::Error for TypeExprError {}

impl FromStr for TypeExpr {
    type Err = TypeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { src: s, pos: 0 };
        let expr = parser.expr()?;
        parser.skip_ws();
        match parser.peek() {
            None => Ok(expr),
            Some(c) => Err(TypeExprError::new(
                parser.pos,
                format!("unexpected '{}'", c),
            )),
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expr(&mut self) -> Result<TypeExpr, TypeExprError> {
        self.skip_ws();
        let mut path = vec![self.ident()?];
        while self.peek() == Some('.') {
            self.bump();
            path.push(self.ident()?);
        }

        self.skip_ws();
        let mut args = Vec::new();
        if self.peek() == Some('<') {
            self.bump();
            loop {
                args.push(self.expr()?);
                self.skip_ws();
                match self.peek() {
                    Some(',') => self.bump(),
                    Some('>') => {
                        self.bump();
                        break;
                    }
                    Some(c) => {
                        return Err(TypeExprError::new(
                            self.pos,
                            format!("expected ',' or '>', found '{}'", c),
                        ));
                    }
                    None => return Err(TypeExprError::new(self.pos, "unclosed '<'")),
                }
            }
        }

        let mut array_depth = 0;
        loop {
            self.skip_ws();
            if self.peek() != Some('[') {
                break;
            }
            self.bump();
            self.skip_ws();
            if self.peek() != Some(']') {
                return Err(TypeExprError::new(
                    self.pos,
                    "only single-dimensional arrays ('[]') are supported",
                ));
            }
            self.bump();
            array_depth += 1;
        }

        Ok(TypeExpr {
            path,
            args,
            array_depth,
        })
    }

    fn ident(&mut self) -> Result<String, TypeExprError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' => self.bump(),
            Some(c) => {
                return Err(TypeExprError::new(
                    start,
                    format!("expected a type name, found '{}'", c),
                ));
            }
            None => return Err(TypeExprError::new(start, "expected a type name")),
        }
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        Ok(self.src[start..self.pos].to_string())
    }
}

/// Names visible while resolving a type expression.
#[derive(Debug, Clone)]
pub struct TypeScope<'a> {
    /// Namespace of the declaring type; unqualified names are looked up here
    /// first, then in `System`.
    pub namespace: &'a str,
    /// Generic parameters in scope (type parameters, then method parameters).
    pub params: Vec<&'a str>,
    /// Generic arity of every known type, by full name.
    pub known: &'a HashMap<String, usize>,
}

impl<'a> TypeScope<'a> {
    pub fn new(namespace: &'a str, known: &'a HashMap<String, usize>) -> Self {
        Self {
            namespace,
            params: Vec::new(),
            known,
        }
    }

    pub fn with_params(mut self, params: impl IntoIterator<Item = &'a str>) -> Self {
        self.params.extend(params);
        self
    }

    fn qualify(&self, name: &str) -> (String, String) {
        let candidates = [self.namespace, "System"];
        for namespace in candidates {
            let full = if namespace.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", namespace, name)
            };
            if self.known.contains_key(&full) {
                return (namespace.to_string(), name.to_string());
            }
        }
        tracing::trace!(name, "unqualified type not in catalog; using global namespace");
        (String::new(), name.to_string())
    }
}

impl TypeExpr {
    /// Dotted name as written, without arguments or array suffixes.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Resolve against `scope`.
    ///
    /// Offsets in errors are relative to `self`'s own rendering, so callers
    /// report them against the whole expression.
    pub fn resolve(&self, scope: &TypeScope<'_>) -> Result<TypeDescriptor, TypeExprError> {
        let base = self.resolve_named(scope)?;
        Ok((0..self.array_depth).fold(base, |ty, _| TypeDescriptor::array(ty)))
    }

    fn resolve_named(&self, scope: &TypeScope<'_>) -> Result<TypeDescriptor, TypeExprError> {
        if let [single] = self.path.as_slice() {
            if self.args.is_empty() {
                if let Some(keyword) = builtins::from_keyword(single) {
                    return Ok(keyword);
                }
                if scope.params.contains(&single.as_str()) {
                    return Ok(TypeDescriptor::param(single.clone()));
                }
            } else if scope.params.contains(&single.as_str()) {
                return Err(TypeExprError::new(
                    0,
                    format!("generic parameter '{}' cannot take type arguments", single),
                ));
            }
        }

        let (namespace, name) = match self.path.split_last() {
            Some((name, [])) => scope.qualify(name),
            Some((name, namespace)) => (namespace.join("."), name.clone()),
            None => return Err(TypeExprError::new(0, "expected a type name")),
        };

        let full_name = if namespace.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", namespace, name)
        };
        if let Some(&arity) = scope.known.get(&full_name)
            && arity != self.args.len()
        {
            return Err(TypeExprError::new(
                0,
                format!(
                    "'{}' takes {} type argument(s) but {} were given",
                    full_name,
                    arity,
                    self.args.len()
                ),
            ));
        }

        let args = self
            .args
            .iter()
            .map(|arg| arg.resolve(scope))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypeDescriptor::generic(namespace, name, args))
    }
}
