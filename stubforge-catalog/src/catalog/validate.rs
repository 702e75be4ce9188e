//! Validation context and utilities for catalog parsing.

use std::sync::Arc;

use miette::SourceSpan;
use stubforge_core::{is_keyword, validate_identifier};
use stubforge_types::{Access, TypeDescriptor};

use crate::{
    Result,
    error::SourceContext,
    type_expr::{TypeExpr, TypeScope},
};

/// Parsing and validation context that carries source information.
///
/// Holds the shared source plus the current path through the catalog
/// (`Demo.Shape`, `Demo.Shape.Compute`), so errors can say where they
/// happened.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "stubforge.toml");
/// let ty = ctx.push("Demo.Shape");
/// ty.validate_name("Compute", "method")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "parameter in 'Demo.Shape.Compute'" or just "type".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Validate that a name is a usable identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }

    /// Validate every segment of a dotted type name.
    pub fn validate_type_name(&self, full_name: &str) -> Result<()> {
        let span = self.find_span(full_name);
        for segment in full_name.split('.') {
            if is_keyword(segment) {
                return Err(self.source.reserved_keyword_error(
                    segment,
                    self.context_for("type"),
                    span,
                ));
            }
            if let Some(reason) = validate_identifier(segment) {
                return Err(self.source.invalid_identifier_error(
                    full_name,
                    self.context_for("type"),
                    reason,
                    span,
                ));
            }
        }
        Ok(())
    }

    /// Parse and resolve a type expression.
    pub fn resolve_type(
        &self,
        expr: &str,
        kind: &str,
        scope: &TypeScope<'_>,
    ) -> Result<TypeDescriptor> {
        expr.parse::<TypeExpr>()
            .and_then(|parsed| parsed.resolve(scope))
            .map_err(|err| {
                let span = self
                    .find_span(expr)
                    .map(|span| SourceSpan::from((span.offset() + err.offset, 1)));
                self.source
                    .invalid_type_error(expr, self.context_for(kind), err.reason, span)
            })
    }

    /// Parse an access level, defaulting to public.
    pub fn parse_access(&self, value: Option<&str>, kind: &str) -> Result<Access> {
        let Some(value) = value else {
            return Ok(Access::Public);
        };
        value.parse().map_err(|_| {
            self.source
                .invalid_access_error(value, self.context_for(kind), self.find_span(value))
        })
    }

    /// A validation error pointing at `needle`, if it can be found.
    pub fn error_at(&self, message: impl Into<String>, needle: &str) -> Box<crate::Error> {
        self.source
            .validation_error_at(message, self.find_span(needle))
    }
}

/// Find the span of a name or value in the TOML source.
///
/// Searches for the quoted form first (`"Demo.Shape"`, `'x'`), then for bare
/// keys in table headers (`[types.Shape]`, `[types.Shape.properties]`).
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }

    for quote in ['"', '\''] {
        let pattern = format!("{quote}{name}{quote}");
        if let Some(pos) = src.find(&pattern) {
            // +1 to skip the opening quote
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    let patterns = [format!(".{}]", name), format!(".{}.", name)];
    for pattern in &patterns {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    // No fallback - better to have no span than point to wrong location
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_name_span_quoted() {
        let src = "[types.\"Demo.Shape\"]\nkind = \"class\"\n";
        let span = find_name_span(src, "Demo.Shape").unwrap();
        assert_eq!(span.offset(), 8);
        assert_eq!(span.len(), "Demo.Shape".len());
    }

    #[test]
    fn test_find_name_span_bare_key() {
        let src = "[types.Shape]\n";
        let span = find_name_span(src, "Shape").unwrap();
        assert_eq!(span.offset(), 7);
    }

    #[test]
    fn test_find_name_span_missing() {
        assert!(find_name_span("[render]\n", "Shape").is_none());
        assert!(find_name_span("[render]\n", "").is_none());
    }

    #[test]
    fn test_context_for_nested_path() {
        let ctx = ParseContext::new("", "stubforge.toml");
        assert_eq!(ctx.context_for("type"), "type");
        let nested = ctx.push("Demo.Shape").push("Compute");
        assert_eq!(nested.context_for("parameter"), "parameter in 'Demo.Shape.Compute'");
    }

    #[test]
    fn test_validate_name() {
        let ctx = ParseContext::new("name = \"class\"", "stubforge.toml");
        assert!(ctx.validate_name("Compute", "method").is_ok());
        assert!(ctx.validate_name("@class", "method").is_ok());

        let err = ctx.validate_name("class", "method").unwrap_err();
        assert!(matches!(*err, crate::Error::ReservedKeyword { .. }));

        let err = ctx.validate_name("has space", "method").unwrap_err();
        assert!(matches!(*err, crate::Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_parse_access() {
        let ctx = ParseContext::new("access = \"friend\"", "stubforge.toml");
        assert_eq!(ctx.parse_access(None, "method").unwrap(), Access::Public);
        assert_eq!(
            ctx.parse_access(Some("protected"), "method").unwrap(),
            Access::Protected
        );
        let err = ctx.parse_access(Some("friend"), "method").unwrap_err();
        assert!(matches!(*err, crate::Error::InvalidAccess { .. }));
    }
}
