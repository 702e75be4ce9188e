use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for catalog operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "stubforge.toml");
/// ctx.validation_error_at("abstract member on a concrete class", span);
/// ctx.reserved_keyword_error("class", "type", span);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error pointing at an optional span.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn reserved_keyword_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    pub fn invalid_type_error(
        &self,
        expr: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidTypeExpression {
            src: self.named_source(),
            span,
            expr: expr.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    pub fn invalid_access_error(
        &self,
        value: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidAccess {
            src: self.named_source(),
            span,
            value: value.into(),
            context: context.into(),
        })
    }

    pub fn duplicate_member_error(
        &self,
        name: impl Into<String>,
        owner: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateMember {
            src: self.named_source(),
            span,
            name: name.into(),
            owner: owner.into(),
        })
    }

    /// Wrap a universe error, pointing at the type it names.
    pub fn universe_error(
        &self,
        source: stubforge_types::Error,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Universe {
            src: self.named_source(),
            span,
            source,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(stubforge::io),
        help("pass the catalog explicitly with --catalog <path>")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse type catalog")]
    #[diagnostic(code(stubforge::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(stubforge::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{name}' is a reserved keyword")]
    #[diagnostic(
        code(stubforge::reserved_keyword),
        help("prefix it with '@' (e.g. '@{name}') or rename the {context}")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved keyword used here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(stubforge::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("invalid type '{expr}' in {context}")]
    #[diagnostic(
        code(stubforge::invalid_type),
        help("{reason}. Types look like 'int', 'Demo.Shape', 'List<string>' or 'T[]'.")
    )]
    InvalidTypeExpression {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid type")]
        span: Option<SourceSpan>,
        expr: String,
        context: String,
        reason: String,
    },

    #[error("unknown access level '{value}' in {context}")]
    #[diagnostic(
        code(stubforge::invalid_access),
        help(
            "valid access levels are: public, protected, internal, protected-internal, private-protected, private"
        )
    )]
    InvalidAccess {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown access level")]
        span: Option<SourceSpan>,
        value: String,
        context: String,
    },

    #[error("'{name}' is declared more than once on '{owner}'")]
    #[diagnostic(
        code(stubforge::duplicate_member),
        help("rename one of the members or give the methods different parameter lists")
    )]
    DuplicateMember {
        #[source_code]
        src: NamedSource<String>,
        #[label("duplicate declaration")]
        span: Option<SourceSpan>,
        name: String,
        owner: String,
    },

    #[error("{source}")]
    #[diagnostic(code(stubforge::type_universe))]
    Universe {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        #[source]
        source: stubforge_types::Error,
    },
}
