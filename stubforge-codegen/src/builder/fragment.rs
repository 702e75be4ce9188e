//! Renderable trait and CodeFragment for decoupled code generation.
//!
//! Document-model nodes turn themselves into fragments; the
//! [`CodeBuilder`](super::CodeBuilder) turns fragments into text.

/// Represents a fragment of generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// Indent the contained fragments.
    Indent(Vec<CodeFragment>),
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
    /// A `//` line comment.
    Comment(String),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn blank() -> Self {
        Self::Blank
    }

    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// A `{ ... }` block laid out according to `style`.
    ///
    /// ```
    /// use stubforge_codegen::builder::{BraceStyle, CodeBuilder, CodeFragment, Indent};
    ///
    /// let block = CodeFragment::braced(
    ///     "namespace Demo",
    ///     vec![CodeFragment::line("class A {}")],
    ///     BraceStyle::OwnLine,
    /// );
    /// let mut builder = CodeBuilder::new(Indent::Spaces(4));
    /// builder.apply_fragment(block);
    /// assert_eq!(builder.build(), "namespace Demo\n{\n    class A {}\n}\n");
    /// ```
    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>, style: BraceStyle) -> Self {
        let header = header.into();
        match style {
            BraceStyle::OwnLine => Self::Sequence(vec![
                Self::Line(header),
                Self::block("{", body, Some("}".to_string())),
            ]),
            BraceStyle::SameLine => Self::block(format!("{} {{", header), body, Some("}".to_string())),
        }
    }

    pub fn indent(fragments: Vec<CodeFragment>) -> Self {
        Self::Indent(fragments)
    }

    pub fn sequence(fragments: Vec<CodeFragment>) -> Self {
        Self::Sequence(fragments)
    }

    pub fn comment(s: impl Into<String>) -> Self {
        Self::Comment(s.into())
    }
}

/// Where the opening brace of a block goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BraceStyle {
    /// Opening brace on its own line.
    #[default]
    OwnLine,
    /// Opening brace at the end of the header line.
    SameLine,
}

/// Trait for types that can be rendered to code fragments.
pub trait Renderable {
    /// Convert this node to a sequence of code fragments.
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

/// Blanket implementation for references.
impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}
