//! Indentation-aware text buffer.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates source lines at a tracked indentation depth.
///
/// Fragments produced by [`Renderable`] nodes are applied recursively;
/// blank lines never carry indentation.
///
/// ```
/// use stubforge_codegen::builder::{CodeBuilder, Indent};
///
/// let mut builder = CodeBuilder::new(Indent::Tab);
/// builder
///     .push_line("get")
///     .push_line("{")
///     .push_indent()
///     .push_line("return 1;")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(builder.build(), "get\n{\n\treturn 1;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    depth: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            depth: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Append `s` at the current depth.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        for _ in 0..self.depth {
            self.buffer.push_str(self.indent.as_str());
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Append a `//` comment; an empty text gives a bare `//`.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            self.push_line("//")
        } else {
            self.push_line(&format!("// {}", text))
        }
    }

    /// Append every fragment of `node`.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Comment(text) => {
                self.push_comment(&text);
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.apply_indented(body);
                if let Some(close) = close {
                    self.push_line(&close);
                }
            }
            CodeFragment::Indent(fragments) => self.apply_indented(fragments),
            CodeFragment::Sequence(fragments) => {
                fragments.into_iter().for_each(|f| self.apply_fragment(f));
            }
        }
    }

    fn apply_indented(&mut self, fragments: Vec<CodeFragment>) {
        self.push_indent();
        fragments.into_iter().for_each(|f| self.apply_fragment(f));
        self.push_dedent();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn build(self) -> String {
        self.buffer
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_has_no_indent() {
        let mut builder = CodeBuilder::default();
        builder
            .push_indent()
            .push_line("using System;")
            .push_blank()
            .push_line("class A {}");
        assert_eq!(builder.build(), "    using System;\n\n    class A {}\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::new(Indent::Spaces(2));
        builder.push_dedent().push_line("class A {}");
        assert_eq!(builder.as_str(), "class A {}\n");
    }

    #[test]
    fn test_comment_fragment() {
        let mut builder = CodeBuilder::default();
        builder.apply_fragment(CodeFragment::comment("generated"));
        builder.apply_fragment(CodeFragment::comment(""));
        assert_eq!(builder.build(), "// generated\n//\n");
    }

    #[test]
    fn test_emit_block_fragment() {
        struct Run;
        impl Renderable for Run {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![CodeFragment::block(
                    "void Run() {",
                    vec![CodeFragment::line("return;")],
                    Some("}".to_string()),
                )]
            }
        }

        let mut builder = CodeBuilder::default();
        builder.emit(&Run);
        assert_eq!(builder.build(), "void Run() {\n    return;\n}\n");
    }

    #[test]
    fn test_nested_indent_fragment() {
        let mut builder = CodeBuilder::new(Indent::Tab);
        builder.apply_fragment(CodeFragment::sequence(vec![
            CodeFragment::line("a"),
            CodeFragment::indent(vec![
                CodeFragment::line("b"),
                CodeFragment::blank(),
                CodeFragment::line("c"),
            ]),
        ]));
        assert_eq!(builder.as_str(), "a\n\tb\n\n\tc\n");
    }
}
