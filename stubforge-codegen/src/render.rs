//! Document model to raw source text.

use stubforge_core::escape_identifier;

use crate::{
    CompilationUnit, MemberDeclaration, MethodDeclaration, NamespaceSection,
    ParameterDeclaration, PropertyDeclaration, Statement, TypeDeclaration,
    builder::{BraceStyle, CodeBuilder, CodeFragment, Indent, Renderable},
};

const HEADER_FENCE: &str =
    "//------------------------------------------------------------------------------";

/// Layout settings of the [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub brace_style: BraceStyle,
    pub blank_line_between_members: bool,
    pub indent: Indent,
    /// Emit the auto-generated header block.
    pub header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            brace_style: BraceStyle::OwnLine,
            blank_line_between_members: true,
            indent: Indent::default(),
            header: true,
        }
    }
}

/// Pretty-prints a [`CompilationUnit`].
///
/// The output is not final: it keeps the header block and may contain
/// redundant blank lines. Run it through [`normalize`](crate::normalize).
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, unit: &CompilationUnit) -> String {
        let mut builder = CodeBuilder::new(self.options.indent);

        if self.options.header {
            for fragment in header() {
                builder.apply_fragment(fragment);
            }
            builder.push_blank();
        }

        let sections = unit
            .sections()
            .iter()
            .map(|section| self.section(section))
            .filter(|fragments| !fragments.is_empty());
        for (i, fragments) in sections.enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment);
            }
        }

        builder.build()
    }

    /// `using` lines followed by the section's types, wrapped in a
    /// `namespace` block when the section is named.
    fn section(&self, section: &NamespaceSection) -> Vec<CodeFragment> {
        let mut fragments = section.imports().to_fragments();
        if section.name().is_empty() && section.types().is_empty() {
            return fragments;
        }
        if !fragments.is_empty() {
            fragments.push(CodeFragment::blank());
        }

        let body = self.types(section.types());
        if section.name().is_empty() {
            fragments.extend(body);
        } else {
            fragments.push(CodeFragment::braced(
                format!("namespace {}", section.name()),
                body,
                self.options.brace_style,
            ));
        }
        fragments
    }

    fn types(&self, types: &[TypeDeclaration]) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                fragments.push(CodeFragment::blank());
            }
            fragments.push(self.type_declaration(ty));
        }
        fragments
    }

    fn type_declaration(&self, ty: &TypeDeclaration) -> CodeFragment {
        let mut header = format!("{} ", ty.access);
        if ty.is_abstract {
            header.push_str("abstract ");
        } else if ty.is_sealed {
            header.push_str("sealed ");
        }
        header.push_str(ty.kind.keyword());
        header.push(' ');
        header.push_str(&ty.name);
        header.push_str(&generics(&ty.generic_params));
        if !ty.base_types.is_empty() {
            let bases: Vec<String> = ty.base_types.iter().map(ToString::to_string).collect();
            header.push_str(" : ");
            header.push_str(&bases.join(", "));
        }

        let mut body = Vec::new();
        for (i, member) in ty.members.iter().enumerate() {
            if i > 0 && self.options.blank_line_between_members {
                body.push(CodeFragment::blank());
            }
            body.push(match member {
                MemberDeclaration::Property(property) => self.property(property),
                MemberDeclaration::Method(method) => self.method(method),
            });
        }

        CodeFragment::braced(header, body, self.options.brace_style)
    }

    fn property(&self, property: &PropertyDeclaration) -> CodeFragment {
        let header = format!(
            "{} {} {}",
            property.attributes.keywords(),
            property.ty,
            escape_identifier(&property.name)
        );
        let accessors = [("get", &property.getter), ("set", &property.setter)]
            .into_iter()
            .filter_map(|(keyword, body)| {
                body.as_ref().map(|body| self.accessor(keyword, body))
            })
            .collect();
        CodeFragment::braced(header, accessors, self.options.brace_style)
    }

    fn accessor(&self, keyword: &str, body: &[Statement]) -> CodeFragment {
        if body.is_empty() {
            return CodeFragment::line(format!("{};", keyword));
        }
        CodeFragment::braced(keyword, statements(body), self.options.brace_style)
    }

    fn method(&self, method: &MethodDeclaration) -> CodeFragment {
        let params: Vec<String> = method.params.iter().map(parameter).collect();
        let signature = format!(
            "{} {} {}{}({})",
            method.attributes.keywords(),
            method.return_type,
            escape_identifier(&method.name),
            generics(&method.generic_params),
            params.join(", ")
        );
        match &method.body {
            Some(body) => CodeFragment::braced(signature, statements(body), self.options.brace_style),
            None => CodeFragment::line(format!("{};", signature)),
        }
    }
}

fn header() -> Vec<CodeFragment> {
    vec![
        CodeFragment::line(HEADER_FENCE),
        CodeFragment::comment("<auto-generated>"),
        CodeFragment::comment(format!(
            "    This code was generated by stubforge {}.",
            env!("CARGO_PKG_VERSION")
        )),
        CodeFragment::comment(""),
        CodeFragment::comment("    Changes to this file may cause incorrect behavior and will be lost if"),
        CodeFragment::comment("    the code is regenerated."),
        CodeFragment::comment("</auto-generated>"),
        CodeFragment::line(HEADER_FENCE),
    ]
}

fn generics(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}

fn parameter(param: &ParameterDeclaration) -> String {
    let name = escape_identifier(&param.name);
    match param.direction.keyword() {
        Some(keyword) => format!("{} {} {}", keyword, param.ty, name),
        None => format!("{} {}", param.ty, name),
    }
}

fn statements(body: &[Statement]) -> Vec<CodeFragment> {
    body.iter().flat_map(Renderable::to_fragments).collect()
}
