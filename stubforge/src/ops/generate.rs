//! Generate operation - stub synthesis from a catalog.

use std::path::Path;

use eyre::{Context, Result};
use stubforge_catalog::{BraceStyleSetting, Catalog, IndentSetting, RenderSettings};
use stubforge_codegen::{
    Generator, RenderOptions, StubRequest,
    builder::{BraceStyle, Indent},
};
use stubforge_core::{Overwrite, WriteResult};

use super::parse_type;
use crate::reports::{GenerateOutcome, GenerateReport};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Name of the generated class.
    pub name: &'a str,
    /// Namespace of the generated class; also where unqualified type names
    /// are looked up.
    pub namespace: &'a str,
    pub base: Option<&'a str>,
    pub interfaces: &'a [String],
    /// Target file. Without one the source is only previewed.
    pub output: Option<&'a Path>,
    /// Overwrite an existing target file.
    pub force: bool,
    pub fully_qualified: bool,
    pub skip_imports: bool,
    pub dry_run: bool,
}

/// Catalog render settings as codegen options.
pub fn render_options(settings: &RenderSettings) -> RenderOptions {
    RenderOptions {
        brace_style: match settings.brace_style {
            BraceStyleSetting::OwnLine => BraceStyle::OwnLine,
            BraceStyleSetting::SameLine => BraceStyle::SameLine,
        },
        blank_line_between_members: settings.blank_line_between_members,
        indent: match settings.indent {
            IndentSetting::Spaces(width) => Indent::Spaces(width),
            IndentSetting::Tab => Indent::Tab,
        },
        ..RenderOptions::default()
    }
}

/// Execute the generate operation.
pub fn generate(catalog: &Catalog, opts: GenerateOptions) -> Result<GenerateReport> {
    let mut request = StubRequest::new(opts.name)
        .namespace(opts.namespace)
        .fully_qualified(opts.fully_qualified)
        .skip_import(opts.skip_imports);
    if let Some(base) = opts.base {
        request = request.base(parse_type(catalog, base, opts.namespace)?);
    }
    for interface in opts.interfaces {
        request = request.interface(parse_type(catalog, interface, opts.namespace)?);
    }

    let generator = Generator::new(catalog.universe(), render_options(catalog.render()));
    let outcome = match opts.output {
        Some(path) if !opts.dry_run => {
            let overwrite = if opts.force {
                Overwrite::Always
            } else {
                Overwrite::IfMissing
            };
            match generator
                .generate_to_file(&request, path, overwrite)
                .wrap_err("Failed to generate stub")?
            {
                WriteResult::Written => GenerateOutcome::Written(path.to_path_buf()),
                WriteResult::Skipped => GenerateOutcome::Skipped(path.to_path_buf()),
            }
        }
        path => GenerateOutcome::Preview {
            path: path.map(Path::to_path_buf),
            content: generator
                .generate(&request)
                .wrap_err("Failed to generate stub")?,
        },
    };

    Ok(GenerateReport {
        class_name: request.descriptor().full_name(),
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::ops::fixtures;

    fn options<'a>(output: Option<&'a Path>) -> GenerateOptions<'a> {
        GenerateOptions {
            name: "Circle",
            namespace: "Demo.Shapes",
            base: Some("Shape"),
            interfaces: &[],
            output,
            force: false,
            fully_qualified: false,
            skip_imports: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_render_options_follow_catalog() {
        let settings = RenderSettings {
            indent: IndentSetting::Tab,
            brace_style: BraceStyleSetting::SameLine,
            blank_line_between_members: false,
        };
        let options = render_options(&settings);
        assert_eq!(options.indent, Indent::Tab);
        assert_eq!(options.brace_style, BraceStyle::SameLine);
        assert!(!options.blank_line_between_members);
        assert!(options.header);
    }

    #[test]
    fn test_preview_without_output() {
        let report = generate(&fixtures::catalog(), options(None)).unwrap();
        assert_eq!(report.class_name, "Demo.Shapes.Circle");
        let GenerateOutcome::Preview { path, content } = report.outcome else {
            panic!("expected a preview");
        };
        assert!(path.is_none());
        assert!(content.contains("public override string Name"));
        assert!(content.contains("protected override void Compute(int x, out int y)"));
        assert!(!content.contains("Describe"));
    }

    #[test]
    fn test_write_then_skip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("Circle.cs");
        let catalog = fixtures::catalog();

        let report = generate(&catalog, options(Some(&path))).unwrap();
        assert!(matches!(report.outcome, GenerateOutcome::Written(_)));

        let report = generate(&catalog, options(Some(&path))).unwrap();
        assert!(matches!(report.outcome, GenerateOutcome::Skipped(_)));

        let forced = GenerateOptions {
            force: true,
            ..options(Some(&path))
        };
        let report = generate(&catalog, forced).unwrap();
        assert!(matches!(report.outcome, GenerateOutcome::Written(_)));
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("Circle.cs");
        let dry_run = GenerateOptions {
            dry_run: true,
            ..options(Some(&path))
        };
        let report = generate(&fixtures::catalog(), dry_run).unwrap();
        assert!(matches!(
            report.outcome,
            GenerateOutcome::Preview { path: Some(_), .. }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_base_expression() {
        let bad = GenerateOptions {
            base: Some("Shape<"),
            ..options(None)
        };
        let err = generate(&fixtures::catalog(), bad).unwrap_err();
        assert!(err.to_string().contains("invalid type 'Shape<'"));
    }
}
