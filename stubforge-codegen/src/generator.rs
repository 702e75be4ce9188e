//! One-call stub generation.

use std::path::Path;

use stubforge_core::{File, Overwrite, WriteResult, validate_identifier};
use stubforge_types::{TypeDescriptor, TypeUniverse, builtins};
use tracing::debug;

use crate::{
    CompilationUnit, Error, OverrideSynthesizer, RenderOptions, Renderer, Result,
    TypeDeclaration, TypeResolver, normalize,
};

/// What to generate: a class deriving from `base` and implementing
/// `interfaces`, with an override stub for every abstract member they
/// declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubRequest {
    pub name: String,
    /// Namespace of the generated class; empty for the global namespace.
    pub namespace: String,
    pub base: Option<TypeDescriptor>,
    pub interfaces: Vec<TypeDescriptor>,
    pub fully_qualified: bool,
    pub skip_import: bool,
}

impl StubRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: String::new(),
            base: None,
            interfaces: Vec::new(),
            fully_qualified: false,
            skip_import: false,
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn base(mut self, base: TypeDescriptor) -> Self {
        self.base = Some(base);
        self
    }

    pub fn interface(mut self, interface: TypeDescriptor) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn fully_qualified(mut self, fully_qualified: bool) -> Self {
        self.fully_qualified = fully_qualified;
        self
    }

    pub fn skip_import(mut self, skip_import: bool) -> Self {
        self.skip_import = skip_import;
        self
    }

    /// Descriptor of the class being generated.
    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::named(self.namespace.clone(), self.name.clone())
    }

    fn validate(&self) -> Result<()> {
        if let Some(reason) = validate_identifier(&self.name) {
            return Err(Error::InvalidName {
                name: self.name.clone(),
                context: "class",
                reason,
            });
        }
        if self.namespace.is_empty() {
            return Ok(());
        }
        for segment in self.namespace.split('.') {
            if let Some(reason) = validate_identifier(segment) {
                return Err(Error::InvalidName {
                    name: self.namespace.clone(),
                    context: "namespace",
                    reason,
                });
            }
        }
        Ok(())
    }
}

/// Builds, renders and normalizes stub classes against a type universe.
pub struct Generator<'a> {
    universe: &'a TypeUniverse,
    options: RenderOptions,
}

impl<'a> Generator<'a> {
    pub fn new(universe: &'a TypeUniverse, options: RenderOptions) -> Self {
        Self { universe, options }
    }

    /// Build the compilation unit for `request`.
    pub fn synthesize(&self, request: &StubRequest) -> Result<CompilationUnit> {
        request.validate()?;

        let related = request.descriptor();
        let (mut unit, imports_id, declarations_id) = CompilationUnit::new(Some(&related));
        let imports = unit.section_mut(imports_id).imports_mut();
        let resolver = TypeResolver::new(self.universe);

        let mut target = TypeDeclaration::class(&request.name);
        let implemented: Vec<&TypeDescriptor> =
            request.base.iter().chain(&request.interfaces).collect();

        for ty in &implemented {
            if ty.full_name() == builtins::OBJECT {
                continue;
            }
            let reference = resolver.resolve(
                ty,
                imports,
                &request.namespace,
                request.fully_qualified,
                request.skip_import,
            )?;
            target = target.base(reference);
        }

        let mut synthesizer = OverrideSynthesizer::new(self.universe);
        if request.fully_qualified {
            synthesizer = synthesizer.fully_qualified();
        }
        if request.skip_import {
            synthesizer = synthesizer.skip_import();
        }
        for ty in &implemented {
            let added = synthesizer.synthesize(&mut target, ty, imports, &request.namespace)?;
            debug!(base = %ty, added, "synthesized overrides");
        }

        unit.section_mut(declarations_id).push_type(target);
        Ok(unit)
    }

    /// Generate the final source text for `request`.
    pub fn generate(&self, request: &StubRequest) -> Result<String> {
        let unit = self.synthesize(request)?;
        let raw = Renderer::new(self.options).render(&unit);
        Ok(normalize(&raw))
    }

    /// Generate `request` into a file, honoring `overwrite`.
    pub fn generate_to_file(
        &self,
        request: &StubRequest,
        path: impl AsRef<Path>,
        overwrite: Overwrite,
    ) -> Result<WriteResult> {
        let path = path.as_ref();
        let content = self.generate(request)?;
        let result = File::new(path, content)
            .overwrite(overwrite)
            .write()
            .map_err(|report| Error::Io {
                path: path.to_path_buf(),
                source: report.into(),
            })?;
        debug!(path = %path.display(), ?result, "stub file handled");
        Ok(result)
    }
}
