use stubforge_types::TypeDescriptor;

use super::{ImportSection, TypeDeclaration};

/// Handle to a [`NamespaceSection`] of a [`CompilationUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(usize);

/// One namespace of a compilation unit.
///
/// The unnamed section renders at file scope; a named one renders as a
/// `namespace` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceSection {
    name: String,
    imports: ImportSection,
    types: Vec<TypeDeclaration>,
}

impl NamespaceSection {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Namespace name; empty for file scope.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn imports(&self) -> &ImportSection {
        &self.imports
    }

    pub fn imports_mut(&mut self) -> &mut ImportSection {
        &mut self.imports
    }

    pub fn types(&self) -> &[TypeDeclaration] {
        &self.types
    }

    pub fn push_type(&mut self, declaration: TypeDeclaration) {
        self.types.push(declaration);
    }
}

/// The document model of one generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    sections: Vec<NamespaceSection>,
}

impl CompilationUnit {
    /// Create a unit, returning the ids of its imports section and of the
    /// section declarations go into.
    ///
    /// Imports always live in the first, unnamed section. When `related`
    /// has a namespace, declarations get a second section named after it;
    /// otherwise both ids address the unnamed section.
    ///
    /// ```
    /// use stubforge_codegen::CompilationUnit;
    /// use stubforge_types::TypeDescriptor;
    ///
    /// let circle = TypeDescriptor::named("Demo.Shapes", "Circle");
    /// let (unit, imports, declarations) = CompilationUnit::new(Some(&circle));
    /// assert_ne!(imports, declarations);
    /// assert_eq!(unit.section(declarations).name(), "Demo.Shapes");
    /// ```
    pub fn new(related: Option<&TypeDescriptor>) -> (Self, SectionId, SectionId) {
        let mut sections = vec![NamespaceSection::new("")];
        let imports = SectionId(0);

        let namespace = related.map(TypeDescriptor::namespace).unwrap_or_default();
        let declarations = if namespace.trim().is_empty() {
            imports
        } else {
            sections.push(NamespaceSection::new(namespace));
            SectionId(1)
        };

        (Self { sections }, imports, declarations)
    }

    pub fn section(&self, id: SectionId) -> &NamespaceSection {
        &self.sections[id.0]
    }

    pub fn section_mut(&mut self, id: SectionId) -> &mut NamespaceSection {
        &mut self.sections[id.0]
    }

    /// Sections in render order.
    pub fn sections(&self) -> &[NamespaceSection] {
        &self.sections
    }

    /// Every type declared in the unit.
    pub fn types(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.sections.iter().flat_map(|s| s.types.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_without_related_type() {
        let (unit, imports, declarations) = CompilationUnit::new(None);
        assert_eq!(imports, declarations);
        assert_eq!(unit.sections().len(), 1);
        assert_eq!(unit.section(imports).name(), "");
    }

    #[test]
    fn test_unit_with_global_related_type() {
        let ty = TypeDescriptor::named("", "Circle");
        let (unit, imports, declarations) = CompilationUnit::new(Some(&ty));
        assert_eq!(imports, declarations);
        assert_eq!(unit.sections().len(), 1);
    }

    #[test]
    fn test_unit_with_namespaced_related_type() {
        let ty = TypeDescriptor::named("Demo.Shapes", "Circle");
        let (mut unit, imports, declarations) = CompilationUnit::new(Some(&ty));
        assert_ne!(imports, declarations);

        unit.section_mut(imports)
            .imports_mut()
            .ensure_imported("System", "Demo.Shapes");
        unit.section_mut(declarations)
            .push_type(TypeDeclaration::class("Circle"));

        assert_eq!(unit.section(imports).name(), "");
        assert_eq!(unit.section(imports).imports().len(), 1);
        assert!(unit.section(declarations).imports().is_empty());
        assert_eq!(unit.types().count(), 1);
    }
}
