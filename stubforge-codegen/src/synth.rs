//! Override stubs for abstract members.

use stubforge_types::{
    Access, DeclaredMember, MemberDef, MemberFilter, MethodDef, ParameterDef, PropertyDef,
    TypeDescriptor, TypeUniverse, builtins,
};
use tracing::debug;

use crate::{
    Direction, ImportSection, MemberAttributes, MemberDeclaration, MethodDeclaration,
    ParameterDeclaration, PropertyDeclaration, Result, Statement, TypeDeclaration, TypeReference,
    TypeResolver,
};

/// Visibility candidates, most visible first.
const VISIBILITY_ORDER: [Access; 4] = [
    Access::Public,
    Access::Protected,
    Access::PrivateProtected,
    Access::ProtectedInternal,
];

/// Add an override stub to `target` for every abstract member of `base`.
///
/// Returns the number of members added. Equivalent to
/// [`OverrideSynthesizer`] without fully-qualified names.
pub fn synthesize_overrides(
    universe: &TypeUniverse,
    target: &mut TypeDeclaration,
    base: &TypeDescriptor,
    imports: &mut ImportSection,
    declaration_namespace: &str,
    skip_import: bool,
) -> Result<usize> {
    let mut synthesizer = OverrideSynthesizer::new(universe);
    if skip_import {
        synthesizer = synthesizer.skip_import();
    }
    synthesizer.synthesize(target, base, imports, declaration_namespace)
}

/// Generates members that satisfy the abstract members of a base type.
///
/// Properties qualify when every accessor they declare is abstract, methods
/// when they are abstract. Interface members are always abstract and
/// public. Each stub body throws `NotImplementedException`.
///
/// A resolution failure aborts the whole call: neither `target` nor
/// `imports` is modified.
#[derive(Debug, Clone, Copy)]
pub struct OverrideSynthesizer<'a> {
    universe: &'a TypeUniverse,
    fully_qualified: bool,
    skip_import: bool,
}

impl<'a> OverrideSynthesizer<'a> {
    pub fn new(universe: &'a TypeUniverse) -> Self {
        Self {
            universe,
            fully_qualified: false,
            skip_import: false,
        }
    }

    /// Resolve types without touching the import section.
    pub fn skip_import(mut self) -> Self {
        self.skip_import = true;
        self
    }

    /// Spell every type with its namespace.
    pub fn fully_qualified(mut self) -> Self {
        self.fully_qualified = true;
        self
    }

    pub fn synthesize(
        &self,
        target: &mut TypeDeclaration,
        base: &TypeDescriptor,
        imports: &mut ImportSection,
        declaration_namespace: &str,
    ) -> Result<usize> {
        let candidates: Vec<DeclaredMember> = self
            .universe
            .members(base, MemberFilter::INSTANCE)
            .filter(|m| m.member.is_abstract())
            .collect();
        if candidates.is_empty() {
            debug!(base = %base, "no abstract members to override");
            return Ok(0);
        }

        let from_interface = self.universe.is_interface(base);
        let mut scratch = imports.clone();
        let mut context = Context {
            resolver: TypeResolver::new(self.universe),
            imports: &mut scratch,
            declaration_namespace,
            fully_qualified: self.fully_qualified,
            skip_import: self.skip_import,
        };

        let exception = context.resolve(&TypeDescriptor::from_full_name(
            builtins::NOT_IMPLEMENTED_EXCEPTION,
        ))?;

        let mut staged: Vec<MemberDeclaration> = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let member = match &candidate.member {
                MemberDef::Property(property) => {
                    context.property(property, from_interface, &exception)?.into()
                }
                MemberDef::Method(method) => {
                    context.method(method, from_interface, &exception)?.into()
                }
            };
            if target.declares(&member) || staged.iter().any(|s| s.conflicts_with(&member)) {
                debug!(member = member.name(), "already declared; skipping");
                continue;
            }
            debug!(
                member = member.name(),
                declaring_type = %candidate.declaring_type,
                "synthesized override"
            );
            staged.push(member);
        }

        let added = staged.len();
        target.members.extend(staged);
        *imports = scratch;
        Ok(added)
    }
}

struct Context<'a, 'b> {
    resolver: TypeResolver<'a>,
    imports: &'b mut ImportSection,
    declaration_namespace: &'b str,
    fully_qualified: bool,
    skip_import: bool,
}

impl Context<'_, '_> {
    fn resolve(&mut self, ty: &TypeDescriptor) -> Result<TypeReference> {
        self.resolver.resolve(
            ty,
            self.imports,
            self.declaration_namespace,
            self.fully_qualified,
            self.skip_import,
        )
    }

    fn property(
        &mut self,
        property: &PropertyDef,
        from_interface: bool,
        exception: &TypeReference,
    ) -> Result<PropertyDeclaration> {
        let ty = self.resolve(&property.ty)?;
        let attributes = member_attributes(from_interface, property.accessors().map(|a| a.access));
        let body = || vec![Statement::ThrowNotImplemented(exception.clone())];

        let mut declaration = PropertyDeclaration::new(&property.name, ty).attributes(attributes);
        if property.getter.is_some() {
            declaration = declaration.getter(body());
        }
        if property.setter.is_some() {
            declaration = declaration.setter(body());
        }
        Ok(declaration)
    }

    fn method(
        &mut self,
        method: &MethodDef,
        from_interface: bool,
        exception: &TypeReference,
    ) -> Result<MethodDeclaration> {
        let return_type = self.resolve(&method.return_type)?;
        let attributes = member_attributes(from_interface, [method.access]);

        let mut declaration = MethodDeclaration::new(&method.name, return_type)
            .attributes(attributes)
            .body(vec![Statement::ThrowNotImplemented(exception.clone())]);
        for generic in &method.generic_params {
            declaration = declaration.generic(generic);
        }
        for param in &method.params {
            let ty = self.resolve(&param.ty)?;
            declaration = declaration
                .param(ParameterDeclaration::new(&param.name, ty).direction(direction(param)));
        }
        Ok(declaration)
    }
}

fn member_attributes(
    from_interface: bool,
    declared: impl IntoIterator<Item = Access>,
) -> MemberAttributes {
    if from_interface {
        MemberAttributes::public_final()
    } else {
        MemberAttributes::overriding(visibility(declared))
    }
}

/// First access of [`VISIBILITY_ORDER`] among `declared`, `internal` when
/// none matches.
fn visibility(declared: impl IntoIterator<Item = Access>) -> Access {
    let declared: Vec<Access> = declared.into_iter().collect();
    VISIBILITY_ORDER
        .into_iter()
        .find(|access| declared.contains(access))
        .unwrap_or(Access::Internal)
}

fn direction(param: &ParameterDef) -> Direction {
    match (param.by_ref, param.is_in, param.is_out) {
        (false, ..) => Direction::ByValue,
        (true, true, _) => Direction::In,
        (true, _, true) => Direction::Out,
        (true, false, false) => Direction::ByRef,
    }
}

#[cfg(test)]
mod tests {
    use stubforge_types::{AccessorDef, TypeDef};

    use super::*;
    use crate::Error;

    fn int() -> TypeDescriptor {
        TypeDescriptor::named("System", "Int32")
    }

    fn void() -> TypeDescriptor {
        TypeDescriptor::named("System", "Void")
    }

    fn run(universe: &TypeUniverse, base: &TypeDescriptor) -> (TypeDeclaration, ImportSection, usize) {
        let mut target = TypeDeclaration::class("Stub");
        let mut imports = ImportSection::new();
        let added =
            synthesize_overrides(universe, &mut target, base, &mut imports, "Demo.App", false)
                .unwrap();
        (target, imports, added)
    }

    #[test]
    fn test_visibility_order() {
        assert_eq!(visibility([Access::Protected, Access::Public]), Access::Public);
        assert_eq!(
            visibility([Access::ProtectedInternal, Access::PrivateProtected]),
            Access::PrivateProtected
        );
        assert_eq!(visibility([Access::ProtectedInternal]), Access::ProtectedInternal);
        assert_eq!(visibility([Access::Internal]), Access::Internal);
        assert_eq!(visibility(std::iter::empty()), Access::Internal);
    }

    #[test]
    fn test_parameter_directions() {
        assert_eq!(direction(&ParameterDef::new("a", int())), Direction::ByValue);
        assert_eq!(direction(&ParameterDef::new("a", int()).by_ref()), Direction::ByRef);
        assert_eq!(direction(&ParameterDef::new("a", int()).out()), Direction::Out);
        assert_eq!(direction(&ParameterDef::new("a", int()).in_()), Direction::In);
    }

    #[test]
    fn test_counts_properties_and_methods() {
        let universe = TypeUniverse::new()
            .with(
                TypeDef::class("Demo", "Base")
                    .abstract_()
                    .property(PropertyDef::new("A", int()).get(AccessorDef::abstract_(Access::Public)))
                    .property(
                        PropertyDef::new("B", int())
                            .get(AccessorDef::abstract_(Access::Public))
                            .set(AccessorDef::abstract_(Access::Protected)),
                    )
                    .method(MethodDef::new("Run", void()).abstract_())
                    .method(MethodDef::new("Stop", void()).abstract_())
                    .method(MethodDef::new("Ping", void())),
            )
            .unwrap();

        let (target, imports, added) = run(&universe, &TypeDescriptor::named("Demo", "Base"));
        assert_eq!(added, 4);
        assert_eq!(target.members.len(), 4);
        assert!(imports.contains("System"));

        for member in &target.members {
            if let MemberDeclaration::Method(method) = member {
                assert_eq!(
                    method.body,
                    Some(vec![Statement::ThrowNotImplemented(TypeReference::new(
                        "NotImplementedException"
                    ))])
                );
            }
        }
    }

    #[test]
    fn test_partly_concrete_property_is_skipped() {
        let universe = TypeUniverse::new()
            .with(
                TypeDef::class("Demo", "Base").abstract_().property(
                    PropertyDef::new("Size", int())
                        .get(AccessorDef::abstract_(Access::Public))
                        .set(AccessorDef::concrete(Access::Public)),
                ),
            )
            .unwrap();

        let (target, imports, added) = run(&universe, &TypeDescriptor::named("Demo", "Base"));
        assert_eq!(added, 0);
        assert!(target.members.is_empty());
        assert!(imports.is_empty());
    }

    #[test]
    fn test_interface_members_are_public_and_final() {
        let universe = TypeUniverse::new();
        let (target, _, added) = run(&universe, &TypeDescriptor::named("System", "IDisposable"));
        assert_eq!(added, 1);
        assert_eq!(*target.members[0].attributes(), MemberAttributes::public_final());
    }

    #[test]
    fn test_property_accessors_mirror_base() {
        let universe = TypeUniverse::new()
            .with(
                TypeDef::class("Demo", "Base").abstract_().property(
                    PropertyDef::new("Id", int()).get(AccessorDef::abstract_(Access::Protected)),
                ),
            )
            .unwrap();

        let (target, _, _) = run(&universe, &TypeDescriptor::named("Demo", "Base"));
        let MemberDeclaration::Property(id) = &target.members[0] else {
            panic!("expected a property");
        };
        assert!(id.has_getter());
        assert!(!id.has_setter());
        assert_eq!(id.attributes, MemberAttributes::overriding(Access::Protected));
    }

    #[test]
    fn test_existing_members_are_not_duplicated() {
        let universe = TypeUniverse::new();
        let dispose = MethodDeclaration::new("Dispose", TypeReference::new("void"));
        let mut target = TypeDeclaration::class("Stub").member(dispose);
        let mut imports = ImportSection::new();
        let added = synthesize_overrides(
            &universe,
            &mut target,
            &TypeDescriptor::named("System", "IDisposable"),
            &mut imports,
            "",
            false,
        )
        .unwrap();
        assert_eq!(added, 0);
        assert_eq!(target.members.len(), 1);
    }

    #[test]
    fn test_generic_base_is_substituted() {
        let universe = TypeUniverse::new()
            .with(
                TypeDef::interface("Demo", "Repository")
                    .generic("T")
                    .method(
                        MethodDef::new("Find", TypeDescriptor::param("T"))
                            .abstract_()
                            .param(ParameterDef::new("id", int())),
                    ),
            )
            .unwrap()
            .with(TypeDef::class("Demo.Model", "Customer"))
            .unwrap();

        let base = TypeDescriptor::generic(
            "Demo",
            "Repository",
            vec![TypeDescriptor::named("Demo.Model", "Customer")],
        );
        let (target, imports, _) = run(&universe, &base);
        let MemberDeclaration::Method(find) = &target.members[0] else {
            panic!("expected a method");
        };
        assert_eq!(find.return_type.to_string(), "Customer");
        assert!(imports.contains("Demo.Model"));
    }

    #[test]
    fn test_failure_leaves_target_untouched() {
        let universe = TypeUniverse::new()
            .with(
                TypeDef::class("Demo", "Base")
                    .abstract_()
                    .method(MethodDef::new("Ok", TypeDescriptor::named("Demo.Good", "Thing")).abstract_())
                    .method(MethodDef::new("Broken", TypeDescriptor::named("Demo", "")).abstract_()),
            )
            .unwrap();

        let mut target = TypeDeclaration::class("Stub");
        let mut imports = ImportSection::new();
        let err = synthesize_overrides(
            &universe,
            &mut target,
            &TypeDescriptor::named("Demo", "Base"),
            &mut imports,
            "Demo.App",
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnresolvableType { .. }));
        assert!(target.members.is_empty());
        assert!(imports.is_empty());
    }

    #[test]
    fn test_fully_qualified_members() {
        let universe = TypeUniverse::new();
        let mut target = TypeDeclaration::class("Stub");
        let mut imports = ImportSection::new();
        OverrideSynthesizer::new(&universe)
            .fully_qualified()
            .synthesize(
                &mut target,
                &TypeDescriptor::named("System", "IDisposable"),
                &mut imports,
                "Demo",
            )
            .unwrap();
        let MemberDeclaration::Method(dispose) = &target.members[0] else {
            panic!("expected a method");
        };
        assert_eq!(
            dispose.body,
            Some(vec![Statement::ThrowNotImplemented(TypeReference::new(
                "System.NotImplementedException"
            ))])
        );
        assert!(imports.is_empty());
    }
}
