//! The symbol table standing in for host reflection.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::{
    AttributeMatch, AttributeUse, Error, MemberFilter, Members, Result, TypeDef, TypeDescriptor,
    TypeKind, builtins,
};

/// Every type definition the generator can see, keyed by full name.
///
/// Read-only during generation; share it by reference.
#[derive(Debug, Clone)]
pub struct TypeUniverse {
    types: IndexMap<String, TypeDef>,
}

impl TypeUniverse {
    /// Create a universe holding the built-in types.
    pub fn new() -> Self {
        let mut universe = Self::empty();
        for def in builtins::definitions() {
            universe.types.insert(def.full_name(), def);
        }
        universe
    }

    /// Create a universe without any types, not even built-ins.
    pub fn empty() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Add a definition. Full names must be unique.
    pub fn insert(&mut self, def: TypeDef) -> Result<()> {
        let full_name = def.full_name();
        if self.types.contains_key(&full_name) {
            return Err(Error::DuplicateType(full_name));
        }
        self.types.insert(full_name, def);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, def: TypeDef) -> Result<Self> {
        self.insert(def)?;
        Ok(self)
    }

    /// Look a definition up by full name.
    pub fn get(&self, full_name: &str) -> Option<&TypeDef> {
        self.types.get(full_name)
    }

    /// Definition of a named descriptor.
    pub fn definition(&self, ty: &TypeDescriptor) -> Option<&TypeDef> {
        match ty {
            TypeDescriptor::Named { .. } => self.get(&ty.full_name()),
            _ => None,
        }
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.types.contains_key(full_name)
    }

    /// Iterate over definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn kind(&self, ty: &TypeDescriptor) -> Option<TypeKind> {
        self.definition(ty).map(|def| def.kind)
    }

    pub fn is_primitive(&self, ty: &TypeDescriptor) -> bool {
        self.kind(ty) == Some(TypeKind::Primitive)
    }

    pub fn is_void(&self, ty: &TypeDescriptor) -> bool {
        self.kind(ty) == Some(TypeKind::Void)
    }

    pub fn is_interface(&self, ty: &TypeDescriptor) -> bool {
        self.kind(ty) == Some(TypeKind::Interface)
    }

    /// Interfaces count as abstract.
    pub fn is_abstract(&self, ty: &TypeDescriptor) -> bool {
        self.definition(ty)
            .is_some_and(|def| def.is_abstract || def.is_interface())
    }

    /// Map from the definition's generic parameters to the descriptor's
    /// arguments. Open descriptors map nothing.
    pub fn substitution(def: &TypeDef, ty: &TypeDescriptor) -> HashMap<String, TypeDescriptor> {
        def.generic_params
            .iter()
            .cloned()
            .zip(ty.type_args().iter().cloned())
            .filter(|(param, arg)| !matches!(arg, TypeDescriptor::Param(p) if p == param))
            .collect()
    }

    /// Base class of a descriptor, with generic arguments substituted.
    pub fn base_of(&self, ty: &TypeDescriptor) -> Option<TypeDescriptor> {
        let def = self.definition(ty)?;
        let base = def.base.as_ref()?;
        Some(base.substitute(&Self::substitution(def, ty)))
    }

    /// Directly implemented or inherited interfaces, substituted.
    pub fn interfaces_of(&self, ty: &TypeDescriptor) -> Vec<TypeDescriptor> {
        let Some(def) = self.definition(ty) else {
            return Vec::new();
        };
        let map = Self::substitution(def, ty);
        def.interfaces.iter().map(|i| i.substitute(&map)).collect()
    }

    /// Base classes from the immediate base up to the root.
    ///
    /// Types without a definition end the chain. A chain that revisits a
    /// type is an error.
    pub fn ancestors(&self, ty: &TypeDescriptor) -> Result<Vec<TypeDescriptor>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::from([ty.full_name()]);
        let mut current = ty.clone();

        while let Some(base) = self.base_of(&current) {
            if !visited.insert(base.full_name()) {
                return Err(Error::CyclicInheritance(base.full_name()));
            }
            chain.push(base.clone());
            current = base;
        }
        Ok(chain)
    }

    /// Whether `ty` is, or transitively derives from, `ancestor`.
    pub fn derives_from(&self, ty: &TypeDescriptor, ancestor: &str) -> Result<bool> {
        if ty.full_name() == ancestor {
            return Ok(true);
        }
        Ok(self
            .ancestors(ty)?
            .iter()
            .any(|base| base.full_name() == ancestor))
    }

    /// Whether `ty` is an annotation type (derives from `System.Attribute`).
    pub fn is_attribute(&self, ty: &TypeDescriptor) -> Result<bool> {
        self.derives_from(ty, builtins::ATTRIBUTE)
    }

    /// Enumerate the members visible on `ty`.
    pub fn members<'a>(&'a self, ty: &TypeDescriptor, filter: MemberFilter) -> Members<'a> {
        Members::new(self, ty, filter)
    }

    /// Probe `attributes` for uses of `attribute_type` (or a subclass).
    pub fn find_attribute<'a>(
        &self,
        attributes: &'a [AttributeUse],
        attribute_type: &TypeDescriptor,
    ) -> AttributeMatch<'a> {
        let wanted = attribute_type.full_name();
        let matches = attributes
            .iter()
            .filter(|a| self.derives_from(&a.ty, &wanted).unwrap_or(false))
            .collect();
        AttributeMatch::from_matches(matches)
    }

    /// Check every base chain for cycles.
    pub fn check_inheritance(&self) -> Result<()> {
        for def in self.types.values() {
            self.ancestors(&def.descriptor())?;
        }
        Ok(())
    }
}

impl Default for TypeUniverse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Access, AccessorDef, MemberDef, MethodDef, MethodKind, ParameterDef, PropertyDef};

    fn int() -> TypeDescriptor {
        TypeDescriptor::named("System", "Int32")
    }

    fn string() -> TypeDescriptor {
        TypeDescriptor::named("System", "String")
    }

    fn names(universe: &TypeUniverse, ty: &TypeDescriptor) -> Vec<String> {
        universe
            .members(ty, MemberFilter::INSTANCE)
            .map(|m| m.member.name().to_string())
            .collect()
    }

    #[test]
    fn test_builtins_present() {
        let universe = TypeUniverse::new();
        assert!(universe.is_primitive(&int()));
        assert!(!universe.is_primitive(&string()));
        assert!(universe.is_void(&TypeDescriptor::named("System", "Void")));
        assert!(universe.is_abstract(&TypeDescriptor::named("System", "Attribute")));
        assert!(universe.is_interface(&TypeDescriptor::named("System", "IDisposable")));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut universe = TypeUniverse::new();
        let err = universe
            .insert(TypeDef::class("System", "String"))
            .unwrap_err();
        assert_eq!(err, Error::DuplicateType("System.String".into()));
    }

    #[test]
    fn test_attribute_detection() {
        let universe = TypeUniverse::new()
            .with(
                TypeDef::class("Demo", "CategoryAttribute")
                    .base(TypeDescriptor::named("System", "Attribute")),
            )
            .unwrap()
            .with(
                TypeDef::class("Demo", "SpecialCategoryAttribute")
                    .base(TypeDescriptor::named("Demo", "CategoryAttribute")),
            )
            .unwrap();

        let special = TypeDescriptor::named("Demo", "SpecialCategoryAttribute");
        assert!(universe.is_attribute(&special).unwrap());
        assert!(
            universe
                .is_attribute(&TypeDescriptor::named("System", "Attribute"))
                .unwrap()
        );
        assert!(!universe.is_attribute(&string()).unwrap());
    }

    #[test]
    fn test_cycle_detected() {
        let universe = TypeUniverse::new()
            .with(TypeDef::class("Demo", "A").base(TypeDescriptor::named("Demo", "B")))
            .unwrap()
            .with(TypeDef::class("Demo", "B").base(TypeDescriptor::named("Demo", "A")))
            .unwrap();

        assert!(matches!(
            universe.ancestors(&TypeDescriptor::named("Demo", "A")),
            Err(Error::CyclicInheritance(_))
        ));
        assert!(universe.check_inheritance().is_err());
    }

    #[test]
    fn test_members_include_inherited_and_skip_hidden() {
        let universe = TypeUniverse::new()
            .with(
                TypeDef::class("Demo", "Base")
                    .abstract_()
                    .property(
                        PropertyDef::new("Name", string())
                            .get(AccessorDef::abstract_(Access::Public)),
                    )
                    .method(MethodDef::new("Secret", int()).access(Access::Private))
                    .method(
                        MethodDef::new("Compute", int())
                            .access(Access::Protected)
                            .abstract_(),
                    ),
            )
            .unwrap()
            .with(
                TypeDef::class("Demo", "Middle")
                    .abstract_()
                    .base(TypeDescriptor::named("Demo", "Base"))
                    .method(MethodDef::new("Compute", int()).access(Access::Protected))
                    .method(
                        MethodDef::new(".ctor", TypeDescriptor::named("System", "Void"))
                            .kind(MethodKind::Constructor),
                    ),
            )
            .unwrap();

        let middle = TypeDescriptor::named("Demo", "Middle");
        let found: Vec<_> = universe.members(&middle, MemberFilter::INSTANCE).collect();

        assert_eq!(names(&universe, &middle), vec!["Compute", "Name"]);
        let compute = &found[0];
        assert_eq!(compute.declaring_type, middle);
        assert!(!compute.member.is_abstract());
    }

    #[test]
    fn test_members_restartable() {
        let universe = TypeUniverse::new();
        let disposable = TypeDescriptor::named("System", "IDisposable");
        assert_eq!(names(&universe, &disposable), vec!["Dispose"]);
        assert_eq!(names(&universe, &disposable), vec!["Dispose"]);
    }

    #[test]
    fn test_members_substitute_generic_base() {
        let universe = TypeUniverse::new()
            .with(
                TypeDef::class("Demo", "Repository")
                    .generic("T")
                    .abstract_()
                    .method(
                        MethodDef::new("Find", TypeDescriptor::param("T"))
                            .abstract_()
                            .param(ParameterDef::new("id", int())),
                    ),
            )
            .unwrap();
        let closed = TypeDescriptor::generic(
            "Demo",
            "Repository",
            vec![TypeDescriptor::named("Demo", "Customer")],
        );

        let found: Vec<_> = universe.members(&closed, MemberFilter::INSTANCE).collect();
        let MemberDef::Method(find) = &found[0].member else {
            panic!("expected method");
        };
        assert_eq!(find.return_type, TypeDescriptor::named("Demo", "Customer"));
    }

    #[test]
    fn test_interface_members_walk_parents() {
        let universe = TypeUniverse::new()
            .with(
                TypeDef::interface("Demo", "IShape")
                    .implements(TypeDescriptor::named("System", "IDisposable"))
                    .property(
                        PropertyDef::new("Area", TypeDescriptor::named("System", "Double"))
                            .get(AccessorDef::abstract_(Access::Public)),
                    ),
            )
            .unwrap();

        assert_eq!(
            names(&universe, &TypeDescriptor::named("Demo", "IShape")),
            vec!["Area", "Dispose"]
        );
    }

    #[test]
    fn test_find_attribute() {
        let universe = TypeUniverse::new()
            .with(
                TypeDef::class("Demo", "CategoryAttribute")
                    .base(TypeDescriptor::named("System", "Attribute")),
            )
            .unwrap();
        let category = TypeDescriptor::named("Demo", "CategoryAttribute");
        let attributes = vec![
            AttributeUse::new(TypeDescriptor::named("System", "Obsolete")),
            AttributeUse::new(category.clone()).arg("\"Geometry\""),
        ];

        let found = universe.find_attribute(&attributes, &category);
        assert_eq!(found.single().map(|a| a.args[0].as_str()), Some("\"Geometry\""));
    }
}
