//! Turning type descriptors into source references.

use stubforge_core::validate_identifier;
use stubforge_types::{TypeDescriptor, TypeUniverse, builtins};

use crate::{Error, ImportSection, Result, TypeReference};

/// Resolves descriptors against a universe, registering imports as needed.
///
/// In priority order:
///
/// 1. built-in types with a keyword (`string`, `object`, `int`, `void`, ...)
///    render as that keyword and never import;
/// 2. other primitives render by simple name and never import;
/// 3. everything else renders by simple name (or full name when
///    `fully_qualified`), with the `Attribute` suffix dropped from types
///    deriving from `System.Attribute`;
/// 4. unless `skip_import` or `fully_qualified`, the namespace is imported.
///
/// Arrays resolve through their element type and keep their rank. Generic
/// arguments resolve recursively with the same flags.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    universe: &'a TypeUniverse,
}

impl<'a> TypeResolver<'a> {
    pub fn new(universe: &'a TypeUniverse) -> Self {
        Self { universe }
    }

    pub fn resolve(
        &self,
        ty: &TypeDescriptor,
        imports: &mut ImportSection,
        declaration_namespace: &str,
        fully_qualified: bool,
        skip_import: bool,
    ) -> Result<TypeReference> {
        let (inner, rank) = ty.innermost();

        let reference = match inner {
            TypeDescriptor::Param(name) => {
                check_name(ty, name)?;
                TypeReference::new(name.clone())
            }
            TypeDescriptor::Named {
                namespace,
                name,
                args,
            } => {
                check_name(ty, name)?;
                let full_name = inner.full_name();

                if let Some(keyword) = builtins::keyword_for(&full_name) {
                    TypeReference::new(keyword)
                } else if self.universe.is_primitive(inner) || self.universe.is_void(inner) {
                    TypeReference::new(name.clone())
                } else {
                    let mut base_name = if fully_qualified {
                        full_name.clone()
                    } else {
                        name.clone()
                    };
                    if full_name != builtins::ATTRIBUTE && self.is_attribute(inner)? {
                        strip_attribute_suffix(&mut base_name);
                    }

                    if !skip_import && !fully_qualified {
                        imports.ensure_imported(namespace, declaration_namespace);
                    }

                    let arguments = args
                        .iter()
                        .map(|arg| {
                            self.resolve(
                                arg,
                                imports,
                                declaration_namespace,
                                fully_qualified,
                                skip_import,
                            )
                        })
                        .collect::<Result<Vec<_>>>()?;
                    TypeReference::new(base_name).with_arguments(arguments)
                }
            }
            TypeDescriptor::Array(_) => {
                return Err(Error::unresolvable(ty, "array without element type"));
            }
        };

        Ok(reference.with_array_rank(rank))
    }

    fn is_attribute(&self, ty: &TypeDescriptor) -> Result<bool> {
        if !self.universe.contains(&ty.full_name()) {
            tracing::trace!(ty = %ty, "type not in universe; treating as opaque");
            return Ok(false);
        }
        self.universe
            .is_attribute(ty)
            .map_err(|err| Error::unresolvable(ty, err.to_string()))
    }
}

fn check_name(ty: &TypeDescriptor, name: &str) -> Result<()> {
    match validate_identifier(name) {
        Some(reason) => Err(Error::unresolvable(ty, reason)),
        None => Ok(()),
    }
}

fn strip_attribute_suffix(name: &mut String) {
    if name.len() > builtins::ATTRIBUTE_SUFFIX.len() && name.ends_with(builtins::ATTRIBUTE_SUFFIX) {
        name.truncate(name.len() - builtins::ATTRIBUTE_SUFFIX.len());
    }
}
