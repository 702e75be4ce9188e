//! Validation and lowering of catalog entries into type definitions.

use std::collections::{HashMap, HashSet};

use stubforge_types::{
    AccessorDef, AttributeUse, MemberDef, MethodDef, ParameterDef, PropertyDef, TypeDef,
    TypeDescriptor, TypeKind, TypeUniverse, builtins,
};

use super::{
    schema::{
        AccessorEntry, AttributeEntry, CatalogSchema, MethodEntry, ParamModifier, PropertyEntry,
        TypeEntry,
    },
    validate::ParseContext,
};
use crate::{Result, type_expr::TypeScope};

/// What later entries may rely on about every known type.
struct KnownTypes {
    arity: HashMap<String, usize>,
    kinds: HashMap<String, TypeKind>,
}

impl KnownTypes {
    fn collect(universe: &TypeUniverse, schema: &CatalogSchema) -> Self {
        let mut arity = HashMap::new();
        let mut kinds = HashMap::new();
        for def in universe.iter() {
            arity.insert(def.full_name(), def.generic_params.len());
            kinds.insert(def.full_name(), def.kind);
        }
        for (name, entry) in &schema.types {
            arity.insert(name.clone(), entry.generics.len());
            kinds.insert(name.clone(), entry.kind.into());
        }
        Self { arity, kinds }
    }

    fn kind_of(&self, ty: &TypeDescriptor) -> Option<TypeKind> {
        self.kinds.get(&ty.full_name()).copied()
    }
}

/// Build a universe holding the built-ins plus every catalog type.
pub(crate) fn build_universe(schema: &CatalogSchema, ctx: &ParseContext<'_>) -> Result<TypeUniverse> {
    let mut universe = TypeUniverse::new();

    for name in schema.types.keys() {
        ctx.validate_type_name(name)?;
    }
    let known = KnownTypes::collect(&universe, schema);

    for (name, entry) in &schema.types {
        let def = lower_type(name, entry, &known, &ctx.push(name))?;
        tracing::debug!(ty = %name, members = def.members.len(), "loaded catalog type");
        universe
            .insert(def)
            .map_err(|err| ctx.source_context().universe_error(err, ctx.find_span(name)))?;
    }

    universe.check_inheritance().map_err(|err| {
        let span = match &err {
            stubforge_types::Error::CyclicInheritance(name) => ctx.find_span(name),
            _ => None,
        };
        ctx.source_context().universe_error(err, span)
    })?;

    Ok(universe)
}

fn lower_type(
    full_name: &str,
    entry: &TypeEntry,
    known: &KnownTypes,
    ctx: &ParseContext<'_>,
) -> Result<TypeDef> {
    let (namespace, name) = full_name.rsplit_once('.').unwrap_or(("", full_name));
    let kind = TypeKind::from(entry.kind);
    let mut def = TypeDef::new(namespace, name, kind);
    def.is_abstract = entry.is_abstract;
    def.is_sealed = entry.is_sealed;

    check_generics(&entry.generics, &[], ctx)?;
    def.generic_params = entry.generics.clone();

    let scope = TypeScope::new(namespace, &known.arity)
        .with_params(entry.generics.iter().map(String::as_str));

    def.base = lower_base(full_name, entry, kind, known, &scope, ctx)?;

    for interface in &entry.interfaces {
        let ty = ctx.resolve_type(interface, "interface list", &scope)?;
        match known.kind_of(&ty) {
            _ if !matches!(ty, TypeDescriptor::Named { .. }) => {
                return Err(ctx.error_at(
                    format!("'{}' cannot be implemented by '{}'", interface, full_name),
                    interface,
                ));
            }
            Some(other) if other != TypeKind::Interface => {
                return Err(ctx.error_at(
                    format!(
                        "'{}' is a {}, not an interface; use 'base' instead",
                        interface,
                        other.as_str()
                    ),
                    interface,
                ));
            }
            _ => def.interfaces.push(ty),
        }
    }

    for attribute in &entry.attributes {
        def.attributes
            .push(lower_attribute(attribute, known, &scope, ctx)?);
    }

    let members_abstract = kind == TypeKind::Interface;

    let mut property_names = HashSet::new();
    for property in &entry.properties {
        let member_ctx = ctx.push(&property.name);
        ctx.validate_name(&property.name, "property")?;
        if !property_names.insert(property.name.as_str()) {
            return Err(ctx.source_context().duplicate_member_error(
                &property.name,
                full_name,
                last_span(ctx.src(), &property.name),
            ));
        }
        let lowered = lower_property(property, members_abstract, known, &scope, &member_ctx)?;
        def.members.push(MemberDef::Property(lowered));
    }

    let mut method_signatures = HashSet::new();
    for method in &entry.methods {
        let member_ctx = ctx.push(&method.name);
        ctx.validate_name(&method.name, "method")?;
        let lowered = MemberDef::Method(lower_method(
            method,
            &entry.generics,
            members_abstract,
            known,
            &scope,
            &member_ctx,
        )?);
        if !method_signatures.insert(lowered.signature()) {
            return Err(ctx.source_context().duplicate_member_error(
                &method.name,
                full_name,
                last_span(ctx.src(), &method.name),
            ));
        }
        def.members.push(lowered);
    }

    if def.is_abstract && def.is_sealed {
        return Err(ctx.error_at(
            format!("'{}' cannot be both abstract and sealed", full_name),
            full_name,
        ));
    }
    if !def.is_abstract
        && kind != TypeKind::Interface
        && def.members.iter().any(MemberDef::is_abstract)
    {
        return Err(ctx.error_at(
            format!(
                "'{}' declares abstract members but is not marked abstract",
                full_name
            ),
            full_name,
        ));
    }

    Ok(def)
}

fn lower_base(
    full_name: &str,
    entry: &TypeEntry,
    kind: TypeKind,
    known: &KnownTypes,
    scope: &TypeScope<'_>,
    ctx: &ParseContext<'_>,
) -> Result<Option<TypeDescriptor>> {
    let Some(base) = &entry.base else {
        return Ok((kind == TypeKind::Class).then(|| TypeDescriptor::from_full_name(builtins::OBJECT)));
    };

    if kind != TypeKind::Class {
        return Err(ctx.error_at(
            format!(
                "only classes may declare a base type; '{}' is {} {}",
                full_name,
                if kind == TypeKind::Interface { "an" } else { "a" },
                kind.as_str()
            ),
            base,
        ));
    }

    let ty = ctx.resolve_type(base, "base type", scope)?;
    if !matches!(ty, TypeDescriptor::Named { .. }) {
        return Err(ctx.error_at(
            format!("base type of '{}' must be a named class, found '{}'", full_name, base),
            base,
        ));
    }
    match known.kind_of(&ty) {
        Some(TypeKind::Interface) => Err(ctx.error_at(
            format!(
                "base type '{}' of '{}' is an interface; list it under 'interfaces'",
                base, full_name
            ),
            base,
        )),
        Some(other @ (TypeKind::Struct | TypeKind::Enum | TypeKind::Primitive | TypeKind::Void)) => {
            Err(ctx.error_at(
                format!("cannot derive '{}' from {} '{}'", full_name, other.as_str(), base),
                base,
            ))
        }
        _ => Ok(Some(ty)),
    }
}

fn lower_property(
    entry: &PropertyEntry,
    members_abstract: bool,
    known: &KnownTypes,
    scope: &TypeScope<'_>,
    ctx: &ParseContext<'_>,
) -> Result<PropertyDef> {
    if entry.get.is_none() && entry.set.is_none() {
        return Err(ctx.error_at(
            format!("property '{}' declares neither 'get' nor 'set'", entry.name),
            &entry.name,
        ));
    }

    let ty = ctx.resolve_type(&entry.ty, "property type", scope)?;
    let mut property = PropertyDef::new(&entry.name, ty);
    if let Some(get) = &entry.get {
        property = property.get(lower_accessor(get, members_abstract, "getter", ctx)?);
    }
    if let Some(set) = &entry.set {
        property = property.set(lower_accessor(set, members_abstract, "setter", ctx)?);
    }
    if entry.is_static {
        property = property.static_();
    }
    for attribute in &entry.attributes {
        property = property.attribute(lower_attribute(attribute, known, scope, ctx)?);
    }
    Ok(property)
}

fn lower_accessor(
    entry: &AccessorEntry,
    members_abstract: bool,
    kind: &str,
    ctx: &ParseContext<'_>,
) -> Result<AccessorDef> {
    let access = ctx.parse_access(entry.access.as_deref(), kind)?;
    Ok(AccessorDef {
        access,
        is_abstract: entry.is_abstract.unwrap_or(members_abstract),
    })
}

fn lower_method(
    entry: &MethodEntry,
    type_generics: &[String],
    members_abstract: bool,
    known: &KnownTypes,
    scope: &TypeScope<'_>,
    ctx: &ParseContext<'_>,
) -> Result<MethodDef> {
    check_generics(&entry.generics, type_generics, ctx)?;
    let scope = scope
        .clone()
        .with_params(entry.generics.iter().map(String::as_str));

    let returns = ctx.resolve_type(&entry.returns, "return type", &scope)?;
    let mut method = MethodDef::new(&entry.name, returns)
        .access(ctx.parse_access(entry.access.as_deref(), "method")?);
    method.is_abstract = entry.is_abstract.unwrap_or(members_abstract);
    method.is_static = entry.is_static;
    method.generic_params = entry.generics.clone();

    if method.is_abstract && method.is_static {
        return Err(ctx.error_at(
            format!("method '{}' cannot be both static and abstract", entry.name),
            &entry.name,
        ));
    }

    let mut param_names = HashSet::new();
    for param in &entry.params {
        ctx.validate_name(&param.name, "parameter")?;
        if !param_names.insert(param.name.as_str()) {
            return Err(ctx.error_at(
                format!(
                    "parameter '{}' is declared twice on '{}'",
                    param.name,
                    ctx.path_string()
                ),
                &param.name,
            ));
        }
        let ty = ctx.resolve_type(&param.ty, "parameter type", &scope)?;
        let lowered = ParameterDef::new(&param.name, ty);
        method = method.param(match param.modifier {
            None => lowered,
            Some(ParamModifier::Ref) => lowered.by_ref(),
            Some(ParamModifier::Out) => lowered.out(),
            Some(ParamModifier::In) => lowered.in_(),
        });
    }

    for attribute in &entry.attributes {
        method = method.attribute(lower_attribute(attribute, known, &scope, ctx)?);
    }
    Ok(method)
}

/// Generic parameter names must be identifiers, unique, and must not shadow
/// the parameters of the enclosing type.
fn check_generics(names: &[String], enclosing: &[String], ctx: &ParseContext<'_>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        ctx.validate_name(name, "generic parameter")?;
        if !seen.insert(name.as_str()) {
            return Err(ctx.error_at(
                format!(
                    "generic parameter '{}' is declared twice on '{}'",
                    name,
                    ctx.path_string()
                ),
                name,
            ));
        }
        if enclosing.contains(name) {
            return Err(ctx.error_at(
                format!(
                    "generic parameter '{}' of '{}' shadows a type parameter of the declaring type",
                    name,
                    ctx.path_string()
                ),
                name,
            ));
        }
    }
    Ok(())
}

fn lower_attribute(
    entry: &AttributeEntry,
    known: &KnownTypes,
    scope: &TypeScope<'_>,
    ctx: &ParseContext<'_>,
) -> Result<AttributeUse> {
    let mut ty = ctx.resolve_type(&entry.ty, "attribute", scope)?;
    if !known.arity.contains_key(&ty.full_name())
        && !ty.name().ends_with(builtins::ATTRIBUTE_SUFFIX)
        && let TypeDescriptor::Named { namespace, name, args } = &ty
    {
        let suffixed = format!("{}{}", name, builtins::ATTRIBUTE_SUFFIX);
        let candidate = TypeDescriptor::generic(namespace.clone(), suffixed, args.clone());
        if known.arity.contains_key(&candidate.full_name()) {
            ty = candidate;
        }
    }
    if !matches!(ty, TypeDescriptor::Named { .. }) {
        return Err(ctx.error_at(
            format!("attribute type '{}' must be a named type", entry.ty),
            &entry.ty,
        ));
    }

    let mut attribute = AttributeUse::new(ty);
    for arg in &entry.args {
        attribute = attribute.arg(attribute_literal(arg).ok_or_else(|| {
            ctx.error_at(
                format!(
                    "attribute arguments must be strings, numbers or booleans, found {}",
                    arg.type_str()
                ),
                &entry.ty,
            )
        })?);
    }
    Ok(attribute)
}

/// Source literal for an attribute argument.
fn attribute_literal(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(format!(
            "\"{}\"",
            s.replace('\\', "\\\\").replace('"', "\\\"")
        )),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Span of the last `name = "..."` occurrence, which is the duplicate.
fn last_span(src: &str, name: &str) -> Option<miette::SourceSpan> {
    let pattern = format!("\"{}\"", name);
    src.rfind(&pattern)
        .map(|pos| miette::SourceSpan::from((pos + 1, name.len())))
}
