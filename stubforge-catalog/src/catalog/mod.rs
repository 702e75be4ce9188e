//! Catalog types and parsing for stubforge.toml files.

mod build;
mod file;
mod parse;
mod render;
mod schema;
mod validate;

use std::collections::HashMap;

pub use file::{CatalogFile, DEFAULT_CATALOG};
pub use parse::parse_catalog;
pub use render::{BraceStyleSetting, IndentSetting, RenderSettings};
pub use schema::{
    AccessorEntry, AttributeEntry, CatalogSchema, KindEntry, MethodEntry, ParamEntry,
    ParamModifier, PropertyEntry, TypeEntry,
};
use stubforge_types::{TypeDescriptor, TypeUniverse};
pub use validate::ParseContext;

use crate::type_expr::{TypeExpr, TypeExprError, TypeScope};

/// A validated catalog: render settings plus the type universe it describes.
#[derive(Debug, Clone)]
pub struct Catalog {
    render: RenderSettings,
    declared: Vec<String>,
    universe: TypeUniverse,
}

impl Catalog {
    /// Formatting preferences from the `[render]` section.
    pub fn render(&self) -> &RenderSettings {
        &self.render
    }

    /// Built-in types plus every type the catalog declares.
    pub fn universe(&self) -> &TypeUniverse {
        &self.universe
    }

    pub fn into_universe(self) -> TypeUniverse {
        self.universe
    }

    /// Full names of the types declared in the catalog, in file order.
    pub fn declared_types(&self) -> impl Iterator<Item = &str> {
        self.declared.iter().map(String::as_str)
    }

    /// Whether the catalog (not the built-ins) declares `full_name`.
    pub fn declares(&self, full_name: &str) -> bool {
        self.declared.iter().any(|name| name == full_name)
    }

    /// Resolve a type expression such as `Demo.Repository<Demo.Customer>`.
    ///
    /// Unqualified names are looked up in `namespace`, then in `System`.
    pub fn resolve_type(
        &self,
        expr: &str,
        namespace: &str,
    ) -> std::result::Result<TypeDescriptor, TypeExprError> {
        let known: HashMap<String, usize> = self
            .universe
            .iter()
            .map(|def| (def.full_name(), def.generic_params.len()))
            .collect();
        expr.parse::<TypeExpr>()?
            .resolve(&TypeScope::new(namespace, &known))
    }
}
