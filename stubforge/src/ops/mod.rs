//! Core operations.
//!
//! This module contains the business logic for stubforge commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod members;

pub use check::check;
pub use generate::generate;
pub use members::members;

use eyre::{Result, eyre};
use stubforge_catalog::Catalog;
use stubforge_types::TypeDescriptor;

/// Resolve a type expression from the command line against the catalog.
pub(crate) fn parse_type(catalog: &Catalog, expr: &str, namespace: &str) -> Result<TypeDescriptor> {
    let ty = catalog
        .resolve_type(expr, namespace)
        .map_err(|e| eyre!("invalid type '{}': {}", expr, e))?;
    if !catalog.universe().contains(&ty.full_name()) {
        tracing::warn!(ty = %ty, "type is not in the catalog; it has no known members");
    }
    Ok(ty)
}
