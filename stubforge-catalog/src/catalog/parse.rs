//! Catalog parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Catalog, CatalogSchema, build::build_universe, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Catalog {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_catalog(s, "stubforge.toml")
    }
}

impl Catalog {
    /// Parse a catalog file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_catalog(&content, &path.display().to_string())
    }

    /// Parse a catalog from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_catalog(content, filename)
    }
}

/// Parse and validate a catalog, using `filename` in diagnostics.
pub fn parse_catalog(content: &str, filename: &str) -> Result<Catalog> {
    let source_ctx = SourceContext::new(content, filename);
    let schema: CatalogSchema = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;

    let ctx = ParseContext::new(content, filename);
    let universe = build_universe(&schema, &ctx)?;
    tracing::debug!(
        file = filename,
        types = schema.types.len(),
        "parsed type catalog"
    );

    Ok(Catalog {
        render: schema.render,
        declared: schema.types.keys().cloned().collect(),
        universe,
    })
}
