use std::path::{Path, PathBuf};

use super::{Catalog, parse::parse_catalog};
use crate::Result;

/// Default catalog filename looked up in the working directory.
pub const DEFAULT_CATALOG: &str = "stubforge.toml";

/// A catalog file with both raw content and the parsed catalog.
pub struct CatalogFile {
    path: PathBuf,
    content: String,
    catalog: Catalog,
}

impl CatalogFile {
    /// Open and parse a catalog file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let catalog = parse_catalog(&content, &path.display().to_string())?;

        Ok(Self {
            path,
            content,
            catalog,
        })
    }

    /// Open `stubforge.toml` in `dir`.
    pub fn open_in(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(dir.as_ref().join(DEFAULT_CATALOG))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }
}
