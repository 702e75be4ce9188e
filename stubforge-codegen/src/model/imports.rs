use indexmap::IndexSet;

use crate::builder::{CodeFragment, Renderable};

/// Ordered, deduplicated `using` list of one namespace section.
///
/// Append-only: namespaces render in the order they were first needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSection {
    namespaces: IndexSet<String>,
}

impl ImportSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `namespace` available to code declared in `declaration_namespace`.
    ///
    /// Returns `true` if a new import was added. A blank namespace, or one
    /// the declaration namespace starts with, needs no import.
    pub fn ensure_imported(&mut self, namespace: &str, declaration_namespace: &str) -> bool {
        let namespace = namespace.trim();
        if namespace.is_empty() || encloses(namespace, declaration_namespace) {
            return false;
        }
        let added = self.namespaces.insert(namespace.to_string());
        if added {
            tracing::debug!(namespace, "added import");
        }
        added
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }

    /// Imported namespaces in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

/// Whether code declared in `inner` is treated as seeing `outer`.
fn encloses(outer: &str, inner: &str) -> bool {
    !inner.is_empty() && inner.starts_with(outer)
}

impl Renderable for ImportSection {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.iter()
            .map(|namespace| CodeFragment::line(format!("using {};", namespace)))
            .collect()
    }
}
