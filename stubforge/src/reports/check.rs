//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from catalog validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the catalog file.
    pub config_path: PathBuf,
    /// Types declared by the catalog, in declaration order.
    pub types: Vec<TypeSummary>,
}

#[derive(Debug)]
pub struct TypeSummary {
    pub name: String,
    /// `abstract class`, `interface`, ...
    pub kind: String,
    pub abstract_members: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        if self.types.is_empty() {
            return;
        }

        out.newline();
        out.section(&format!(
            "{} type{}",
            self.types.len(),
            if self.types.len() == 1 { "" } else { "s" }
        ));
        for ty in &self.types {
            let detail = match ty.abstract_members {
                0 => String::new(),
                1 => ", 1 abstract member".to_string(),
                n => format!(", {} abstract members", n),
            };
            out.list_item(&format!("{} ({}{})", ty.name, ty.kind, detail));
        }
    }
}
