//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from stub generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Fully-qualified name of the generated class.
    pub class_name: String,
    pub outcome: GenerateOutcome,
}

/// What happened to the generated source.
#[derive(Debug)]
pub enum GenerateOutcome {
    /// Source was written to disk.
    Written(PathBuf),
    /// The target file already existed and was left alone.
    Skipped(PathBuf),
    /// Source was not written; `path` is where it would have gone.
    Preview {
        path: Option<PathBuf>,
        content: String,
    },
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.outcome {
            GenerateOutcome::Written(path) => {
                out.section(&format!("Generated {}", self.class_name));
                out.added_item(&path.display().to_string());
            }
            GenerateOutcome::Skipped(path) => {
                out.warning(&format!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                ));
            }
            GenerateOutcome::Preview {
                path: Some(path),
                content,
            } => {
                out.divider(&path.display().to_string());
                out.preformatted(content.trim_end());
            }
            GenerateOutcome::Preview {
                path: None,
                content,
            } => out.preformatted(content.trim_end()),
        }
    }
}
