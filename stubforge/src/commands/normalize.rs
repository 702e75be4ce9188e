use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use stubforge_codegen::normalize;

#[derive(Args)]
pub struct NormalizeCommand {
    /// Source file to normalize
    pub file: PathBuf,

    /// Rewrite the file instead of printing the result
    #[arg(long)]
    pub in_place: bool,
}

impl NormalizeCommand {
    pub fn run(&self) -> Result<()> {
        let raw = std::fs::read_to_string(&self.file)
            .wrap_err_with(|| format!("Failed to read {}", self.file.display()))?;
        let normalized = normalize(&raw);

        if !self.in_place {
            print!("{}", normalized);
            return Ok(());
        }

        if normalized == raw {
            println!("{} is already normalized", self.file.display());
        } else {
            std::fs::write(&self.file, &normalized)
                .wrap_err_with(|| format!("Failed to write {}", self.file.display()))?;
            println!("Normalized {}", self.file.display());
        }
        Ok(())
    }
}
