use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use stubforge_catalog::CatalogFile;

use super::UnwrapOrExit;
use crate::{
    ops::{self, generate::GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the type catalog
    #[arg(short, long, default_value = "stubforge.toml")]
    pub catalog: PathBuf,

    /// Name of the generated class
    #[arg(short, long)]
    pub name: String,

    /// Namespace of the generated class (global namespace when omitted)
    #[arg(long, default_value = "")]
    pub namespace: String,

    /// Base class whose abstract members are overridden
    #[arg(short, long)]
    pub base: Option<String>,

    /// Interface to implement (repeatable)
    #[arg(short, long = "interface")]
    pub interfaces: Vec<String>,

    /// Write the stub to this file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(short, long, requires = "output")]
    pub force: bool,

    /// Spell every type with its namespace instead of importing it
    #[arg(long)]
    pub fully_qualified: bool,

    /// Do not add using directives for referenced types
    #[arg(long)]
    pub skip_imports: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let file = CatalogFile::open(&self.catalog).unwrap_or_exit();

        let report = ops::generate(
            file.catalog(),
            GenerateOptions {
                name: &self.name,
                namespace: &self.namespace,
                base: self.base.as_deref(),
                interfaces: &self.interfaces,
                output: self.output.as_deref(),
                force: self.force,
                fully_qualified: self.fully_qualified,
                skip_imports: self.skip_imports,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
