use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use stubforge_catalog::CatalogFile;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the type catalog
    #[arg(short, long, default_value = "stubforge.toml")]
    pub catalog: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let file = CatalogFile::open(&self.catalog).unwrap_or_exit();
        let report = ops::check(file.catalog(), file.path());
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
