use std::path::PathBuf;

use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use stubforge_catalog::CatalogFile;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct MembersCommand {
    /// Path to the type catalog
    #[arg(short, long, default_value = "stubforge.toml")]
    pub catalog: PathBuf,

    /// Type to inspect
    #[arg(short, long)]
    pub base: String,

    /// Group members by this attribute (the `Attribute` suffix may be omitted)
    #[arg(long)]
    pub category_attribute: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: Format,
}

impl MembersCommand {
    pub fn run(&self) -> Result<()> {
        let file = CatalogFile::open(&self.catalog).unwrap_or_exit();
        let report = ops::members(
            file.catalog(),
            &self.base,
            self.category_attribute.as_deref(),
        )?;

        match self.format {
            Format::Text => report.render(&mut TerminalOutput::new()),
            Format::Json => {
                let json =
                    serde_json::to_string_pretty(&report).wrap_err("Failed to serialize members")?;
                println!("{}", json);
            }
        }
        Ok(())
    }
}
