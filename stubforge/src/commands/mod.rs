mod check;
mod completions;
mod generate;
mod members;
mod normalize;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use members::MembersCommand;
use normalize::NormalizeCommand;

/// Extension trait for exiting on catalog errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for stubforge_catalog::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "stubforge")]
#[command(version)]
#[command(about = "Generate override stubs for abstract types described in a TOML catalog")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Members(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Normalize(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a stub class overriding every abstract member of a base type
    Generate(GenerateCommand),

    /// List the abstract members a stub would implement
    Members(MembersCommand),

    /// Validate a catalog without generating code
    Check(CheckCommand),

    /// Clean up blank lines and brace spacing of a source file
    Normalize(NormalizeCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["stubforge", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);

        let cli = Cli::try_parse_from(["stubforge", "check", "--quiet"]).unwrap();
        assert!(cli.quiet);

        assert!(Cli::try_parse_from(["stubforge", "-q", "-v", "check"]).is_err());
    }

    #[test]
    fn test_generate_arguments() {
        let cli = Cli::try_parse_from([
            "stubforge",
            "generate",
            "--name",
            "Circle",
            "--base",
            "Shape",
            "-i",
            "System.IDisposable",
            "-i",
            "Demo.Repository<Circle>",
            "--fully-qualified",
        ])
        .unwrap();
        let Commands::Generate(cmd) = cli.command else {
            panic!("expected the generate command");
        };
        assert_eq!(cmd.catalog.to_str(), Some("stubforge.toml"));
        assert_eq!(cmd.base.as_deref(), Some("Shape"));
        assert_eq!(cmd.interfaces.len(), 2);
        assert!(cmd.fully_qualified);
        assert!(!cmd.skip_imports);
    }

    #[test]
    fn test_force_requires_output() {
        assert!(Cli::try_parse_from(["stubforge", "generate", "-n", "Circle", "--force"]).is_err());
    }

    #[test]
    fn test_members_format() {
        let cli = Cli::try_parse_from(["stubforge", "members", "-b", "Shape", "--format", "json"])
            .unwrap();
        let Commands::Members(cmd) = cli.command else {
            panic!("expected the members command");
        };
        assert!(matches!(cmd.format, members::Format::Json));
    }
}
