//! Command-line interface
//!
//! Running with no arguments generates the icons into `icons/`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::icon::DEFAULT_ICON_DIR;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// At least one icon could not be written, or setup failed
    pub const UNEXPECTED_FAILURE: i32 = 1;
}

#[derive(Debug, Parser)]
#[command(name = "tab-summarizer-icons", version, about)]
pub struct Cli {
    /// Directory the icon files are written to
    #[arg(long, global = true, default_value = DEFAULT_ICON_DIR)]
    pub out_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON logs and a JSON summary
    #[arg(long, global = true)]
    pub json_output: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Draw the icons, falling back to the basic encoder and then the embedded copies (default)
    Generate,
    /// Restore the embedded icons, falling back to the basic encoder
    Embedded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_defaults() {
        let cli = Cli::try_parse_from(["tab-summarizer-icons"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.out_dir, PathBuf::from("icons"));
        assert!(!cli.verbose);
        assert!(!cli.json_output);
    }

    #[test]
    fn test_embedded_with_flags() {
        let cli = Cli::try_parse_from([
            "tab-summarizer-icons",
            "embedded",
            "--out-dir",
            "dist/icons",
            "-v",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Embedded)));
        assert_eq!(cli.out_dir, PathBuf::from("dist/icons"));
        assert!(cli.verbose);
    }
}
