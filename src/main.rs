//! Multi-Tab Summarizer icon generator
//!
//! Writes `icon16.png`, `icon48.png` and `icon128.png` for the browser extension:
//! - `generate` (default): rasterized artwork, with flat and embedded fallbacks
//! - `embedded`: the pre-baked icons shipped inside the binary

mod cli;
mod icon;
mod logging;
mod png;
mod writer;

use clap::Parser;
use cli::{exit_codes, Cli, Commands};
use writer::IconReport;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.json_output) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let chain: &[writer::IconSource] = match cli.command {
        Some(Commands::Embedded) => &writer::EMBEDDED_CHAIN,
        Some(Commands::Generate) | None => &writer::GENERATE_CHAIN,
    };

    tracing::info!(dir = %cli.out_dir.display(), "Creating icons");
    let reports = writer::write_icons(&cli.out_dir, &icon::ICON_SIZES, chain);

    if cli.json_output {
        if let Err(e) = print_json_summary(&reports) {
            eprintln!("Failed to write summary: {}", e);
            return exit_codes::UNEXPECTED_FAILURE;
        }
    } else {
        reports.iter().for_each(writer::print_report);
    }

    let written = reports.iter().filter(|r| r.is_written()).count();
    if written == reports.len() {
        if !cli.json_output {
            println!("Icon creation complete!");
        }
        exit_codes::SUCCESS
    } else {
        tracing::error!(written, total = reports.len(), "Some icons could not be created");
        exit_codes::UNEXPECTED_FAILURE
    }
}

fn print_json_summary(reports: &[IconReport]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    println!("{}", json);
    Ok(())
}
