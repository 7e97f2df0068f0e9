use clap::Parser;
use miette::Result;

use glint::cli::{Cli, Commands};
use glint::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => glint::cli::build::run(args, &printer)?,
        Commands::Init(args) => glint::cli::init::run(args, &printer)?,
        Commands::Validate(args) => glint::cli::validate::run(args, &printer)?,
        Commands::Completions(args) => glint::cli::completions::run(args)?,
    }

    Ok(())
}
