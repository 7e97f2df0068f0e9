pub mod build;
pub mod completions;
pub mod init;
pub mod validate;

use clap::{Parser, Subcommand};

/// glint - icon and favicon asset generator
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render icon definitions into PNG and ICO assets
    Build(build::BuildArgs),

    /// Write a starter icon definition
    Init(init::InitArgs),

    /// Check definition files without rendering
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
