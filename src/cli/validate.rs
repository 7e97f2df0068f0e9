//! Validate command implementation.
//!
//! Lints definition files without rendering anything.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::expand_inputs;
use crate::error::{GlintError, Result};
use crate::output::{display_path, plural, Printer};
use crate::types::IconDef;
use crate::validation::{check_def, Severity};

/// Check definition files without rendering
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Definition files or directories to check
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        return Err(GlintError::Build {
            message: "no definition files found".to_string(),
            help: Some("Expected *.icon.yaml, *.icon.yml, or *.icon.json files".to_string()),
        });
    }

    let mut errors = 0;
    let mut warnings = 0;

    for file in &files {
        printer.status("Checking", &display_path(file));

        let def = match IconDef::load(file) {
            Ok(def) => def,
            Err(e) => {
                eprintln!("  {}: {}", printer.severity("error", true), e);
                errors += 1;
                continue;
            }
        };

        for diagnostic in check_def(&def).iter() {
            let is_error = diagnostic.severity == Severity::Error;
            eprintln!(
                "  {}: {}",
                printer.severity(&diagnostic.severity.to_string(), is_error),
                diagnostic.message
            );
            if let Some(help) = &diagnostic.help {
                eprintln!("    help: {}", help);
            }
            if is_error {
                errors += 1;
            } else {
                warnings += 1;
            }
        }
    }

    if errors > 0 {
        return Err(GlintError::Build {
            message: format!(
                "validation failed with {} and {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
            help: None,
        });
    }

    printer.success(
        "Checked",
        &format!(
            "{} ({})",
            plural(files.len(), "definition", "definitions"),
            plural(warnings, "warning", "warnings")
        ),
    );
    Ok(())
}
