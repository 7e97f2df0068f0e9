//! Init command implementation.
//!
//! Writes a commented starter definition to build on.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{GlintError, Result};
use crate::output::{display_path, Printer};

/// Write a starter icon definition
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the definition in (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Base name for the definition file and its assets
    #[arg(long, default_value = "icon")]
    pub name: String,

    /// Overwrite an existing definition
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let file_name = format!("{}.icon.yaml", args.name);
    let def_path = args.path.join(&file_name);

    if def_path.exists() && !args.force {
        return Err(GlintError::Build {
            message: format!("{} already exists", file_name),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::write(&def_path, starter(&args.name)).map_err(|e| GlintError::Io {
        path: def_path.clone(),
        message: format!("Failed to write definition: {}", e),
    })?;

    printer.success("Created", &display_path(&def_path));
    Ok(())
}

fn starter(name: &str) -> String {
    format!(
        r##"# glint icon definition
name: {name}
gradient: linear        # linear | radial | conic
color_a: "#4f46e5"
color_b: "#ec4899"
angle: 45               # degrees, linear and conic only
shape: squircle         # circle | rounded-square | squircle
padding: 8              # percent of the half-canvas, 0-20
stroke_width: 0         # on a 1024-unit reference canvas, 0-20
stroke_color: "#ffffff"
glow: false
background: transparent # transparent | solid | paper
# bg_color: "#0f172a"   # used when background: solid
sizes: [16, 32, 48, 64, 128, 256]
ico_sizes: [16, 32, 48, 64, 128, 256]
"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IconDef;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_definition() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            name: "icon".to_string(),
            force: false,
        };
        run(args, &Printer::new()).unwrap();

        let path = dir.path().join("icon.icon.yaml");
        assert!(path.exists());

        // The starter must parse and resolve as written.
        let def = IconDef::load(&path).unwrap();
        assert_eq!(def.name.as_deref(), Some("icon"));
        def.resolve().unwrap();
    }

    #[test]
    fn test_init_errors_if_definition_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("icon.icon.yaml"), "name: old\n").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            name: "icon".to_string(),
            force: false,
        };
        assert!(run(args, &Printer::new()).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("icon.icon.yaml"), "name: old\n").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            name: "icon".to_string(),
            force: true,
        };
        run(args, &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join("icon.icon.yaml")).unwrap();
        assert!(content.contains("gradient: linear"));
    }

    #[test]
    fn test_init_custom_name() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            name: "my-app".to_string(),
            force: false,
        };
        run(args, &Printer::new()).unwrap();

        let def = IconDef::load(&dir.path().join("my-app.icon.yaml")).unwrap();
        assert_eq!(def.name.as_deref(), Some("my-app"));
    }
}
