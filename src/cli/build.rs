//! Build command implementation.
//!
//! Renders icon definitions and writes the per-size PNG files and the
//! multi-resolution ICO container.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use notify::{EventKind, RecursiveMode, Watcher};
use serde::Serialize;

use crate::discovery::{expand_inputs, is_definition_file};
use crate::error::{GlintError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::{encode_ico, encode_png, render, IcoEntry};
use crate::types::IconDef;
use crate::validation::{check_def, Severity};

/// Render icon definitions into PNG and ICO assets
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Definition files or directories to process
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Override every definition's PNG sizes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<u32>>,

    /// Skip the ICO container
    #[arg(long)]
    pub no_ico: bool,

    /// Write a manifest.json describing the produced files
    #[arg(long)]
    pub manifest: bool,

    /// Rebuild whenever a watched definition changes
    #[arg(long)]
    pub watch: bool,
}

/// One produced file, as recorded in manifest.json. Downstream bundling
/// tools consume this instead of globbing the output directory.
#[derive(Debug, Serialize)]
struct ManifestEntry {
    file: String,
    kind: String,
    size: Option<u32>,
    bytes: usize,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    build_once(&args, printer)?;

    if args.watch {
        watch(&args, printer)?;
    }

    Ok(())
}

fn build_once(args: &BuildArgs, printer: &Printer) -> Result<()> {
    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| GlintError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        return Err(GlintError::Build {
            message: "no definition files found".to_string(),
            help: Some("Expected *.icon.yaml, *.icon.yml, or *.icon.json files".to_string()),
        });
    }

    let mut manifest: Vec<ManifestEntry> = Vec::new();
    let mut total = 0;
    for file in &files {
        total += build_definition(file, args, printer, &mut manifest)?;
    }

    if args.manifest {
        let path = args.output.join("manifest.json");
        let json = serde_json::to_string_pretty(&manifest).map_err(|e| GlintError::Build {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })?;
        fs::write(&path, json).map_err(|e| GlintError::Io {
            path: path.clone(),
            message: format!("Failed to write manifest: {}", e),
        })?;
        total += 1;
    }

    printer.success(
        "Finished",
        &format!(
            "{} in {}",
            plural(total, "asset", "assets"),
            display_path(&args.output)
        ),
    );

    Ok(())
}

/// Render one definition. Returns the number of files written.
fn build_definition(
    path: &Path,
    args: &BuildArgs,
    printer: &Printer,
    manifest: &mut Vec<ManifestEntry>,
) -> Result<usize> {
    let def = IconDef::load(path)?;
    let name = def.name.clone().unwrap_or_else(|| base_name(path));

    for diagnostic in check_def(&def).iter() {
        if diagnostic.severity == Severity::Warning {
            printer.warning("Warning", &format!("{}: {}", name, diagnostic.message));
        }
    }

    let params = def.resolve()?;

    let mut sizes = args.sizes.clone().unwrap_or_else(|| def.sizes.clone());
    sizes.sort_unstable();
    sizes.dedup();
    if sizes.is_empty() {
        return Err(GlintError::Build {
            message: format!("no export sizes requested for {}", name),
            help: Some("List at least one size, e.g. sizes: [16, 32, 256]".to_string()),
        });
    }

    printer.status(
        "Rendering",
        &format!("{} ({})", name, plural(sizes.len(), "size", "sizes")),
    );

    // Every size is rendered from scratch; the encoded bytes are kept
    // around so container sizes overlapping the PNG set encode only once.
    let mut encoded: BTreeMap<u32, Vec<u8>> = BTreeMap::new();
    let mut produced = 0;

    for &size in &sizes {
        let pixmap = render(&params, size)?;
        let bytes = encode_png(&pixmap)?;

        let file = format!("{}-{}.png", name, size);
        let out = args.output.join(&file);
        fs::write(&out, &bytes).map_err(|e| GlintError::Io {
            path: out.clone(),
            message: format!("Failed to write PNG: {}", e),
        })?;
        println!("  {} -> {}", name, display_path(&out));

        manifest.push(ManifestEntry {
            file,
            kind: "png".to_string(),
            size: Some(size),
            bytes: bytes.len(),
        });
        encoded.insert(size, bytes);
        produced += 1;
    }

    if !args.no_ico && !def.ico_sizes.is_empty() {
        let mut entries = Vec::with_capacity(def.ico_sizes.len());
        for &size in &def.ico_sizes {
            let bytes = match encoded.get(&size) {
                Some(bytes) => bytes.clone(),
                None => {
                    let pixmap = render(&params, size)?;
                    encode_png(&pixmap)?
                }
            };
            entries.push(IcoEntry::new(size, bytes));
        }

        // All container images are encoded by now; a failure above means
        // no partial container ever hits the disk.
        let ico_bytes = encode_ico(&entries)?;
        let file = format!("{}.ico", name);
        let out = args.output.join(&file);
        fs::write(&out, &ico_bytes).map_err(|e| GlintError::Io {
            path: out.clone(),
            message: format!("Failed to write ICO: {}", e),
        })?;
        println!("  {} -> {}", name, display_path(&out));

        manifest.push(ManifestEntry {
            file,
            kind: "ico".to_string(),
            size: None,
            bytes: ico_bytes.len(),
        });
        produced += 1;
    }

    Ok(produced)
}

/// Asset base name for a definition path: the file name with the
/// definition suffix removed.
fn base_name(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("icon");
    for suffix in [".icon.yaml", ".icon.yml", ".icon.json"] {
        if let Some(stripped) = name.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    path.file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("icon")
        .to_string()
}

/// Rebuild whenever a watched definition file changes.
fn watch(args: &BuildArgs, printer: &Printer) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(|e| GlintError::Build {
        message: format!("Failed to start file watcher: {}", e),
        help: None,
    })?;

    for input in &args.inputs {
        let mode = if input.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(input, mode).map_err(|e| GlintError::Build {
            message: format!("Failed to watch {}: {}", input.display(), e),
            help: None,
        })?;
    }

    printer.info("Watching", "definition files (ctrl-c to stop)");

    for event in rx {
        match event {
            Ok(event) if touches_definition(&event, &args.inputs) => {
                if let Err(e) = build_once(args, printer) {
                    printer.error("Failed", &e.to_string());
                }
            }
            Ok(_) => {}
            Err(e) => printer.error("Watch", &e.to_string()),
        }
    }

    Ok(())
}

fn touches_definition(event: &notify::Event, inputs: &[PathBuf]) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| is_definition_file(p) || inputs.iter().any(|input| p.ends_with(input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args_for(inputs: Vec<PathBuf>, output: PathBuf) -> BuildArgs {
        BuildArgs {
            inputs,
            output,
            sizes: None,
            no_ico: false,
            manifest: false,
            watch: false,
        }
    }

    #[test]
    fn test_build_writes_pngs_and_ico() {
        let dir = tempdir().unwrap();
        let def_path = dir.path().join("app.icon.yaml");
        let output = dir.path().join("dist");

        fs::write(
            &def_path,
            "gradient: radial\nshape: circle\nsizes: [8, 16]\nico_sizes: [8, 16]\n",
        )
        .unwrap();

        run(args_for(vec![def_path], output.clone()), &Printer::new()).unwrap();

        let png = output.join("app-16.png");
        assert!(png.exists());
        assert!(output.join("app-8.png").exists());

        let img = image::open(&png).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);

        let ico = fs::read(output.join("app.ico")).unwrap();
        assert_eq!(u16::from_le_bytes([ico[4], ico[5]]), 2);
    }

    #[test]
    fn test_build_no_ico_flag() {
        let dir = tempdir().unwrap();
        let def_path = dir.path().join("app.icon.yaml");
        let output = dir.path().join("dist");

        fs::write(&def_path, "sizes: [8]\n").unwrap();

        let mut args = args_for(vec![def_path], output.clone());
        args.no_ico = true;
        run(args, &Printer::new()).unwrap();

        assert!(output.join("app-8.png").exists());
        assert!(!output.join("app.ico").exists());
    }

    #[test]
    fn test_build_sizes_override() {
        let dir = tempdir().unwrap();
        let def_path = dir.path().join("app.icon.yaml");
        let output = dir.path().join("dist");

        fs::write(&def_path, "sizes: [8]\nico_sizes: []\n").unwrap();

        let mut args = args_for(vec![def_path], output.clone());
        args.sizes = Some(vec![12]);
        run(args, &Printer::new()).unwrap();

        assert!(output.join("app-12.png").exists());
        assert!(!output.join("app-8.png").exists());
    }

    #[test]
    fn test_build_respects_definition_name() {
        let dir = tempdir().unwrap();
        let def_path = dir.path().join("whatever.icon.yaml");
        let output = dir.path().join("dist");

        fs::write(&def_path, "name: branded\nsizes: [8]\nico_sizes: []\n").unwrap();

        run(args_for(vec![def_path], output.clone()), &Printer::new()).unwrap();
        assert!(output.join("branded-8.png").exists());
    }

    #[test]
    fn test_build_writes_manifest() {
        let dir = tempdir().unwrap();
        let def_path = dir.path().join("app.icon.yaml");
        let output = dir.path().join("dist");

        fs::write(&def_path, "sizes: [8, 16]\nico_sizes: [8]\n").unwrap();

        let mut args = args_for(vec![def_path], output.clone());
        args.manifest = true;
        run(args, &Printer::new()).unwrap();

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output.join("manifest.json")).unwrap())
                .unwrap();
        let assets = manifest.as_array().unwrap();
        assert_eq!(assets.len(), 3);
        assert!(assets.iter().any(|a| a["kind"] == "ico"));
        assert!(assets.iter().all(|a| a["bytes"].as_u64().unwrap() > 0));
    }

    #[test]
    fn test_build_rejects_empty_sizes() {
        let dir = tempdir().unwrap();
        let def_path = dir.path().join("app.icon.yaml");

        fs::write(&def_path, "sizes: []\nico_sizes: []\n").unwrap();

        let result = run(
            args_for(vec![def_path], dir.path().join("dist")),
            &Printer::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_bad_colour_before_writing() {
        let dir = tempdir().unwrap();
        let def_path = dir.path().join("app.icon.yaml");
        let output = dir.path().join("dist");

        fs::write(&def_path, "color_a: \"#zzz\"\nsizes: [8]\n").unwrap();

        let result = run(args_for(vec![def_path], output.clone()), &Printer::new());
        assert!(result.is_err());
        assert!(!output.join("app-8.png").exists());
    }

    #[test]
    fn test_build_scans_directories() {
        let dir = tempdir().unwrap();
        let icons = dir.path().join("icons");
        fs::create_dir_all(&icons).unwrap();
        fs::write(icons.join("one.icon.yaml"), "sizes: [8]\nico_sizes: []\n").unwrap();
        fs::write(icons.join("two.icon.yaml"), "sizes: [8]\nico_sizes: []\n").unwrap();

        let output = dir.path().join("dist");
        run(args_for(vec![icons], output.clone()), &Printer::new()).unwrap();

        assert!(output.join("one-8.png").exists());
        assert!(output.join("two-8.png").exists());
    }

    #[test]
    fn test_build_errors_on_missing_definitions() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty");
        fs::create_dir_all(&empty).unwrap();

        let result = run(
            args_for(vec![empty], dir.path().join("dist")),
            &Printer::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_base_name_strips_definition_suffix() {
        assert_eq!(base_name(Path::new("icons/app.icon.yaml")), "app");
        assert_eq!(base_name(Path::new("app.icon.json")), "app");
        assert_eq!(base_name(Path::new("plain.yaml")), "plain");
    }
}
