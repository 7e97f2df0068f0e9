//! Definition file discovery.
//!
//! Directories passed to `build` or `validate` are scanned recursively for
//! icon definition files, recognised by the double-extension convention
//! (`*.icon.yaml` and friends).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{GlintError, Result};

/// File name suffixes recognised as icon definitions.
const DEF_SUFFIXES: &[&str] = &[".icon.yaml", ".icon.yml", ".icon.json"];

/// Check whether a path looks like an icon definition file.
pub fn is_definition_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| DEF_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
        .unwrap_or(false)
}

/// Recursively collect definition files under a directory.
///
/// Results are sorted so build order (and therefore status output) is
/// deterministic.
pub fn find_definitions(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| GlintError::Io {
            path: root.to_path_buf(),
            message: format!("Failed to scan directory: {}", e),
        })?;

        if entry.file_type().is_file() && is_definition_file(entry.path()) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    Ok(found)
}

/// Expand a mixed list of files and directories into definition files.
///
/// Files are passed through untouched so users can build a definition that
/// does not follow the naming convention; directories are scanned.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_definitions(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_definition_file() {
        assert!(is_definition_file(Path::new("app.icon.yaml")));
        assert!(is_definition_file(Path::new("nested/dir/app.icon.yml")));
        assert!(is_definition_file(Path::new("app.icon.json")));
        assert!(!is_definition_file(Path::new("app.yaml")));
        assert!(!is_definition_file(Path::new("icon.png")));
    }

    #[test]
    fn test_find_definitions_recurses_and_sorts() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons/nested")).unwrap();
        fs::write(dir.path().join("icons/b.icon.yaml"), "{}").unwrap();
        fs::write(dir.path().join("icons/nested/a.icon.yaml"), "{}").unwrap();
        fs::write(dir.path().join("icons/readme.md"), "not a definition").unwrap();

        let found = find_definitions(dir.path()).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("icons/b.icon.yaml"));
        assert!(found[1].ends_with("icons/nested/a.icon.yaml"));
    }

    #[test]
    fn test_expand_inputs_mixes_files_and_dirs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.icon.yaml"), "{}").unwrap();
        let loose = dir.path().join("loose.yaml");
        fs::write(&loose, "{}").unwrap();

        let found =
            expand_inputs(&[dir.path().to_path_buf(), loose.clone()]).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&loose));
    }
}
