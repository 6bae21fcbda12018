//! Go source discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::Result;

/// Directories the Go tool itself ignores when matching `./...`
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata"];

/// Every `.go` file under `root`, sorted
///
/// A file path is returned as is, whatever its extension. Hidden
/// directories, `vendor` and `testdata` are not entered.
pub fn collect_go_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "go") {
            files.push(entry.into_path());
        }
    }

    files.sort();
    tracing::debug!(root = %root.display(), files = files.len(), "Discovered Go files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, relative: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "package p\n").unwrap();
    }

    #[test]
    fn test_skips_hidden_vendor_and_testdata() {
        let dir = TempDir::new().unwrap();
        for file in [
            "b.go",
            "a.go",
            "notes.txt",
            "sub/c.go",
            ".git/d.go",
            "vendor/e.go",
            "testdata/f.go",
            "sub/testdata/g.go",
        ] {
            touch(dir.path(), file);
        }

        let files: Vec<String> = collect_go_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(files, vec!["a.go", "b.go", "sub/c.go"]);
    }

    #[test]
    fn test_file_argument_is_kept() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "testdata/only.go");
        let path = dir.path().join("testdata/only.go");

        assert_eq!(collect_go_files(&path).unwrap(), vec![path]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(collect_go_files(dir.path().join("missing")).is_err());
    }
}
