use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Extensions accepted as wallpaper images (matched case-insensitively).
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif"];

/// Collects image files from `dir` (non-recursive), sorted lexicographically
/// by file name so the slideshow order is stable across runs.
///
/// `exclude` holds exact basenames to skip (OS metadata such as `.DS_Store`).
/// An empty directory is not an error here: the caller emits a fallback
/// stylesheet instead.
pub fn scan_image_files(dir: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read directory entry in {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if !IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|s| s.to_str())
            && exclude.iter().any(|excluded| excluded == name)
        {
            continue;
        }
        paths.push(path);
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn filters_and_sorts_by_basename() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "zebra.png");
        touch(dir.path(), "alpha.jpg");
        touch(dir.path(), "middle.webp");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "archive.zip");

        let paths = scan_image_files(dir.path(), &[]).unwrap();
        assert_eq!(names(&paths), vec!["alpha.jpg", "middle.webp", "zebra.png"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "upper.JPG");
        touch(dir.path(), "mixed.PnG");

        let paths = scan_image_files(dir.path(), &[]).unwrap();
        assert_eq!(names(&paths), vec!["mixed.PnG", "upper.JPG"]);
    }

    #[test]
    fn excluded_basenames_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "keep.png");
        touch(dir.path(), "Thumbs.db");
        // an excluded name wins even with an image extension
        touch(dir.path(), "cover.gif");

        let exclude = vec!["Thumbs.db".to_string(), "cover.gif".to_string()];
        let paths = scan_image_files(dir.path(), &exclude).unwrap();
        assert_eq!(names(&paths), vec!["keep.png"]);
    }

    #[test]
    fn subdirectories_and_extensionless_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        touch(dir.path(), "README");
        touch(dir.path(), "real.jpeg");

        let paths = scan_image_files(dir.path(), &[]).unwrap();
        assert_eq!(names(&paths), vec!["real.jpeg"]);
    }

    #[test]
    fn empty_directory_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let paths = scan_image_files(dir.path(), &[]).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(scan_image_files(&missing, &[]).is_err());
    }
}
