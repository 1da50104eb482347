//! Input file handling and path utilities.

use std::path::{Path, PathBuf};

/// True for regular JPEG names (`.jpg` / `.jpeg`, any case).
pub fn is_jpeg_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".jpg") || lower.ends_with(".jpeg")
}

/// True for names the corruption process produces: either a surviving
/// JPEG extension or the ransomware rename that moves the extension to
/// the front (`jpg.IMG_0042`, `jpeg.holiday`).
pub fn is_corrupted_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.starts_with("jpg.") || lower.starts_with("jpeg.") || is_jpeg_name(name)
}

/// The `Repaired` directory beside the corrupted inputs.
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    input_dir.join("Repaired")
}

/// Collect corrupted asset candidates from a directory, sorted for
/// consistent ordering.
pub fn expand_corrupted_inputs(dir: &Path) -> Result<Vec<PathBuf>, String> {
    collect_matching(dir, is_corrupted_name)
}

/// Collect plain JPEG files from a directory, sorted.
pub fn expand_jpeg_inputs(dir: &Path) -> Result<Vec<PathBuf>, String> {
    collect_matching(dir, is_jpeg_name)
}

fn collect_matching(dir: &Path, keep: fn(&str) -> bool) -> Result<Vec<PathBuf>, String> {
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()));
    }
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if keep(name) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn name_filters_cover_both_corruption_shapes() {
        assert!(is_jpeg_name("IMG_0042.JPG"));
        assert!(is_jpeg_name("holiday.jpeg"));
        assert!(!is_jpeg_name("notes.txt"));

        assert!(is_corrupted_name("jpg.IMG_0042"));
        assert!(is_corrupted_name("JPEG.holiday"));
        assert!(is_corrupted_name("IMG_0042.jpg"));
        assert!(!is_corrupted_name("document.pdf"));
    }

    #[test]
    fn expansion_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["jpg.b", "jpg.a", "c.jpg", "skip.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("jpg.subdir")).unwrap();

        let files = expand_corrupted_inputs(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["c.jpg", "jpg.a", "jpg.b"]);

        let jpegs = expand_jpeg_inputs(dir.path()).unwrap();
        assert_eq!(jpegs.len(), 1);
    }

    #[test]
    fn expansion_rejects_missing_directory() {
        assert!(expand_jpeg_inputs(Path::new("/definitely/not/here")).is_err());
    }
}
