//! Command helper utilities

use std::path::{Path, PathBuf};

use charmbundle::BundleData;
use charmbundle::error::{self, Result};

/// Whether a bundle file should be read and written as JSON
pub fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read and parse a bundle file, choosing the codec by extension
pub fn load_bundle(path: &Path) -> Result<BundleData> {
    if !path.is_file() {
        return Err(error::file_not_found(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| error::file_read_failed(path.display().to_string(), e.to_string()))?;
    tracing::debug!(path = %path.display(), "loaded bundle file");
    if is_json(path) {
        BundleData::from_json(&content)
    } else {
        BundleData::from_yaml(&content)
    }
}

/// Directory a bundle file lives in, `.` for a bare file name
pub fn bundle_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json() {
        assert!(is_json(Path::new("bundle.json")));
        assert!(is_json(Path::new("dir/BUNDLE.JSON")));
        assert!(!is_json(Path::new("bundle.yaml")));
        assert!(!is_json(Path::new("bundle")));
    }

    #[test]
    fn test_bundle_dir() {
        assert_eq!(bundle_dir(Path::new("bundle.yaml")), PathBuf::from("."));
        assert_eq!(bundle_dir(Path::new("a/b/bundle.yaml")), PathBuf::from("a/b"));
    }

    #[test]
    fn test_load_bundle_missing_file() {
        let err = load_bundle(Path::new("/nonexistent/bundle.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bundle.yaml"));
    }

    #[test]
    fn test_load_bundle_by_extension() {
        let temp = tempfile::TempDir::new().unwrap();
        let yaml = temp.path().join("bundle.yaml");
        std::fs::write(&yaml, "applications:\n  mysql:\n    charm: mysql\n").unwrap();
        let json = temp.path().join("bundle.json");
        std::fs::write(&json, r#"{"applications": {"mysql": {"charm": "mysql"}}}"#).unwrap();

        assert_eq!(load_bundle(&yaml).unwrap(), load_bundle(&json).unwrap());
    }
}
