//! Common test utilities for charmbundle integration tests

use std::collections::BTreeMap;
use std::path::PathBuf;

use charmbundle::CharmMeta;
use charmbundle::charm::{RelationMeta, Role};
use tempfile::TempDir;

/// A scratch directory holding bundle files and charm metadata
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace, creating parent directories
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Write `charms/<name>/metadata.yaml`
    pub fn write_charm(&self, name: &str, metadata: &str) -> PathBuf {
        self.write_file(&format!("charms/{name}/metadata.yaml"), metadata);
        self.path.join("charms").join(name)
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A charm providing and requiring interfaces `a` and `b`
#[allow(dead_code)]
pub fn symmetric_charm(name: &str) -> CharmMeta {
    CharmMeta::new(name)
        .with_relation(RelationMeta::new("prova", "a", Role::Provider))
        .with_relation(RelationMeta::new("provb", "b", Role::Provider))
        .with_relation(RelationMeta::new("reqa", "a", Role::Requirer))
        .with_relation(RelationMeta::new("reqb", "b", Role::Requirer))
}

/// Lookup table keyed by application name
#[allow(dead_code)]
pub fn charms<const N: usize>(entries: [(&str, CharmMeta); N]) -> BTreeMap<String, CharmMeta> {
    entries
        .into_iter()
        .map(|(app, charm)| (app.to_string(), charm))
        .collect()
}

/// Sorted defect messages of a failed verification
#[allow(dead_code)]
pub fn sorted(err: &charmbundle::VerificationError) -> Vec<String> {
    err.sorted_errors()
}
