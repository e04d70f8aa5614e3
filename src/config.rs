//! Run configuration.
//!
//! Built once at startup and handed to the verifier.

use std::path::PathBuf;

/// Default manifest file name, stored in the root directory.
pub const DEFAULT_MANIFEST_NAME: &str = "manifest.json";

/// Verification run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Root folder to hash.
    pub root: PathBuf,
    /// Manifest file name, relative to the root. `None` disables load and save.
    pub manifest_name: Option<String>,
    /// Text file in an unknown format whose hashes must all be present in the root.
    pub unknown_file: Option<PathBuf>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            manifest_name: Some(DEFAULT_MANIFEST_NAME.to_string()),
            unknown_file: None,
        }
    }
}

impl VerifyConfig {
    /// Configuration for `root` with the default manifest name.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Set the manifest name. An empty name disables the manifest.
    pub fn with_manifest(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.manifest_name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Hash and check the unknown file only, without loading or saving a manifest.
    pub fn without_manifest(mut self) -> Self {
        self.manifest_name = None;
        self
    }

    pub fn with_unknown_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.unknown_file = Some(path.into());
        self
    }

    /// Full path of the manifest file under `root`.
    pub fn manifest_path(&self, root: &std::path::Path) -> Option<PathBuf> {
        self.manifest_name.as_ref().map(|name| root.join(name))
    }
}
