// Manifest store
// Reads and writes the JSON map of relative file name to digest

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::digest::Digest;
use super::error::{VerifyError, VerifyFailure};

/// A collection of files and their hashed sums
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, Digest>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest, failing if it is missing or can't be parsed
    pub fn load(path: &Path) -> Result<Self, VerifyError> {
        let file = File::open(path).map_err(|source| VerifyError::ManifestUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            // serde_json reports read failures as io errors, not syntax errors
            if source.is_io() {
                VerifyError::ManifestUnreadable {
                    path: path.to_path_buf(),
                    source: source.into(),
                }
            } else {
                VerifyError::ManifestMalformed {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }

    /// Load a manifest, treating a missing file as an empty first-run baseline
    pub fn load_or_default(path: &Path) -> Result<Self, VerifyError> {
        match Self::load(path) {
            Err(VerifyError::ManifestUnreadable { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                warn!("Couldn't open manifest {}: {}. Continuing.", path.display(), source);
                Ok(Self::new())
            }
            other => other,
        }
    }

    /// Save the manifest as indented JSON, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<(), VerifyError> {
        let file = File::create(path).map_err(|e| VerifyError::unwritable(path.to_path_buf(), e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| VerifyError::unwritable(path.to_path_buf(), e))?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|e| VerifyError::unwritable(path.to_path_buf(), e))
    }

    pub fn insert(&mut self, file_name: impl Into<String>, digest: Digest) -> Option<Digest> {
        self.entries.insert(file_name.into(), digest)
    }

    pub fn get(&self, file_name: &str) -> Option<&Digest> {
        self.entries.get(file_name)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.contains_key(file_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Digest)> {
        self.entries.iter()
    }

    /// Compare a freshly computed digest with the recorded one
    ///
    /// Files the manifest doesn't know about always pass.
    pub fn verify(&self, file_name: &str, digest: &Digest) -> Option<VerifyFailure> {
        let expected = self.entries.get(file_name)?;
        if expected == digest {
            return None;
        }
        Some(VerifyFailure::DigestMismatch {
            file: file_name.to_string(),
            expected: expected.clone(),
            actual: digest.clone(),
        })
    }
}
