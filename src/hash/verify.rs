// Verification module
// Hashes a folder and checks it against the old manifest and an unknown hash list

use std::path::PathBuf;

use crossbeam_channel::Receiver;
use tracing::{error, info};

use super::cancel::CancelToken;
use super::digest::FileDigest;
use super::error::{VerifyError, VerifyFailure};
use super::manifest::Manifest;
use super::pipeline::Pipeline;
use super::unknown::UnknownHashIndex;
use super::walk::check_root;
use crate::config::VerifyConfig;

/// Report of a verification run
#[derive(Debug)]
pub struct VerifyReport {
    /// Digests of every file hashed in this run
    pub manifest: Manifest,
    pub files_hashed: usize,
    pub failures: Vec<VerifyFailure>,
    /// Where the new manifest was written, if it was
    pub saved_to: Option<PathBuf>,
}

impl VerifyReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &VerifyFailure> {
        self.failures
            .iter()
            .filter(|f| matches!(f, VerifyFailure::DigestMismatch { .. }))
    }

    pub fn missing_hashes(&self) -> impl Iterator<Item = &VerifyFailure> {
        self.failures
            .iter()
            .filter(|f| matches!(f, VerifyFailure::MissingExpectedHash { .. }))
    }
}

/// Engine that hashes a folder, verifies it and saves the new manifest
pub struct FolderVerifier {
    config: VerifyConfig,
}

impl FolderVerifier {
    pub fn new(config: VerifyConfig) -> Self {
        Self { config }
    }

    /// Run one full verification
    ///
    /// Fatal problems come back as `Err`. Digest mismatches and missing
    /// expected hashes are collected in the report; when there are any the
    /// manifest on disk is left untouched.
    pub fn run(&self) -> Result<VerifyReport, VerifyError> {
        let root = check_root(&self.config.root)?;
        let manifest_path = self.config.manifest_path(&root);

        let old_manifest = match &manifest_path {
            Some(path) => Manifest::load_or_default(path)?,
            None => Manifest::new(),
        };
        let mut unknown = match &self.config.unknown_file {
            Some(path) => Some(UnknownHashIndex::load(path)?),
            None => None,
        };

        let token = CancelToken::new();
        let pipeline = Pipeline::spawn(root, self.config.manifest_name.clone(), &token);
        let (manifest, mut failures) =
            verify_files(pipeline.results(), &old_manifest, unknown.as_mut());
        pipeline.join()?;

        if let Some(index) = unknown {
            for failure in index.into_failures() {
                error!("{}", failure);
                failures.push(failure);
            }
        }

        let mut report = VerifyReport {
            files_hashed: manifest.len(),
            manifest,
            failures,
            saved_to: None,
        };

        if !report.is_success() {
            error!(
                failures = report.failures.len(),
                "Some hashes failed, manifest not updated."
            );
            return Ok(report);
        }

        if let Some(path) = manifest_path {
            report.manifest.save(&path)?;
            info!("Saved manifest to {}", path.display());
            report.saved_to = Some(path);
        }

        Ok(report)
    }
}

/// Fold the digest stream into a new manifest
///
/// Every result is checked against the old manifest and removed from the
/// unknown index. Mismatches are collected; the stream is always drained.
pub fn verify_files(
    results: &Receiver<FileDigest>,
    old_manifest: &Manifest,
    mut unknown: Option<&mut UnknownHashIndex>,
) -> (Manifest, Vec<VerifyFailure>) {
    let mut manifest = Manifest::new();
    let mut failures = Vec::new();

    for FileDigest { file_name, digest } in results.iter() {
        if let Some(failure) = old_manifest.verify(&file_name, &digest) {
            error!("{}", failure);
            failures.push(failure);
        }
        if let Some(index) = unknown.as_deref_mut() {
            index.remove_by_sum_pair(&digest);
        }
        info!("{}\tmd5:{}\tsha1:{}", file_name, digest.md5, digest.sha1);
        manifest.insert(file_name, digest);
    }

    (manifest, failures)
}
