// Centralized error handling module
// Fatal errors abort a run, failures are collected into the report

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::digest::Digest;
use super::unknown::HashLocation;

/// Errors that stop a verification run
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("cannot read directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read file {}: {source}", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't understand manifest file format {}: {source}", .path.display())]
    ManifestMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("couldn't open manifest {}: {source}", .path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't write manifest {}: {source}", .path.display())]
    ManifestUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't scan file for hashes {}: {source}", .path.display())]
    UnknownFileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{stage} stage panicked")]
    StagePanicked { stage: &'static str },
}

impl VerifyError {
    /// Wrap a manifest write failure, accepting either an io or a serde error
    pub(crate) fn unwritable(path: PathBuf, source: impl Into<io::Error>) -> Self {
        VerifyError::ManifestUnwritable {
            path,
            source: source.into(),
        }
    }
}

/// A verification problem that is recorded and reported, but doesn't stop the run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyFailure {
    /// The old manifest recorded a different digest for this file
    #[error("{file}: manifest has {expected}, computed {actual}")]
    DigestMismatch {
        file: String,
        expected: Digest,
        actual: Digest,
    },

    /// A hash listed in the unknown-format file matched no file on disk
    #[error(
        "hash {hash} was in {} line {}, but not found in dir: {}",
        .source_file.display(),
        .location.line_number,
        .location.line
    )]
    MissingExpectedHash {
        hash: String,
        source_file: PathBuf,
        location: HashLocation,
    },
}
