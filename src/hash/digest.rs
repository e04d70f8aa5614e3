// Digest computation module
// Streams a file once through MD5 and SHA1 and emits the hex sums

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crossbeam_channel::{select, Receiver, Sender};
use md5::{Digest as Md5Digest, Md5};
use serde::{Deserialize, Serialize};
use sha1::{Digest as Sha1Digest, Sha1};
use tracing::debug;

use super::cancel::CancelToken;
use super::error::VerifyError;
use super::walk::FileEntry;

/// Read buffer for streaming file contents
const CHUNK_SIZE: usize = 64 * 1024;

/// The pair of hex sums recorded for every file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    #[serde(rename = "MD5")]
    pub md5: String,
    #[serde(rename = "SHA1")]
    pub sha1: String,
}

impl Digest {
    pub fn new(md5: impl Into<String>, sha1: impl Into<String>) -> Self {
        Self {
            md5: md5.into(),
            sha1: sha1.into(),
        }
    }
}

// Hex case is irrelevant when comparing sums
impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.md5.eq_ignore_ascii_case(&other.md5) && self.sha1.eq_ignore_ascii_case(&other.sha1)
    }
}

impl Eq for Digest {}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "md5:{} sha1:{}", self.md5, self.sha1)
    }
}

/// A computed digest together with the relative name of the file it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    pub file_name: String,
    pub digest: Digest,
}

/// Stream a reader through both hashers in fixed-size chunks
pub fn compute_digest(mut reader: impl Read) -> io::Result<Digest> {
    let mut md5 = Md5::new();
    let mut sha1 = Sha1::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        Md5Digest::update(&mut md5, &buffer[..bytes_read]);
        Sha1Digest::update(&mut sha1, &buffer[..bytes_read]);
    }

    Ok(Digest {
        md5: hex::encode(md5.finalize()),
        sha1: hex::encode(sha1.finalize()),
    })
}

/// Compute the digest of a file on disk
pub fn compute_file_digest(path: &Path) -> Result<Digest, VerifyError> {
    let unreadable = |source| VerifyError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unreadable)?;
    compute_digest(file).map_err(unreadable)
}

/// Hash every entry from the input channel and send the results downstream
///
/// The first file that can't be read raises the cancellation token and ends
/// the stage; nothing is emitted for that file or any later one.
pub fn digest_stage(
    input: Receiver<FileEntry>,
    output: Sender<FileDigest>,
    token: &CancelToken,
) -> Result<(), VerifyError> {
    loop {
        let entry = select! {
            recv(token.done()) -> _ => return Ok(()),
            recv(input) -> msg => match msg {
                Ok(entry) => entry,
                Err(_) => return Ok(()),
            },
        };
        if token.is_cancelled() {
            return Ok(());
        }

        let digest = match compute_file_digest(&entry.absolute_path) {
            Ok(digest) => digest,
            Err(e) => {
                token.cancel();
                return Err(e);
            }
        };

        // A file that finished hashing after cancellation is not reported
        if token.is_cancelled() {
            return Ok(());
        }

        debug!(file = %entry.relative_name, "digest computed");
        let result = FileDigest {
            file_name: entry.relative_name,
            digest,
        };
        if output.send(result).is_err() {
            // Receiver has been dropped, stop hashing
            return Ok(());
        }
    }
}
