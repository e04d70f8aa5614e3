// Unknown-format hash file handling
// Scans arbitrary text for anything that looks like an MD5 or SHA1 sum

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::digest::Digest;
use super::error::{VerifyError, VerifyFailure};
use super::scanner::{find_hex_run, HashKind};

/// Where in the unknown file a hash was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashLocation {
    /// 1-based
    pub line_number: usize,
    pub line: String,
}

/// Hashes expected to be present somewhere in the directory
///
/// Keys are lowercase hex. Every sum observed on disk is removed; whatever
/// is left at the end was never found.
#[derive(Debug, Clone, Default)]
pub struct UnknownHashIndex {
    source: PathBuf,
    hashes: HashMap<String, HashLocation>,
}

impl UnknownHashIndex {
    /// An empty index attributed to `source`
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            hashes: HashMap::new(),
        }
    }

    /// Load a text file of any format and index every hash-looking string in it
    pub fn load(path: &Path) -> Result<Self, VerifyError> {
        let unreadable = |source| VerifyError::UnknownFileUnreadable {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(unreadable)?;
        Self::from_reader(BufReader::new(file), path).map_err(unreadable)
    }

    /// Build the index from any buffered reader
    pub fn from_reader(mut reader: impl BufRead, source: impl Into<PathBuf>) -> io::Result<Self> {
        let mut index = Self::new(source);
        let mut raw = Vec::new();
        let mut line_number = 0;

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            line_number += 1;

            // UTF-16 files come through as ASCII interleaved with NULs
            raw.retain(|&b| b != 0);
            if raw.last() == Some(&b'\n') {
                raw.pop();
            }
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }

            let line = String::from_utf8_lossy(&raw);
            for kind in HashKind::all() {
                if let Some(hash) = find_hex_run(&line, kind.hex_len()) {
                    index.insert(
                        hash.to_ascii_lowercase(),
                        HashLocation {
                            line_number,
                            line: line.to_string(),
                        },
                    );
                }
            }
        }

        Ok(index)
    }

    /// The file this index was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn insert(&mut self, hash: String, location: HashLocation) {
        self.hashes.insert(hash, location);
    }

    pub fn get(&self, hash: &str) -> Option<&HashLocation> {
        self.hashes.get(&hash.to_ascii_lowercase())
    }

    pub fn remove(&mut self, hash: &str) -> Option<HashLocation> {
        self.hashes.remove(&hash.to_ascii_lowercase())
    }

    /// Remove both sums of a digest, whichever are present
    pub fn remove_by_sum_pair(&mut self, digest: &Digest) {
        self.remove(&digest.md5);
        self.remove(&digest.sha1);
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HashLocation)> {
        self.hashes.iter()
    }

    /// Turn every remaining hash into a failure, ordered by where it was found
    pub fn into_failures(self) -> Vec<VerifyFailure> {
        let source = self.source;
        let mut leftovers: Vec<_> = self.hashes.into_iter().collect();
        leftovers.sort_by(|a, b| {
            a.1.line_number
                .cmp(&b.1.line_number)
                .then_with(|| a.0.cmp(&b.0))
        });
        leftovers
            .into_iter()
            .map(|(hash, location)| VerifyFailure::MissingExpectedHash {
                hash,
                source_file: source.clone(),
                location,
            })
            .collect()
    }
}
