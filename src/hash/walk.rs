// Directory walking module
// Recursively lists every node under the root and streams it to the next stage

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use jwalk::{Parallelism, WalkDir};
use tracing::debug;

use super::cancel::CancelToken;
use super::error::VerifyError;
use super::path_utils;

/// One filesystem node found by the walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the root, using the platform separator
    pub relative_name: String,
    pub absolute_path: PathBuf,
    pub is_directory: bool,
}

impl FileEntry {
    pub fn new(root: &Path, path: PathBuf, is_directory: bool) -> Self {
        Self {
            relative_name: path_utils::relative_name(&path, root),
            absolute_path: path,
            is_directory,
        }
    }
}

/// Canonicalize the root and make sure it is a directory we can list
pub fn check_root(root: &Path) -> Result<PathBuf, VerifyError> {
    let unreadable = |source| VerifyError::DirectoryUnreadable {
        path: root.to_path_buf(),
        source,
    };
    let canonical = root.canonicalize().map_err(unreadable)?;
    let metadata = fs::metadata(&canonical).map_err(unreadable)?;
    if !metadata.is_dir() {
        return Err(unreadable(io::Error::other("not a directory")));
    }
    // Listing fails here for directories without read permission
    fs::read_dir(&canonical).map_err(unreadable)?;
    Ok(canonical)
}

/// Walk `root` and send one entry per node, except the root itself
///
/// Traversal is serial and sorted so the order is deterministic for a given
/// directory snapshot. Any traversal error raises the token and ends the walk.
pub fn walk_stage(
    root: &Path,
    output: Sender<FileEntry>,
    token: &CancelToken,
) -> Result<(), VerifyError> {
    let walker = WalkDir::new(root)
        .parallelism(Parallelism::Serial)
        .sort(true)
        .skip_hidden(false) // Don't skip hidden files
        .follow_links(false) // Don't follow symlinks to avoid loops
        .min_depth(1);

    for entry_result in walker {
        if token.is_cancelled() {
            return Ok(());
        }

        let mut entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                token.cancel();
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                return Err(VerifyError::DirectoryUnreadable {
                    path,
                    source: io::Error::other(e),
                });
            }
        };

        // jwalk yields a directory it failed to list as an Ok entry
        if let Some(e) = entry.read_children_error.take() {
            token.cancel();
            return Err(VerifyError::DirectoryUnreadable {
                path: entry.path(),
                source: io::Error::other(e),
            });
        }

        let file_entry = FileEntry::new(root, entry.path(), entry.file_type().is_dir());
        if output.send(file_entry).is_err() {
            // Receiver has been dropped, stop walking
            break;
        }
    }

    debug!(root = %root.display(), "walk finished");
    Ok(())
}
