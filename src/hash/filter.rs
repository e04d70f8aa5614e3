// File filtering stage
// Only regular files other than the manifest reach the hasher

use std::path::Path;

use crossbeam_channel::{select, Receiver, Sender};

use super::cancel::CancelToken;
use super::path_utils;
use super::walk::FileEntry;

/// Returns true if the entry should be hashed
pub fn should_hash(entry: &FileEntry, manifest_name: Option<&str>) -> bool {
    if entry.is_directory {
        return false;
    }
    match manifest_name {
        Some(name) => {
            path_utils::clean_path(Path::new(&entry.relative_name))
                != path_utils::clean_path(Path::new(name))
        }
        None => true,
    }
}

/// Forward hashable entries, in order, until the input closes or the token is raised
pub fn filter_stage(
    input: Receiver<FileEntry>,
    output: Sender<FileEntry>,
    manifest_name: Option<&str>,
    token: &CancelToken,
) {
    loop {
        let entry = select! {
            recv(token.done()) -> _ => return,
            recv(input) -> msg => match msg {
                Ok(entry) => entry,
                Err(_) => return,
            },
        };
        if token.is_cancelled() {
            return;
        }
        if should_hash(&entry, manifest_name) && output.send(entry).is_err() {
            return;
        }
    }
}
