// Tests for digest computation

use std::io::{self, Cursor, Read};
use std::path::Path;

use crossbeam_channel::unbounded;
use md5::{Digest as _, Md5};
use sha1::Sha1;
use verify_manifest::hash::{
    compute_digest, compute_file_digest, digest_stage, CancelToken, Digest, FileEntry, VerifyError,
};

use super::{create_test_file, A_MD5, A_SHA1, B_MD5, B_SHA1};

fn file_entry(root: &Path, name: &str) -> FileEntry {
    FileEntry::new(root, root.join(name), false)
}

#[test]
fn test_compute_file_digest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    create_test_file(&path, b"a");

    let digest = compute_file_digest(&path).unwrap();

    assert_eq!(digest.md5, A_MD5);
    assert_eq!(digest.sha1, A_SHA1);
}

#[test]
fn test_empty_input() {
    let digest = compute_digest(io::empty()).unwrap();
    assert_eq!(digest.md5, "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(digest.sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
}

#[test]
fn test_input_spanning_several_chunks() {
    let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();

    let digest = compute_digest(Cursor::new(data.clone())).unwrap();

    assert_eq!(digest.md5, hex::encode(Md5::digest(&data)));
    assert_eq!(digest.sha1, hex::encode(Sha1::digest(&data)));
}

struct FailingReader {
    served: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::new(io::ErrorKind::Other, "device went away"));
        }
        self.served = true;
        buf[0] = b'a';
        Ok(1)
    }
}

#[test]
fn test_read_error_mid_stream() {
    let err = compute_digest(FailingReader { served: false }).unwrap_err();
    assert_eq!(err.to_string(), "device went away");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noexist");

    match compute_file_digest(&path) {
        Err(VerifyError::FileUnreadable { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_digest_equality_ignores_case() {
    let lower = Digest::new(A_MD5, A_SHA1);
    let upper = Digest::new(A_MD5.to_uppercase(), A_SHA1.to_uppercase());
    assert_eq!(lower, upper);
    assert_ne!(lower, Digest::new(A_MD5, B_SHA1));
    assert_ne!(lower, Digest::new(B_MD5, A_SHA1));
}

#[test]
fn test_digest_display() {
    let digest = Digest::new(A_MD5, A_SHA1);
    assert_eq!(digest.to_string(), format!("md5:{} sha1:{}", A_MD5, A_SHA1));
}

#[test]
fn test_digest_stage_streams_results() {
    let dir = tempfile::tempdir().unwrap();
    super::create_ab_folder(dir.path());
    let (in_tx, in_rx) = unbounded();
    let (out_tx, out_rx) = unbounded();
    in_tx.send(file_entry(dir.path(), "a.txt")).unwrap();
    in_tx.send(file_entry(dir.path(), "b.txt")).unwrap();
    drop(in_tx);

    let token = CancelToken::new();
    digest_stage(in_rx, out_tx, &token).unwrap();

    let results: Vec<_> = out_rx.iter().collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].file_name, "a.txt");
    assert_eq!(results[0].digest, Digest::new(A_MD5, A_SHA1));
    assert_eq!(results[1].file_name, "b.txt");
    assert_eq!(results[1].digest, Digest::new(B_MD5, B_SHA1));
    assert!(!token.is_cancelled());
}

#[test]
fn test_digest_stage_cancels_on_unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    super::create_ab_folder(dir.path());
    let (in_tx, in_rx) = unbounded();
    let (out_tx, out_rx) = unbounded();
    in_tx.send(file_entry(dir.path(), "a.txt")).unwrap();
    in_tx.send(file_entry(dir.path(), "noexist")).unwrap();
    in_tx.send(file_entry(dir.path(), "b.txt")).unwrap();
    drop(in_tx);

    let token = CancelToken::new();
    let err = digest_stage(in_rx, out_tx, &token).unwrap_err();

    assert!(matches!(err, VerifyError::FileUnreadable { .. }));
    assert!(token.is_cancelled());
    // Only the result produced before the failure made it downstream
    let names: Vec<_> = out_rx.iter().map(|r| r.file_name).collect();
    assert_eq!(names, vec!["a.txt"]);
}

#[test]
fn test_digest_stage_after_cancel() {
    let dir = tempfile::tempdir().unwrap();
    super::create_ab_folder(dir.path());
    let (in_tx, in_rx) = unbounded();
    let (out_tx, out_rx) = unbounded();
    in_tx.send(file_entry(dir.path(), "a.txt")).unwrap();
    drop(in_tx);

    let token = CancelToken::new();
    token.cancel();

    assert!(digest_stage(in_rx, out_tx, &token).is_ok());
    assert_eq!(out_rx.iter().count(), 0);
}
