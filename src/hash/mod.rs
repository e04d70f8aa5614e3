// Hash Core Library
// Walk, filter, hash and verify a directory tree against its manifest

pub mod cancel;
pub mod digest;
pub mod error;
pub mod filter;
pub mod manifest;
pub mod path_utils;
pub mod pipeline;
pub mod scanner;
pub mod unknown;
pub mod verify;
pub mod walk;

// Re-export commonly used types for convenience
pub use cancel::CancelToken;
pub use digest::{compute_digest, compute_file_digest, digest_stage, Digest, FileDigest};
pub use error::{VerifyError, VerifyFailure};
pub use filter::{filter_stage, should_hash};
pub use manifest::Manifest;
pub use pipeline::Pipeline;
pub use scanner::{find_hex_run, is_hex_char, md5_in, sha1_in, HashKind};
pub use unknown::{HashLocation, UnknownHashIndex};
pub use verify::{verify_files, FolderVerifier, VerifyReport};
pub use walk::{check_root, walk_stage, FileEntry};
