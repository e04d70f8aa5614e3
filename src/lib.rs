// Library module for verify-manifest
// Re-exports modules for use in integration tests and the binary

pub mod config;
pub mod hash;

pub use config::VerifyConfig;
pub use hash::{FolderVerifier, VerifyError, VerifyFailure, VerifyReport};
