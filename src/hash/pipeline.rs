// Pipeline wiring
// Runs walk -> filter -> hash on their own threads joined by channels

use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver};
use tracing::debug;

use super::cancel::CancelToken;
use super::digest::{digest_stage, FileDigest};
use super::error::VerifyError;
use super::filter::filter_stage;
use super::walk::walk_stage;

type StageHandle = (&'static str, JoinHandle<Result<(), VerifyError>>);

/// The three upstream stages of a run, feeding a single consumer
pub struct Pipeline {
    output: Receiver<FileDigest>,
    stages: Vec<StageHandle>,
}

impl Pipeline {
    /// Start every stage. `root` must already be canonical.
    pub fn spawn(root: PathBuf, manifest_name: Option<String>, token: &CancelToken) -> Self {
        let (entry_tx, entry_rx) = unbounded();
        let (file_tx, file_rx) = unbounded();
        let (digest_tx, digest_rx) = unbounded();

        let walk_token = token.clone();
        let walker = thread::spawn(move || walk_stage(&root, entry_tx, &walk_token));

        let filter_token = token.clone();
        let filter = thread::spawn(move || {
            filter_stage(entry_rx, file_tx, manifest_name.as_deref(), &filter_token);
            Ok::<(), VerifyError>(())
        });

        let hash_token = token.clone();
        let hasher = thread::spawn(move || digest_stage(file_rx, digest_tx, &hash_token));

        Self {
            output: digest_rx,
            stages: vec![("walk", walker), ("filter", filter), ("hash", hasher)],
        }
    }

    /// Results in walk order; the channel closes once the hash stage ends
    pub fn results(&self) -> &Receiver<FileDigest> {
        &self.output
    }

    /// Wait for every stage and return the first error in stage order
    ///
    /// `StagePanicked` is only reported by unwinding builds; with
    /// `panic = "abort"` a stage panic ends the process.
    pub fn join(self) -> Result<(), VerifyError> {
        // Hang up first so no stage can block on a consumer that stopped reading
        drop(self.output);

        let mut first_error = None;
        for (stage, handle) in self.stages {
            let result = handle
                .join()
                .unwrap_or(Err(VerifyError::StagePanicked { stage }));
            debug!(stage, ok = result.is_ok(), "stage finished");
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
