use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use verify_manifest::config::DEFAULT_MANIFEST_NAME;
use verify_manifest::{FolderVerifier, VerifyConfig};

/// Create a manifest of MD5 and SHA1 sums for a folder, and verify it on later runs
#[derive(Parser)]
#[command(name = "verify-manifest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Helps create a manifest file in a folder, and verify an existing manifest")]
struct Cli {
    /// Root folder to calculate sums for
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Manifest file name, relative to the root. Pass "" to skip loading and saving it
    #[arg(long, default_value = DEFAULT_MANIFEST_NAME)]
    manifest: String,

    /// A text file that contains hash sums in an unknown format.
    /// Every sum in it must be present in the folder to pass
    #[arg(long)]
    unknown: Option<PathBuf>,

    /// Show per-stage debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> VerifyConfig {
        let mut config = VerifyConfig::new(self.root).with_manifest(self.manifest);
        if let Some(unknown) = self.unknown {
            config = config.with_unknown_file(unknown);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.into_config()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: VerifyConfig) -> Result<bool> {
    let root = config.root.clone();
    let report = FolderVerifier::new(config)
        .run()
        .with_context(|| format!("Failed to verify {}", root.display()))?;
    Ok(report.is_success())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
